use tracing::{Instrument, trace_span};
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

mod config;
mod engine;
mod frame;
mod server;
mod client;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::Registry::default()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = config::Config::from_env();
    let (client_io, server_io) = tokio::io::duplex(config.buffer_size);

    let server = tokio::spawn(server::serve(server_io).instrument(trace_span!("server")));
    client::run(client_io, &config.queries).instrument(trace_span!("client")).await?;

    server.await??;
    Ok(())
}
