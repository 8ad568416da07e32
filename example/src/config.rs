//! Demo configuration.
use std::env::var;

const DEFAULT_QUERIES: &[&str] = &[
    "SELECT * FROM users",
    "SELECT 1",
    "BEGIN",
    "SELECT * FROM orders",
    "SELEC 1",
];

/// Demo configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub queries: Vec<String>,
    pub buffer_size: usize,
}

impl Config {
    /// Retrieve configuration from environment variable.
    ///
    /// It reads:
    /// - `PGSRV_QUERIES`, queries separated by `;`
    /// - `PGSRV_BUFFER_SIZE`, in memory pipe capacity
    pub fn from_env() -> Config {
        let queries = match var("PGSRV_QUERIES") {
            Ok(ok) => parse_queries(&ok),
            Err(_) => DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
        };

        let buffer_size = match var("PGSRV_BUFFER_SIZE") {
            Ok(ok) => ok.parse().unwrap_or(8 * 1024),
            Err(_) => 8 * 1024,
        };

        Self { queries, buffer_size }
    }
}

fn parse_queries(queries: &str) -> Vec<String> {
    queries
        .split(';')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(String::from)
        .collect()
}
