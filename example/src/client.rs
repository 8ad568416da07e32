//! Client side of the demo, sends queries and logs every response.
use bytes::Buf;
use pgsrv::Message;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::{BoxError, frame};

pub async fn run<IO: AsyncRead + AsyncWrite + Unpin>(mut io: IO, queries: &[String]) -> Result<(), BoxError> {
    for sql in queries {
        io.write_all(&frame::query(sql)).await?;

        loop {
            let Some(frame) = frame::read_frame(&mut io).await? else {
                return Err("server closed the connection".into());
            };
            let msg = Message::new(frame)?;
            let mut body = msg.body();

            match msg.msgtype() {
                b'T' => tracing::info!(fields = body.get_u16(), "row description"),
                b'D' => tracing::info!("data row {:?}", data_row(body)),
                b'C' => tracing::info!("command complete {:?}", String::from_utf8_lossy(body)),
                b'E' => tracing::info!("error response {:?}", error_fields(body)),
                b'Z' => {
                    tracing::info!(status = %char::from(body.get_u8()), "ready for query");
                    break;
                },
                msgtype => tracing::warn!(msgtype = %char::from(msgtype), "unexpected message"),
            }
        }
    }

    io.write_all(&frame::terminate()).await?;
    Ok(())
}

fn data_row(mut body: &[u8]) -> Vec<Option<String>> {
    let len = body.get_u16();
    (0..len)
        .map(|_| match body.get_i32() {
            -1 => None,
            len => {
                let value = String::from_utf8_lossy(&body[..len as usize]).into_owned();
                body.advance(len as usize);
                Some(value)
            },
        })
        .collect()
}

fn error_fields(body: &[u8]) -> Vec<(char, String)> {
    body.split(|e| *e == b'\0')
        .filter(|field| !field.is_empty())
        .map(|field| (char::from(field[0]), String::from_utf8_lossy(&field[1..]).into_owned()))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_data_row() {
        let msg = pgsrv::data_row(&[Some("1"), None, Some("")]).unwrap();
        assert_eq!(data_row(msg.body()), [Some("1".into()), None, Some(String::new())]);
    }

    #[test]
    fn decode_error_fields() {
        let msg = pgsrv::error_response(&pgsrv::PgError::new("boom").with_position(3));
        assert_eq!(
            error_fields(msg.body()),
            [
                ('S', String::from("ERROR")),
                ('C', String::from("XX000")),
                ('M', String::from("boom")),
                ('P', String::from("3")),
            ],
        );
    }

    #[tokio::test]
    async fn query_cycle() {
        let (client, server) = tokio::io::duplex(1024);
        let server = tokio::spawn(crate::server::serve(server));
        let queries = [String::from("SELECT * FROM users"), String::from("SELEC")];
        run(client, &queries).await.unwrap();
        server.await.unwrap().unwrap();
    }
}
