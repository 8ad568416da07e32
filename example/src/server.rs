//! Connection loop answering simple queries.
use std::io;

use bytes::BytesMut;
use pgsrv::{
    Column, Message,
    postgres::{
        CommandComplete, DataRow, ErrorResponse, Query, ReadyForQuery, RowDescription,
        backend::write,
    },
};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::{
    engine::{self, Outcome},
    frame::read_frame,
};

pub async fn serve<IO: AsyncRead + AsyncWrite + Unpin>(mut io: IO) -> io::Result<()> {
    while let Some(frame) = read_frame(&mut io).await? {
        let msg = match Message::new(frame) {
            Ok(ok) => ok,
            Err(err) => {
                tracing::warn!("dropping malformed message: {err}");
                return Ok(());
            },
        };

        if msg.msgtype() == b'X' {
            tracing::debug!("terminate");
            return Ok(());
        }

        let mut buf = BytesMut::new();

        match Query::decode(msg.as_bytes()) {
            Ok(query) => respond(query.sql, &mut buf),
            Err(err) => {
                tracing::warn!("{err}");
                write(ErrorResponse::new(&err), &mut buf);
            },
        }

        // end of query cycle
        write(ReadyForQuery::default(), &mut buf);
        io.write_all(&buf).await?;
    }

    Ok(())
}

/// Write the response of a query, without the ReadyForQuery.
fn respond(sql: &str, buf: &mut BytesMut) {
    tracing::info!(sql, "query");

    match engine::execute(sql) {
        Ok(Outcome::Rows { columns, rows }) => {
            let columns = columns
                .iter()
                .map(|(name, ty)| Column::new(name, ty))
                .collect::<Vec<_>>();

            let description = match RowDescription::new(columns) {
                Ok(ok) => ok,
                Err(err) => return write(ErrorResponse::new(&err), buf),
            };
            write(description, buf);

            for row in &rows {
                match DataRow::new(row.as_slice()) {
                    Ok(data_row) => write(data_row, buf),
                    Err(err) => return write(ErrorResponse::new(&err), buf),
                }
            }

            let tag = pgsrv::CommandTag::Select(rows.len() as u64).to_string();
            write(CommandComplete { tag: &tag }, buf);
        },
        Ok(Outcome::Command(tag)) => {
            write(CommandComplete { tag: &tag.to_string() }, buf);
        },
        Err(err) => {
            tracing::debug!("query failed: {err}");
            write(ErrorResponse::new(&err), buf);
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn respond_rows() {
        let mut buf = BytesMut::new();
        respond("SELECT 1", &mut buf);
        let tags = frames(&buf);
        assert_eq!(tags, [b'T', b'D', b'C']);
    }

    #[test]
    fn respond_error() {
        let mut buf = BytesMut::new();
        respond("DROP TABLE users", &mut buf);
        assert_eq!(frames(&buf), [b'E']);
    }

    /// Message types of consecutive messages, checking every length field.
    fn frames(mut buf: &[u8]) -> Vec<u8> {
        let mut tags = vec![];
        while !buf.is_empty() {
            let len = u32::from_be_bytes([buf[1], buf[2], buf[3], buf[4]]) as usize;
            tags.push(buf[0]);
            buf = &buf[1 + len..];
        }
        tags
    }
}
