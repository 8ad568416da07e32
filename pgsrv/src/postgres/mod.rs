//! Postgres Frontend and Backend Protocol
//!
//! Docs here mostly quoted from the official postgres documentation.
//!
//! ## Messaging Overview
//!
//! All communication is through a stream of messages. The first byte of a message identifies the message type,
//! and the next four bytes specify the length of the rest of the message (this length count includes itself,
//! but not the message-type byte). The remaining contents of the message are determined by the message type.
//!
//! ```text
//! ┏━━━━┳━━━━━━━━━━━━━━━━━━━┳━━━━━━┓
//! ┃ Ty ┃       Length      ┃ Body ┃
//! ┣━━━━╋━━━━━━━━━━━━━━━━━━━╋━━━━━━┫
//! ┃ u8 ┃        u32        ┃ [u8] ┃
//! ┣━━━━╋━━━━━━━━━━━━━━━━━━━╋━━━━━━┫
//! ┃ 43 ┃ 00 | 00 | 00 | 0D ┃  ..  ┃
//! ┗━━━━┻━━━━━━━━━━━━━━━━━━━┻━━━━━━┛
//! ```
//!
//! This crate sits on the server side: it writes [`backend`] messages and only reads the
//! simple query [`frontend`] message.
//!
//! ## Format Codes
//!
//! Every column value is transmitted in the text format, which has format code zero.
//!
//! <https://www.postgresql.org/docs/17/protocol-overview.html>

pub mod pg_type;

pub mod frontend;
pub mod backend;

mod error;

pub use pg_type::Oid;

pub use frontend::{FrontendMessage, Query};
pub use backend::{
    BackendProtocol, CommandComplete, DataRow, ErrorResponse, ReadyForQuery, RowDescription,
    TransactionStatus,
};
pub use error::ProtocolError;
