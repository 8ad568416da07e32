//! Postgres Backend Message Encoder
//!
//! Builds the messages a postgres compatible server sends back for a simple query cycle.
//! Every builder is a pure function returning a freshly allocated [`Message`].
//!
//! # Examples
//!
//! ```
//! use pgsrv::{PgError, Message};
//!
//! # fn app() -> pgsrv::Result<()> {
//! let inbound = Message::new(bytes::Bytes::from_static(b"Q\0\0\0\x0dSELECT 1\0"))?;
//! let sql = inbound.query_text()?;
//! assert_eq!(sql, "SELECT 1\0");
//!
//! let mut response = vec![];
//! response.push(pgsrv::row_description(&["id"], &["INT4"])?);
//! response.push(pgsrv::data_row(&["1"])?);
//! response.push(pgsrv::command_complete("SELECT 1"));
//! response.push(pgsrv::ready_for_query());
//!
//! let err = PgError::new("relation \"foo\" does not exist")
//!     .with_code(pgsrv::sqlstate::UNDEFINED_TABLE)
//!     .with_position(14);
//! let failed = pgsrv::error_response(&err);
//! assert_eq!(failed.msgtype(), b'E');
//! # Ok(())
//! # }
//! ```

mod common;
mod ext;

// Protocol
pub mod postgres;

// Component
pub mod column;
pub mod message;
pub mod tag;
pub mod db_error;

mod error;

pub use column::{Column, DataValue};
pub use message::Message;
pub use tag::CommandTag;
pub use db_error::{DatabaseError, PgError, sqlstate};
pub use error::{EncodeError, Error, ErrorKind, Result};

pub use postgres::pg_type::{Oid, type_oid};
pub use postgres::frontend::query_text;
pub use postgres::backend::{
    command_complete, data_row, error_response, ready_for_query, row_description,
};
