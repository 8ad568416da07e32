//! Postgres Frontend Messages
//!
//! Only the simple [`Query`] message is read here, other frontend messages are left
//! to the connection layer.
//!
//! <https://www.postgresql.org/docs/current/protocol-message-formats.html>
use super::ProtocolError;
use crate::common::verbose;

/// Message type and length.
pub(crate) const HEADER: usize = 1 + 4;

/// Postgres frontend message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendMessage {
    Bind,
    Close,
    CopyData,
    CopyDone,
    CopyFail,
    Describe,
    Execute,
    Flush,
    FunctionCall,
    Parse,
    PasswordMessage,
    Query,
    Sync,
    Terminate,
}

macro_rules! match_frontend {
    ($($name:ident => $ty:literal,)*) => {
        impl FrontendMessage {
            /// Message type byte.
            pub fn msgtype(&self) -> u8 {
                match self {
                    $(Self::$name => $ty,)*
                }
            }

            /// Get message kind from message type.
            pub fn from_msgtype(msgtype: u8) -> Option<Self> {
                match msgtype {
                    $($ty => Some(Self::$name),)*
                    _ => None,
                }
            }

            /// Get message name from message type.
            ///
            /// Returns `"Unknown"` for unknown message type.
            pub fn message_name(msgtype: u8) -> &'static str {
                match msgtype {
                    $($ty => stringify!($name),)*
                    _ => "Unknown",
                }
            }
        }
    };
}

match_frontend! {
    Bind => b'B',
    Close => b'C',
    CopyData => b'd',
    CopyDone => b'c',
    CopyFail => b'f',
    Describe => b'D',
    Execute => b'E',
    Flush => b'H',
    FunctionCall => b'F',
    Parse => b'P',
    PasswordMessage => b'p',
    Query => b'Q',
    Sync => b'S',
    Terminate => b'X',
}

/// Returns the sql text of a simple query message.
///
/// `msg` is the whole message, including message type and length.
///
/// The text is everything after the header, the nul terminator is kept,
/// use [`Query::decode`] to have it stripped.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidMessageKind`] if `msg` is not a [`Query`] message.
pub fn query_text(msg: &[u8]) -> Result<&str, ProtocolError> {
    let Some(&msgtype) = msg.first() else {
        return Err(ProtocolError::Incomplete { len: 0 });
    };
    if msgtype != Query::MSGTYPE {
        return Err(ProtocolError::unexpected(Query::MSGTYPE, msgtype));
    }
    if msg.len() < HEADER {
        return Err(ProtocolError::Incomplete { len: msg.len() });
    }

    let sql = std::str::from_utf8(&msg[HEADER..])?;
    verbose!(sql, "query text");
    Ok(sql)
}

/// Identifies the message as a simple query
#[derive(Debug)]
pub struct Query<'a> {
    /// the query string itself, without nul terminator
    pub sql: &'a str,
}

impl<'a> Query<'a> {
    pub const MSGTYPE: u8 = b'Q';

    /// Decode a simple query message, stripping the nul terminator.
    pub fn decode(msg: &'a [u8]) -> Result<Self, ProtocolError> {
        let text = query_text(msg)?;
        Ok(Self { sql: text.strip_suffix('\0').unwrap_or(text) })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extract_query_text() {
        assert_eq!(query_text(b"Q\0\0\0\x0cSELECT 1").unwrap(), "SELECT 1");
        assert_eq!(query_text(b"Q\0\0\0\x0dSELECT 1\0").unwrap(), "SELECT 1\0");
        assert_eq!(query_text(b"Q\0\0\0\x04").unwrap(), "");
    }

    #[test]
    fn invalid_message_kind() {
        let err = query_text(b"P\0\0\0\x0cSELECT 1").unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidMessageKind { expect: b'Q', found: b'P' }
        ));
        assert_eq!(err.to_string(), "Expected message `Query` found `Parse` ('P')");

        // message kind is checked before the header length
        let err = query_text(b"X").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidMessageKind { found: b'X', .. }));
    }

    #[test]
    fn incomplete() {
        assert!(matches!(query_text(b""), Err(ProtocolError::Incomplete { len: 0 })));
        assert!(matches!(query_text(b"Q\0\0"), Err(ProtocolError::Incomplete { len: 3 })));
    }

    #[test]
    fn invalid_utf8() {
        assert!(matches!(query_text(b"Q\0\0\0\x06\xff\xfe"), Err(ProtocolError::Utf8(_))));
    }

    #[test]
    fn decode_strips_nul() {
        let query = Query::decode(b"Q\0\0\0\x0dSELECT 1\0").unwrap();
        assert_eq!(query.sql, "SELECT 1");
        let query = Query::decode(b"Q\0\0\0\x0cSELECT 1").unwrap();
        assert_eq!(query.sql, "SELECT 1");
    }

    #[test]
    fn message_names() {
        assert_eq!(FrontendMessage::message_name(b'Q'), "Query");
        assert_eq!(FrontendMessage::message_name(b'~'), "Unknown");
        assert_eq!(FrontendMessage::from_msgtype(b'X'), Some(FrontendMessage::Terminate));
        assert_eq!(FrontendMessage::Sync.msgtype(), b'S');
    }
}
