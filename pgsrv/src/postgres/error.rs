//! Protocol error
use std::{fmt, str::Utf8Error};

use super::FrontendMessage;

/// An error when reading a frontend message.
pub enum ProtocolError {
    /// Message type is not the one the operation requires.
    InvalidMessageKind {
        expect: u8,
        found: u8,
    },
    /// Buffer is shorter than the 5 bytes message header.
    Incomplete {
        len: usize,
    },
    /// Length field does not match the buffer size.
    LengthMismatch {
        declared: u32,
        actual: usize,
    },
    /// Message body is not valid utf8.
    Utf8(Utf8Error),
}

impl std::error::Error for ProtocolError { }

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ProtocolError::InvalidMessageKind { expect, found } => write!(
                f,
                "Expected message `{}` found `{}` ({:?})",
                FrontendMessage::message_name(expect),
                FrontendMessage::message_name(found),
                char::from(found),
            ),
            ProtocolError::Incomplete { len } => {
                write!(f, "Incomplete message, got {len} bytes of 5 bytes header")
            },
            ProtocolError::LengthMismatch { declared, actual } => {
                write!(f, "Message length field is {declared} but message body is {actual} bytes")
            },
            ProtocolError::Utf8(ref e) => write!(f, "Query is not valid utf8: {e}"),
        }
    }
}

impl fmt::Debug for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<Utf8Error> for ProtocolError {
    fn from(value: Utf8Error) -> Self {
        Self::Utf8(value)
    }
}

impl ProtocolError {
    pub(crate) fn unexpected(expect: u8, found: u8) -> ProtocolError {
        Self::InvalidMessageKind { expect, found }
    }
}
