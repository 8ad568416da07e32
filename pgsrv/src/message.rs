//! Framed postgres message.
use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::postgres::{
    ProtocolError,
    backend::{self, BackendProtocol},
    frontend::{self, HEADER},
};

/// A complete postgres message, message type, length and body.
///
/// Messages built by this crate always satisfy the length invariant,
/// inbound buffers are checked in [`Message::new`].
#[derive(Clone, PartialEq, Eq)]
pub struct Message {
    bytes: Bytes,
}

impl Message {
    /// Wrap a raw message buffer.
    ///
    /// # Errors
    ///
    /// Returns error if `bytes` is shorter than the header,
    /// or its length field does not cover the rest of the buffer.
    pub fn new(bytes: Bytes) -> Result<Self, ProtocolError> {
        if bytes.len() < HEADER {
            return Err(ProtocolError::Incomplete { len: bytes.len() });
        }

        let declared = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        if declared as usize != bytes.len() - 1 {
            return Err(ProtocolError::LengthMismatch { declared, actual: bytes.len() - 1 });
        }

        Ok(Self { bytes })
    }

    /// Encode a backend message.
    pub fn encode<B: BackendProtocol>(msg: B) -> Self {
        let mut buf = BytesMut::new();
        backend::write(msg, &mut buf);
        Self { bytes: buf.freeze() }
    }

    /// Message type.
    pub fn msgtype(&self) -> u8 {
        self.bytes[0]
    }

    /// The length field, which include itself but not the message type.
    pub fn len(&self) -> u32 {
        u32::try_from(self.bytes.len() - 1).unwrap_or(u32::MAX)
    }

    /// Returns `true` if message have no body.
    pub fn is_empty(&self) -> bool {
        self.bytes.len() == HEADER
    }

    /// Message body, after message type and length.
    pub fn body(&self) -> &[u8] {
        &self.bytes[HEADER..]
    }

    /// The whole message.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Returns the sql text if this is a simple query message.
    ///
    /// See [`query_text`][frontend::query_text].
    pub fn query_text(&self) -> Result<&str, ProtocolError> {
        frontend::query_text(&self.bytes)
    }
}

impl AsRef<[u8]> for Message {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Message> for Bytes {
    fn from(value: Message) -> Self {
        value.bytes
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("msgtype", &char::from(self.msgtype()))
            .field("len", &self.len())
            .field("body", &self.body())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::postgres::CommandComplete;

    #[test]
    fn encoded_message() {
        let msg = Message::encode(CommandComplete { tag: "SELECT 3" });
        assert_eq!(msg.msgtype(), b'C');
        assert_eq!(msg.len(), 13);
        assert_eq!(msg.body(), b"SELECT 3\0");
        assert!(!msg.is_empty());
        assert_eq!(Message::new(msg.clone().into_bytes()).unwrap(), msg);
    }

    #[test]
    fn inbound_query() {
        let msg = Message::new(Bytes::from_static(b"Q\0\0\0\x0cSELECT 1")).unwrap();
        assert_eq!(msg.query_text().unwrap(), "SELECT 1");

        let msg = Message::new(Bytes::from_static(b"S\0\0\0\x04")).unwrap();
        assert!(msg.is_empty());
        assert!(matches!(
            msg.query_text(),
            Err(ProtocolError::InvalidMessageKind { found: b'S', .. })
        ));
    }

    #[test]
    fn invalid_header() {
        assert!(matches!(
            Message::new(Bytes::from_static(b"Q\0\0")),
            Err(ProtocolError::Incomplete { len: 3 })
        ));
        assert!(matches!(
            Message::new(Bytes::from_static(b"Q\0\0\0\x09SELECT 1")),
            Err(ProtocolError::LengthMismatch { declared: 9, actual: 12 })
        ));
    }
}
