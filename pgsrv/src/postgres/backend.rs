//! Postgres Backend Messages
//!
//! <https://www.postgresql.org/docs/current/protocol-message-formats.html>
use std::borrow::Cow;

use bytes::{BufMut, BytesMut};

use super::frontend::HEADER;
use crate::{
    Column, DataValue, DatabaseError, EncodeError, Message, Result,
    common::verbose,
    db_error::sqlstate,
    ext::{BufMutExt, StrExt, UsizeExt},
};

/// Write a backend message to `buf`.
///
/// The length field is computed from the bytes actually written.
pub fn write<B: BackendProtocol>(msg: B, buf: &mut BytesMut) {
    let size_hint = msg.size_hint();
    buf.reserve(HEADER + size_hint as usize);

    let offset = buf.len();
    buf.put_u8(B::MSGTYPE);
    // reserve 4 bytes for length
    buf.put_u32(0);

    msg.encode(&mut *buf);

    // length include itself but not the message type
    let len = (buf.len() - offset - 1).to_u32();
    buf[offset + 1..offset + HEADER].copy_from_slice(&len.to_be_bytes());

    debug_assert_eq!(
        len,
        4 + size_hint,
        "Backend message body size not equal to size hint"
    );

    verbose!(msgtype = %char::from(B::MSGTYPE), len, "backend message");
}

/// A type which can be encoded into postgres backend message
pub trait BackendProtocol {
    /// Message type.
    const MSGTYPE: u8;

    /// Size of the main body.
    ///
    /// Note that this is **only** the size of main body as oppose of actual postgres message which
    /// include the length itself.
    fn size_hint(&self) -> u32;

    /// Write the main body of the message.
    ///
    /// The lenght of body written must be equal to the
    /// length returned by [`size_hint`][BackendProtocol::size_hint].
    fn encode(self, buf: impl BufMut);
}

/// Build a [`RowDescription`] message from parallel column names and type names.
///
/// # Errors
///
/// Returns error if `names` and `types` length differ, or there is more than `u16::MAX` columns.
pub fn row_description<N, T>(names: &[N], types: &[T]) -> Result<Message>
where
    N: AsRef<str>,
    T: AsRef<str>,
{
    Ok(Message::encode(RowDescription::from_parts(names, types)?))
}

/// Build a [`DataRow`] message.
pub fn data_row<V: DataValue>(values: &[V]) -> Result<Message> {
    Ok(Message::encode(DataRow::new(values)?))
}

/// Build a [`CommandComplete`] message.
pub fn command_complete(tag: &str) -> Message {
    Message::encode(CommandComplete { tag })
}

/// Build an [`ErrorResponse`] message.
pub fn error_response<E: DatabaseError + ?Sized>(err: &E) -> Message {
    Message::encode(ErrorResponse::new(err))
}

/// Build an idle [`ReadyForQuery`] message.
pub fn ready_for_query() -> Message {
    Message::encode(ReadyForQuery::default())
}

/// Identifies the message as a row description
///
/// Announces the name and data type of every column in following [`DataRow`]s.
/// Column names must not contain nul, which would end the name early.
#[derive(Debug)]
pub struct RowDescription<'a> {
    /// Specifies the number of fields in a row (can be zero).
    field_len: u16,
    columns: Cow<'a, [Column<'a>]>,
}

impl<'a> RowDescription<'a> {
    /// Create row description from columns.
    pub fn new(columns: impl Into<Cow<'a, [Column<'a>]>>) -> Result<Self, EncodeError> {
        let columns = columns.into();
        let Ok(field_len) = u16::try_from(columns.len()) else {
            return Err(EncodeError::TooManyFields { len: columns.len() });
        };
        Ok(Self { field_len, columns })
    }

    /// Create row description by pairing `names[i]` with `types[i]`.
    pub fn from_parts<N, T>(names: &'a [N], types: &'a [T]) -> Result<Self, EncodeError>
    where
        N: AsRef<str>,
        T: AsRef<str>,
    {
        if names.len() != types.len() {
            return Err(EncodeError::ColumnMismatch {
                names: names.len(),
                types: types.len(),
            });
        }

        let columns = names
            .iter()
            .zip(types)
            .map(|(name, ty)| Column::new(name.as_ref(), ty.as_ref()))
            .collect::<Vec<_>>();

        Self::new(columns)
    }

    pub fn columns(&self) -> &[Column<'a>] {
        &self.columns
    }
}

impl BackendProtocol for RowDescription<'_> {
    const MSGTYPE: u8 = b'T';

    fn size_hint(&self) -> u32 {
        // table oid, attribute number, type oid, type size, type modifier, format code
        const FIELD: u32 = 4 + 2 + 4 + 2 + 4 + 2;

        self.columns
            .iter()
            .fold(2, |acc, col| acc + col.name.nul_string_len() + FIELD)
    }

    fn encode(self, mut buf: impl BufMut) {
        buf.put_u16(self.field_len);

        for col in self.columns.iter() {
            buf.put_nul_string(col.name);
            // no physical table, object ID of the table and attribute number are zero
            buf.put_u32(0);
            buf.put_u16(0);
            buf.put_u32(col.oid());
            // data type size
            buf.put_i16(0);
            // type modifier
            buf.put_i32(0);
            // format code, values are always text
            buf.put_u16(0);
        }
    }
}

/// Identifies the message as a data row.
///
/// Every value is written in text format, with `-1` length for NULL.
#[derive(Debug)]
pub struct DataRow<'a, V> {
    /// The number of column values that follow (possibly zero).
    column_len: u16,
    values: &'a [V],
}

impl<'a, V: DataValue> DataRow<'a, V> {
    /// Create data row from values in column order.
    pub fn new(values: &'a [V]) -> Result<Self, EncodeError> {
        let Ok(column_len) = u16::try_from(values.len()) else {
            return Err(EncodeError::TooManyFields { len: values.len() });
        };

        for (index, value) in values.iter().enumerate() {
            if let Some(text) = value.as_text() {
                if i32::try_from(text.len()).is_err() {
                    return Err(EncodeError::ValueTooLarge { index, len: text.len() });
                }
            }
        }

        Ok(Self { column_len, values })
    }
}

impl<V: DataValue> BackendProtocol for DataRow<'_, V> {
    const MSGTYPE: u8 = b'D';

    fn size_hint(&self) -> u32 {
        self.values.iter().fold(2, |acc, value| {
            acc + 4 + value.as_text().map_or(0, |text| text.len().to_u32())
        })
    }

    fn encode(self, mut buf: impl BufMut) {
        buf.put_u16(self.column_len);

        for value in self.values {
            match value.as_text() {
                Some(text) => {
                    // length checked in `DataRow::new`
                    buf.put_i32(text.len() as i32);
                    buf.put_slice(text);
                },
                None => buf.put_i32(-1),
            }
        }
    }
}

/// Identifies the message as a command-completed response
///
/// The tag is transmitted verbatim, see [`CommandTag`][crate::CommandTag]
/// for the conventional tags. The tag must not contain nul, which would end it early.
#[derive(Debug)]
pub struct CommandComplete<'a> {
    /// The command tag. This is usually a single word that identifies which SQL command was completed.
    pub tag: &'a str,
}

impl BackendProtocol for CommandComplete<'_> {
    const MSGTYPE: u8 = b'C';

    fn size_hint(&self) -> u32 {
        self.tag.nul_string_len()
    }

    fn encode(self, mut buf: impl BufMut) {
        buf.put_nul_string(self.tag);
    }
}

/// Identifies the message as an error
///
/// The message body consists of one or more identified fields, followed by a zero byte as a terminator.
/// Fields can appear in any order, this crate writes them as
/// severity, code, message, then hint and position when present.
///
/// For each field there is the following:
///
/// `Byte1` A code identifying the field type.
///
/// `String` The field value.
///
/// <https://www.postgresql.org/docs/current/protocol-error-fields.html>
#[derive(Debug)]
pub struct ErrorResponse<'a> {
    code: &'a str,
    message: String,
    hint: Option<&'a str>,
    position: Option<usize>,
}

impl<'a> ErrorResponse<'a> {
    /// Severity, always `ERROR`.
    pub const SEVERITY: &'static str = "ERROR";

    /// Collect error response fields.
    ///
    /// Empty code and hint are treated as absent. Every field is cut at its first nul,
    /// as a nul terminates the field on the wire.
    pub fn new<E: DatabaseError + ?Sized>(err: &'a E) -> Self {
        let mut message = err.message();
        message.truncate(message.until_nul().len());

        Self {
            code: err
                .code()
                .map(StrExt::until_nul)
                .filter(|code| !code.is_empty())
                .unwrap_or(sqlstate::INTERNAL_ERROR),
            message,
            hint: err.hint().map(StrExt::until_nul).filter(|hint| !hint.is_empty()),
            position: err.position(),
        }
    }
}

impl BackendProtocol for ErrorResponse<'_> {
    const MSGTYPE: u8 = b'E';

    fn size_hint(&self) -> u32 {
        let mut size = 1 + Self::SEVERITY.nul_string_len()
            + 1 + self.code.nul_string_len()
            + 1 + self.message.nul_string_len();
        if let Some(hint) = self.hint {
            size += 1 + hint.nul_string_len();
        }
        if let Some(position) = self.position {
            size += 1 + itoa::Buffer::new().format(position).nul_string_len();
        }
        // terminator
        size + 1
    }

    fn encode(self, mut buf: impl BufMut) {
        buf.put_u8(b'S');
        buf.put_nul_string(Self::SEVERITY);
        buf.put_u8(b'C');
        buf.put_nul_string(self.code);
        buf.put_u8(b'M');
        buf.put_nul_string(&self.message);

        if let Some(hint) = self.hint {
            buf.put_u8(b'H');
            buf.put_nul_string(hint);
        }

        if let Some(position) = self.position {
            buf.put_u8(b'P');
            buf.put_nul_string(itoa::Buffer::new().format(position));
        }

        buf.put_u8(b'\0');
    }
}

/// Current backend transaction status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionStatus {
    /// Not in a transaction block.
    #[default]
    Idle,
    /// In a transaction block.
    InTransaction,
    /// In a failed transaction block, queries will be rejected until block is ended.
    Failed,
}

impl TransactionStatus {
    /// Status indicator byte.
    pub fn status(&self) -> u8 {
        match self {
            TransactionStatus::Idle => b'I',
            TransactionStatus::InTransaction => b'T',
            TransactionStatus::Failed => b'E',
        }
    }
}

/// Identifies the message type. ReadyForQuery is sent whenever the backend is ready for a new query cycle.
#[derive(Debug, Default)]
pub struct ReadyForQuery {
    pub status: TransactionStatus,
}

impl ReadyForQuery {
    pub fn new(status: TransactionStatus) -> Self {
        Self { status }
    }
}

impl BackendProtocol for ReadyForQuery {
    const MSGTYPE: u8 = b'Z';

    fn size_hint(&self) -> u32 { 1 }

    fn encode(self, mut buf: impl BufMut) {
        buf.put_u8(self.status.status());
    }
}
