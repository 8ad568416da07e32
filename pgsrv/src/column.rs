//! Column descriptor and row values.
use std::borrow::Cow;

use crate::postgres::pg_type::{Oid, type_oid};

/// A result column, its name and its sql type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'a> {
    /// The field name.
    pub name: &'a str,
    /// Canonical uppercase type name, e.g. `INT4`.
    pub type_name: &'a str,
}

impl<'a> Column<'a> {
    pub const fn new(name: &'a str, type_name: &'a str) -> Self {
        Self { name, type_name }
    }

    /// The object ID of the field's data type.
    ///
    /// Unknown type name resolve to oid zero.
    pub fn oid(&self) -> Oid {
        type_oid(self.type_name)
    }
}

/// A value that can be written in a [`DataRow`][crate::postgres::DataRow].
///
/// Values are transmitted in text format.
pub trait DataValue {
    /// The text representation of the value, `None` for NULL.
    fn as_text(&self) -> Option<&[u8]>;
}

impl DataValue for str {
    fn as_text(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl DataValue for String {
    fn as_text(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl DataValue for Cow<'_, str> {
    fn as_text(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl<T> DataValue for &T where T: DataValue + ?Sized {
    fn as_text(&self) -> Option<&[u8]> {
        (**self).as_text()
    }
}

impl<T> DataValue for Option<T> where T: DataValue {
    fn as_text(&self) -> Option<&[u8]> {
        self.as_ref().and_then(T::as_text)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn column_oid() {
        assert_eq!(Column::new("id", "INT4").oid(), 23);
        assert_eq!(Column::new("id", "UUID").oid(), 0);
    }

    #[test]
    fn null_value() {
        assert_eq!(None::<&str>.as_text(), None);
        assert_eq!(Some("").as_text(), Some(&b""[..]));
        assert_eq!(String::from("a").as_text(), Some(&b"a"[..]));
        assert_eq!(Cow::Borrowed("b").as_text(), Some(&b"b"[..]));
    }
}
