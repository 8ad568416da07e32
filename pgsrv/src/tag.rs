//! Command completion tags.
use std::fmt;

/// Conventional [`CommandComplete`][crate::postgres::CommandComplete] tag.
///
/// For an INSERT command, the tag is INSERT oid rows, where rows is the number of rows inserted.
/// OIDs system columns are not supported anymore; therefore oid is always 0.
///
/// For a SELECT or CREATE TABLE AS command, the tag is SELECT rows where rows is the number of rows retrieved.
///
/// ```
/// use pgsrv::CommandTag;
///
/// assert_eq!(CommandTag::Select(3).to_string(), "SELECT 3");
/// assert_eq!(CommandTag::Insert(1).to_string(), "INSERT 0 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandTag<'a> {
    Select(u64),
    Insert(u64),
    Update(u64),
    Delete(u64),
    Merge(u64),
    Fetch(u64),
    Move(u64),
    Copy(u64),
    /// Any other tag, transmitted verbatim, e.g. `CREATE TABLE`.
    Other(&'a str),
}

impl fmt::Display for CommandTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (verb, rows) = match *self {
            CommandTag::Select(rows) => ("SELECT", rows),
            CommandTag::Insert(rows) => ("INSERT 0", rows),
            CommandTag::Update(rows) => ("UPDATE", rows),
            CommandTag::Delete(rows) => ("DELETE", rows),
            CommandTag::Merge(rows) => ("MERGE", rows),
            CommandTag::Fetch(rows) => ("FETCH", rows),
            CommandTag::Move(rows) => ("MOVE", rows),
            CommandTag::Copy(rows) => ("COPY", rows),
            CommandTag::Other(tag) => return f.write_str(tag),
        };
        f.write_str(verb)?;
        f.write_str(" ")?;
        f.write_str(itoa::Buffer::new().format(rows))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn render_tags() {
        assert_eq!(CommandTag::Select(0).to_string(), "SELECT 0");
        assert_eq!(CommandTag::Insert(42).to_string(), "INSERT 0 42");
        assert_eq!(CommandTag::Update(7).to_string(), "UPDATE 7");
        assert_eq!(CommandTag::Delete(1).to_string(), "DELETE 1");
        assert_eq!(CommandTag::Other("CREATE TABLE").to_string(), "CREATE TABLE");
    }

    #[test]
    fn command_complete_from_tag() {
        let tag = CommandTag::Select(2).to_string();
        let msg = crate::command_complete(&tag);
        assert_eq!(msg.as_bytes(), b"C\0\0\0\x0dSELECT 2\0");
    }
}
