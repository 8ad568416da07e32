//! Type name to oid registry.
//!
//! Maps canonical uppercase sql type names to the oid announced in [`RowDescription`].
//!
//! [`RowDescription`]: super::RowDescription
use crate::common::{log_warn, verbose};

/// Postgres object identifier.
///
/// The oid type is implemented as an unsigned four-byte integer.
///
/// <https://www.postgresql.org/docs/current/datatype-oid.html>
pub type Oid = u32;

/// Oid zero, the data type is unspecified.
pub const UNSPECIFIED: Oid = 0;

macro_rules! registry {
    ($($name:literal => $oid:literal;)*) => {
        /// All registered type names with their oid, in registration order.
        pub const TYPES: &[(&str, Oid)] = &[$(($name, $oid),)*];

        /// Returns the oid registered for `name`.
        ///
        /// The lookup is exact, `"int4"` is not `"INT4"`.
        pub fn lookup(name: &str) -> Option<Oid> {
            match name {
                $($name => Some($oid),)*
                _ => None,
            }
        }
    };
}

registry! {
    "BOOL" => 16;
    "BYTEA" => 17;
    "CHAR" => 18;
    // `int8` ~18 digit integer, 8-byte storage
    "INT8" => 20;
    // `int2` -32 thousand to 32 thousand, 2-byte storage
    "INT2" => 21;
    // `int4` -2 billion to 2 billion integer, 4-byte storage
    "INT4" => 23;
    // callers depend on INT sharing the INT8 oid
    "INT" => 20;
    // `text` variable-length string, no limit specified
    "TEXT" => 25;
    // JSON stored as text
    "JSON" => 114;
    "XML" => 142;
    // `float4` single-precision floating point number, 4-byte storage
    "FLOAT4" => 700;
    // `float8` double-precision floating point number, 8-byte storage
    "FLOAT8" => 701;
    "VARCHAR" => 1043;
    "DATE" => 1082;
    // time of day
    "TIME" => 1083;
    // date and time
    "TIMESTAMP" => 1114;
    // date and time with timezone
    "TIMESTAMPZ" => 1184;
    "INTERVAL" => 1186;
    "NUMERIC" => 1700;
    // Binary JSON
    "JSONB" => 3802;
    "ANY" => 2276;
}

/// Resolve the oid of a type name.
///
/// Unknown names resolve to [`UNSPECIFIED`] instead of failing,
/// use [`lookup`] to detect them.
pub fn type_oid(name: &str) -> Oid {
    match lookup(name) {
        Some(oid) => oid,
        None => {
            log_warn!("unknown type name `{name}`, sending unspecified oid");
            verbose!(name, "unknown type name");
            UNSPECIFIED
        }
    }
}
