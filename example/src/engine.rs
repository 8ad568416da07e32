//! A toy sql engine over a static table.
use pgsrv::{CommandTag, PgError, sqlstate};

const USERS_COLUMNS: &[(&str, &str)] = &[("id", "INT4"), ("name", "TEXT"), ("email", "VARCHAR")];

const USERS: &[(i32, &str, Option<&str>)] = &[
    (1, "alice", Some("alice@example.com")),
    (2, "bob", None),
    (3, "", Some("anon@example.com")),
];

/// Result of a statement.
#[derive(Debug)]
pub enum Outcome {
    Rows {
        columns: Vec<(&'static str, &'static str)>,
        rows: Vec<Vec<Option<String>>>,
    },
    Command(CommandTag<'static>),
}

pub fn execute(sql: &str) -> Result<Outcome, PgError> {
    let stmt = sql.trim().trim_end_matches(';');
    // error positions are offsets into `sql` as sent by the client
    let start = sql.len() - sql.trim_start().len();
    let upper = stmt.to_ascii_uppercase();

    match upper.as_str() {
        "SELECT * FROM USERS" => Ok(Outcome::Rows {
            columns: USERS_COLUMNS.to_vec(),
            rows: USERS
                .iter()
                .map(|(id, name, email)| {
                    vec![Some(id.to_string()), Some(name.to_string()), email.map(String::from)]
                })
                .collect(),
        }),
        "SELECT 1" => Ok(Outcome::Rows {
            columns: vec![("?column?", "INT4")],
            rows: vec![vec![Some("1".into())]],
        }),
        "BEGIN" => Ok(Outcome::Command(CommandTag::Other("BEGIN"))),
        "COMMIT" => Ok(Outcome::Command(CommandTag::Other("COMMIT"))),
        "ROLLBACK" => Ok(Outcome::Command(CommandTag::Other("ROLLBACK"))),
        _ if upper.starts_with("SELECT * FROM ") => {
            let table = &stmt["SELECT * FROM ".len()..];
            Err(PgError::new(format!("relation \"{table}\" does not exist"))
                .with_code(sqlstate::UNDEFINED_TABLE)
                .with_position(start + "SELECT * FROM ".len()))
        },
        _ if upper.starts_with("SELECT") => Err(PgError::new("only `SELECT * FROM users` is supported")
            .with_code(sqlstate::FEATURE_NOT_SUPPORTED)),
        _ => Err(PgError::new(format!(
            "syntax error at or near \"{}\"",
            stmt.split_whitespace().next().unwrap_or_default(),
        ))
        .with_code(sqlstate::SYNTAX_ERROR)
        .with_hint("try `SELECT * FROM users`")
        .with_position(start)),
    }
}

#[cfg(test)]
mod test {
    use pgsrv::DatabaseError;

    use super::*;

    #[test]
    fn select_users() {
        let Ok(Outcome::Rows { columns, rows }) = execute("select * from users;") else {
            panic!("expected rows")
        };
        assert_eq!(columns.len(), 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][2], None);
        assert_eq!(rows[2][1].as_deref(), Some(""));
    }

    #[test]
    fn undefined_table() {
        let err = execute("SELECT * FROM orders").unwrap_err();
        assert_eq!(err.code(), Some("42P01"));
        assert_eq!(err.position(), Some(14));
        assert_eq!(err.message(), "relation \"orders\" does not exist");
    }

    #[test]
    fn position_counts_leading_whitespace() {
        let sql = "  \n SELECT * FROM orders";
        let err = execute(sql).unwrap_err();
        assert_eq!(err.position(), Some(18));
        assert_eq!(&sql[18..], "orders");

        let err = execute("   SELEC 1").unwrap_err();
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn syntax_error() {
        let err = execute("SELEC 1").unwrap_err();
        assert_eq!(err.code(), Some(sqlstate::SYNTAX_ERROR));
        assert!(err.hint().is_some());
    }

    #[test]
    fn transaction_commands() {
        assert!(matches!(
            execute("begin"),
            Ok(Outcome::Command(CommandTag::Other("BEGIN")))
        ));
    }
}
