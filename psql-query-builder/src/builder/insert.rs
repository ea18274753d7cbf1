//! INSERT fragments

use super::PsqlQueryBuilder;
use crate::executor::Connection;
use crate::Value;

impl<C: Connection> PsqlQueryBuilder<C> {
    /// `INSERT INTO <table> ( <columns> ) VALUES ( $i, $j, ... )`
    ///
    /// Columns and values keep the iteration order of `values`; pass an
    /// ordered collection (array, `Vec`, `IndexMap`) to control it.
    ///
    /// # Examples
    /// ```ignore
    /// qb.insert_into("users", [("name", Value::from("John")), ("age", Value::from(30))])
    ///     .returning(["id"]);
    /// ```
    pub fn insert_into<K, V, I>(&mut self, table: &str, values: I) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let (columns, values): (Vec<String>, Vec<Value>) = values
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .unzip();

        self.state.append_with_args(values, |placeholders| {
            format!(
                "INSERT INTO {table} ( {} ) VALUES ( {} )",
                columns.join(", "),
                placeholders.join(", ")
            )
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::executor::testing::RecordingConnection;
    use crate::{PsqlQueryBuilder, QueryBuilder, Value};

    fn builder() -> PsqlQueryBuilder<RecordingConnection> {
        PsqlQueryBuilder::with_connection(RecordingConnection::new())
    }

    #[test]
    fn test_insert_builder() {
        let mut qb = builder();
        qb.insert_into("t", [("a", 1), ("b", 2)]);
        assert_eq!(qb.to_sql(), "INSERT INTO t ( a, b ) VALUES ( $1, $2 )");
        assert_eq!(qb.parameters(), &[Value::I32(1), Value::I32(2)]);
    }

    #[test]
    fn test_insert_keeps_mapping_order() {
        let mut data: IndexMap<String, Value> = IndexMap::new();
        data.insert("name".to_string(), "John".into());
        data.insert("email".to_string(), "john@example.com".into());
        data.insert("age".to_string(), 30.into());

        let mut qb = builder();
        qb.insert_into("users", data).returning(());
        assert_eq!(
            qb.to_sql(),
            "INSERT INTO users ( name, email, age ) VALUES ( $1, $2, $3 ) RETURNING *"
        );
        assert_eq!(
            qb.parameters(),
            &[
                Value::from("John"),
                Value::from("john@example.com"),
                Value::I32(30)
            ]
        );
    }

    #[test]
    fn test_insert_numbering_continues_after_earlier_args() {
        let mut qb = builder();
        qb.raw("WITH x AS (SELECT $1::int AS v)", [5i32])
            .insert_into("t", vec![("v", Value::I32(6)), ("w", Value::Null)]);
        assert_eq!(
            qb.to_sql(),
            "WITH x AS (SELECT $1::int AS v) INSERT INTO t ( v, w ) VALUES ( $2, $3 )"
        );
        assert_eq!(qb.parameters().len(), 3);
    }

    #[test]
    fn test_insert_empty_values() {
        let mut qb = builder();
        qb.insert_into("t", Vec::<(&str, Value)>::new());
        assert_eq!(qb.to_sql(), "INSERT INTO t (  ) VALUES (  )");
        assert!(qb.parameters().is_empty());
    }
}
