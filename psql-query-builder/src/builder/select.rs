//! SELECT, RETURNING and ORDER BY fragments

use super::common::{ReturningColumns, SelectColumns, SortDirection};
use super::PsqlQueryBuilder;
use crate::executor::Connection;

impl<C: Connection> PsqlQueryBuilder<C> {
    /// `SELECT <columns> FROM <table>`
    ///
    /// # Examples
    /// ```ignore
    /// qb.select_from("users", ());                       // SELECT * FROM users
    /// qb.select_from("users", ["id", "name"]);           // SELECT id, name FROM users
    /// qb.select_from("users", [("email", SelectOption::distinct())]);
    /// ```
    pub fn select_from(&mut self, table: &str, columns: impl Into<SelectColumns>) -> &mut Self {
        let columns = columns.into().render();
        self.state.append(format!("SELECT {columns} FROM {table}"));
        self
    }

    /// `RETURNING *` or `RETURNING ( <columns> )`
    pub fn returning(&mut self, columns: impl Into<ReturningColumns>) -> &mut Self {
        let columns = columns.into().render();
        self.state.append(format!("RETURNING {columns}"));
        self
    }

    /// `ORDER BY <expr> <direction>, ...` in iteration order
    pub fn order_by<K, I>(&mut self, expressions: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SortDirection)>,
    {
        let entries: Vec<String> = expressions
            .into_iter()
            .map(|(expression, direction)| format!("{} {direction}", expression.into()))
            .collect();
        self.state.append(format!("ORDER BY {}", entries.join(", ")));
        self
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use crate::builder::common::SelectOption;
    use crate::executor::testing::RecordingConnection;
    use crate::{op, PsqlQueryBuilder, QueryBuilder, SortDirection};

    fn builder() -> PsqlQueryBuilder<RecordingConnection> {
        PsqlQueryBuilder::with_connection(RecordingConnection::new())
    }

    #[test]
    fn test_basic_select() {
        let mut qb = builder();
        qb.select_from("users", ());
        assert_eq!(qb.to_sql(), "SELECT * FROM users");
    }

    #[test]
    fn test_select_columns() {
        let mut qb = builder();
        qb.select_from("users", vec!["id", "name", "email"]);
        assert_eq!(qb.to_sql(), "SELECT id, name, email FROM users");
    }

    #[test]
    fn test_select_distinct_mapping() {
        let mut qb = builder();
        qb.select_from(
            "users",
            [("city", SelectOption::distinct()), ("name", SelectOption::plain())],
        );
        assert_eq!(qb.to_sql(), "SELECT DISTINCT city, name FROM users");
    }

    #[test]
    fn test_select_mapping_keeps_insertion_order() {
        let mut columns = IndexMap::new();
        columns.insert("zeta".to_string(), SelectOption::plain());
        columns.insert("alpha".to_string(), SelectOption::distinct());

        let mut qb = builder();
        qb.select_from("t", columns);
        assert_eq!(qb.to_sql(), "SELECT zeta, DISTINCT alpha FROM t");
    }

    #[test]
    fn test_returning() {
        let mut qb = builder();
        qb.returning(());
        assert_eq!(qb.to_sql(), "RETURNING *");

        qb.clear_query().returning(["id", "created_at"]);
        assert_eq!(qb.to_sql(), "RETURNING ( id, created_at )");
    }

    #[test]
    fn test_order_by() {
        let mut qb = builder();
        qb.select_from("users", ())
            .where_(("active", true))
            .order_by([("created_at", SortDirection::Desc), ("name", SortDirection::Asc)]);
        assert_eq!(
            qb.to_sql(),
            "SELECT * FROM users WHERE active = $1 ORDER BY created_at DESC, name ASC"
        );
        assert_eq!(qb.parameters().len(), 1);
    }

    #[test]
    fn test_order_by_expression_mapping() {
        let mut order = IndexMap::new();
        order.insert("lower(name)".to_string(), SortDirection::Asc);

        let mut qb = builder();
        qb.select_from("users", ())
            .where_(("age", op::BETWEEN, 18))
            .order_by(order);
        assert_eq!(
            qb.to_sql(),
            "SELECT * FROM users WHERE age BETWEEN $1 ORDER BY lower(name) ASC"
        );
    }
}
