//! DELETE fragments

use super::PsqlQueryBuilder;
use crate::executor::Connection;

impl<C: Connection> PsqlQueryBuilder<C> {
    /// `DELETE FROM <table>`
    pub fn delete_from(&mut self, table: &str) -> &mut Self {
        self.state.append(format!("DELETE FROM {table}"));
        self
    }

    /// `USING <table>`
    pub fn using(&mut self, table: &str) -> &mut Self {
        self.state.append(format!("USING {table}"));
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::executor::testing::RecordingConnection;
    use crate::{op, PsqlQueryBuilder, QueryBuilder, Value};

    #[test]
    fn test_delete_with_using() {
        let mut qb = PsqlQueryBuilder::with_connection(RecordingConnection::new());
        qb.delete_from("orders")
            .using("customers")
            .where_(("orders.customer_id", op::EQ, 12))
            .and(("customers.status", "banned"));

        assert_eq!(
            qb.to_sql(),
            "DELETE FROM orders USING customers WHERE orders.customer_id = $1 AND customers.status = $2"
        );
        assert_eq!(qb.parameters(), &[Value::I32(12), Value::from("banned")]);
    }

    #[tokio::test]
    async fn test_delete_send() {
        let mut qb = PsqlQueryBuilder::with_connection(RecordingConnection::new());
        qb.delete_from("users").where_(("age", op::LT, 13));
        qb.send().await.unwrap();

        let (sql, params) = &qb.connection().received[0];
        assert_eq!(sql, "DELETE FROM users WHERE age < $1");
        assert_eq!(params, &vec![Value::I32(13)]);
    }
}
