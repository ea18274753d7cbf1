//! The fluent statement builder
//!
//! Every fragment method appends to the builder's [`QueryState`] and returns
//! the same builder, so calls chain. Nothing reaches the database until
//! [`PsqlQueryBuilder::send`].

pub mod common;
pub mod delete;
pub mod insert;
pub mod select;
pub mod table;

use std::fmt;

use serde::de::DeserializeOwned;

use crate::executor::{Connect, Connection, QueryResult};
use crate::state::{QueryBuilder, QueryState, Statement};
use crate::{Result, Value};

pub use common::{
    Condition, IntoCondition, ReturningColumns, SelectColumns, SelectOption, SortDirection,
    WhereConnector,
};

/// Accumulates one statement at a time over a single owned connection.
///
/// # Examples
/// ```no_run
/// use psql_query_builder::{op, Config};
///
/// # async fn run() -> psql_query_builder::Result<()> {
/// let mut qb = psql_query_builder::init(Some(Config::from_url("postgres://localhost/app"))).await?;
/// let adults = qb
///     .select_from("users", ["id", "name"])
///     .where_(("age", op::GTE, 18))
///     .send()
///     .await?;
/// println!("{} rows", adults.row_count());
/// # Ok(())
/// # }
/// ```
pub struct PsqlQueryBuilder<C> {
    state: QueryState,
    connection: C,
}

impl<C: Connect> PsqlQueryBuilder<C> {
    /// Open a connection and return a builder with an empty statement.
    ///
    /// Connection failures surface as [`Error::Configuration`](crate::Error::Configuration);
    /// there is no retry.
    pub async fn init(config: Option<C::Config>) -> Result<Self> {
        let connection = C::connect(config).await?;
        Ok(Self::with_connection(connection))
    }
}

impl<C: Connection> PsqlQueryBuilder<C> {
    /// Wrap an already open connection
    pub fn with_connection(connection: C) -> Self {
        Self {
            state: QueryState::new(),
            connection,
        }
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.connection
    }

    pub fn into_connection(self) -> C {
        self.connection
    }

    /// Append SQL verbatim along with its args.
    ///
    /// Placeholders inside `sql` are not rewritten; the caller numbers them
    /// against the args already accumulated.
    pub fn raw<I>(&mut self, sql: impl Into<String>, args: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.state.append(sql);
        self.state.extend_args(args.into_iter().map(Into::into));
        self
    }

    /// Append SQL verbatim with no args
    pub fn raw_sql(&mut self, sql: impl Into<String>) -> &mut Self {
        self.raw(sql, std::iter::empty::<Value>())
    }

    /// `WHERE <key> <op> $n`
    ///
    /// # Examples
    /// ```
    /// use psql_query_builder::{op, PsqlQueryBuilder};
    /// # use psql_query_builder::{Connection, QueryResult, Value};
    /// # struct Offline;
    /// # impl Connection for Offline {
    /// #     async fn query(&mut self, _: &str, _: &[Value]) -> psql_query_builder::Result<QueryResult> {
    /// #         Ok(QueryResult::default())
    /// #     }
    /// # }
    ///
    /// let mut qb = PsqlQueryBuilder::with_connection(Offline);
    /// qb.select_from("users", ()).where_(("id", "=", 5)).and(("age", op::GT, 18));
    /// assert_eq!(qb.to_string(), "SELECT * FROM users WHERE id = $1 AND age > $2");
    /// ```
    pub fn where_<T: IntoCondition>(&mut self, condition: T) -> &mut Self {
        self.push_condition(WhereConnector::Where, condition)
    }

    /// `AND <key> <op> $n`
    pub fn and<T: IntoCondition>(&mut self, condition: T) -> &mut Self {
        self.push_condition(WhereConnector::And, condition)
    }

    /// `OR <key> <op> $n`
    pub fn or<T: IntoCondition>(&mut self, condition: T) -> &mut Self {
        self.push_condition(WhereConnector::Or, condition)
    }

    // IS NULL / IS NOT NULL take no operand, so they bind nothing.
    fn push_condition<T: IntoCondition>(&mut self, connector: WhereConnector, condition: T) -> &mut Self {
        let Condition { key, operator, value } = condition.into_condition();

        if operator.is_unary() {
            self.state.append(format!("{connector} {key} {operator}"));
        } else {
            self.state.append_with_args([value], |placeholders| {
                format!("{connector} {key} {operator} {}", placeholders[0])
            });
        }
        self
    }

    /// Render the accumulated statement without executing it
    pub fn statement(&self) -> Statement {
        self.state.render()
    }

    /// Discard the accumulated statement
    pub fn clear_query(&mut self) -> &mut Self {
        self.state = QueryState::new();
        self
    }

    /// Execute the accumulated statement.
    ///
    /// Once the database has accepted the statement the builder starts over
    /// with an empty one, including when its rows then fail to decode. If the
    /// statement itself fails it is kept so it can be inspected; call
    /// [`clear_query`](Self::clear_query) before building the next one.
    pub async fn send(&mut self) -> Result<QueryResult> {
        let sql = self.state.to_sql();
        tracing::debug!(sql = %sql, args = self.state.args().len(), "sending statement");

        match self.connection.query(&sql, self.state.args()).await {
            Ok(result) => {
                self.clear_query();
                Ok(result)
            }
            Err(err) if err.statement_executed() => {
                tracing::warn!(sql = %sql, error = %err, "statement ran but its rows could not be read");
                self.clear_query();
                Err(err)
            }
            Err(err) => {
                tracing::warn!(sql = %sql, error = %err, "statement failed; keeping query state");
                Err(err)
            }
        }
    }

    /// Execute the accumulated statement and deserialize every row into `T`.
    ///
    /// The statement is reset once execution succeeds, even if the rows do
    /// not match `T`.
    pub async fn send_as<T>(&mut self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.send().await?.deserialize()
    }
}

impl<C> QueryBuilder for PsqlQueryBuilder<C> {
    fn to_sql(&self) -> String {
        self.state.to_sql()
    }

    fn parameters(&self) -> &[Value] {
        self.state.args()
    }
}

impl<C> fmt::Display for PsqlQueryBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.state.to_sql())
    }
}

impl<C> fmt::Debug for PsqlQueryBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PsqlQueryBuilder")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
