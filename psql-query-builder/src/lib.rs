//! psql-query-builder - a fluent PostgreSQL query builder
//!
//! Chain fragment methods on a [`PsqlQueryBuilder`] to accumulate SQL text and
//! positional `$n` parameters, then [`send`](PsqlQueryBuilder::send) the
//! statement over the builder's connection. The builder starts over with an
//! empty statement after every successful send.

pub mod builder;
pub mod config;
pub mod error;
pub mod executor;
pub mod operator;
pub mod state;
pub mod types;
pub mod value;

// Re-export main types
pub use builder::{
    Condition, IntoCondition, PsqlQueryBuilder, ReturningColumns, SelectColumns, SelectOption,
    SortDirection, WhereConnector,
};
pub use config::Config;
pub use error::{Error, Result};
pub use executor::postgres::PgClient;
pub use executor::{Connect, Connection, QueryResult, Row};
pub use operator::{op, IntoOperator, Operator};
pub use state::{QueryBuilder, QueryState, Statement};
pub use types::{resolve_type, ColumnSpec, ColumnType, ForeignKey, OnDelete, TypeParams};
pub use value::Value;

/// Open a PostgreSQL connection and return a builder over it
pub async fn init(config: Option<Config>) -> Result<PsqlQueryBuilder<PgClient>> {
    PsqlQueryBuilder::init(config).await
}
