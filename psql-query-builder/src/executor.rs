//! Statement execution and the connection capability

use std::future::Future;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;

use crate::{Result, Value};

/// One result row, column name to JSON value, in column order
pub type Row = IndexMap<String, serde_json::Value>;

/// Rows and affected-row count returned by a statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub rows_affected: u64,
}

impl QueryResult {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Deserialize every row into `T`
    pub fn deserialize<T>(self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.rows
            .into_iter()
            .map(|row| {
                let object = serde_json::Value::Object(row.into_iter().collect());
                Ok(serde_json::from_value(object)?)
            })
            .collect()
    }
}

/// An open database connection able to run one parameterized statement
pub trait Connection: Send {
    /// Execute `sql` with `params` bound to `$1..$n`
    fn query(
        &mut self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Result<QueryResult>> + Send;
}

/// Connections that can open themselves from a configuration
pub trait Connect: Connection + Sized {
    type Config: Send;

    /// Open a connection. `None` uses the implementation's defaults.
    fn connect(config: Option<Self::Config>) -> impl Future<Output = Result<Self>> + Send;
}

/// sqlx-backed PostgreSQL connection
pub mod postgres {
    use futures::TryStreamExt;
    use sqlx::encode::IsNull;
    use sqlx::postgres::types::{Oid, PgMoney, PgTimeTz};
    use sqlx::postgres::{
        PgArgumentBuffer, PgArguments, PgConnection, PgRow, PgTypeInfo, PgValueFormat,
    };
    use sqlx::query::Query;
    use sqlx::types::BitVec;
    use sqlx::{
        Column, Connection as _, Either, Executor as _, Postgres, Row as _, TypeInfo, ValueRef,
    };

    use super::*;
    use crate::{Config, Error};

    /// Fraction digits of `MONEY` values (`lc_monetary` in most locales)
    const MONEY_FRAC_DIGITS: u32 = 2;

    /// A single PostgreSQL connection, opened once and reused per statement
    #[derive(Debug)]
    pub struct PgClient {
        inner: PgConnection,
    }

    impl PgClient {
        /// Open a connection from a configuration
        pub async fn new(config: &Config) -> Result<Self> {
            let options = config.connect_options()?;
            let inner = PgConnection::connect_with(&options)
                .await
                .map_err(Error::Configuration)?;

            tracing::info!(
                host = options.get_host(),
                port = options.get_port(),
                database = options.get_database().unwrap_or_default(),
                "connected to postgres"
            );
            Ok(Self { inner })
        }

        /// Wrap an existing sqlx connection
        pub fn from_connection(inner: PgConnection) -> Self {
            Self { inner }
        }

        /// Close the connection gracefully
        pub async fn close(self) -> Result<()> {
            self.inner.close().await.map_err(Error::Execution)
        }
    }

    impl Connection for PgClient {
        async fn query(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult> {
            let query = bind_values_to_query(sqlx::query(sql), params);

            // Drain the whole response before decoding so a bad row never
            // cuts the statement short.
            let mut rows = Vec::new();
            let mut rows_affected = 0;
            let mut stream = (&mut self.inner).fetch_many(query);
            while let Some(step) = stream.try_next().await.map_err(Error::Execution)? {
                match step {
                    Either::Left(done) => rows_affected += done.rows_affected(),
                    Either::Right(row) => rows.push(row),
                }
            }

            Ok(QueryResult {
                rows: rows.iter().map(row_to_json).collect::<Result<_>>()?,
                rows_affected,
            })
        }
    }

    impl Connect for PgClient {
        type Config = Config;

        async fn connect(config: Option<Config>) -> Result<Self> {
            PgClient::new(&config.unwrap_or_default()).await
        }
    }

    /// NULL with an unspecified parameter type; the server infers it from
    /// the statement.
    #[derive(Debug, Clone, Copy)]
    struct UntypedNull;

    impl sqlx::Type<Postgres> for UntypedNull {
        fn type_info() -> PgTypeInfo {
            PgTypeInfo::with_oid(Oid(0))
        }
    }

    impl sqlx::Encode<'_, Postgres> for UntypedNull {
        fn encode_by_ref(&self, _buf: &mut PgArgumentBuffer) -> IsNull {
            IsNull::Yes
        }
    }

    /// Bind values to a sqlx query in placeholder order
    fn bind_values_to_query<'q>(
        mut query: Query<'q, Postgres, PgArguments>,
        params: &'q [Value],
    ) -> Query<'q, Postgres, PgArguments> {
        for (index, param) in params.iter().enumerate() {
            tracing::trace!(placeholder = index + 1, kind = param.type_name(), "binding parameter");
            query = match param {
                Value::Null => query.bind(UntypedNull),
                Value::Bool(b) => query.bind(*b),
                Value::I16(i) => query.bind(*i),
                Value::I32(i) => query.bind(*i),
                Value::I64(i) => query.bind(*i),
                Value::F32(f) => query.bind(*f),
                Value::F64(f) => query.bind(*f),
                Value::String(s) => query.bind(s.as_str()),
                Value::Bytes(b) => query.bind(b.as_slice()),
                Value::Json(j) => query.bind(j),
                Value::Array(items) => bind_array(query, items),
                Value::Uuid(u) => query.bind(*u),
                Value::Timestamp(t) => query.bind(*t),
                Value::Date(d) => query.bind(*d),
                Value::Decimal(d) => query.bind(*d),
            };
        }
        query
    }

    /// Homogeneous arrays bind as native PostgreSQL arrays (usable with
    /// `= ANY($n)`); anything else binds as a JSON array.
    fn bind_array<'q>(
        query: Query<'q, Postgres, PgArguments>,
        items: &'q [Value],
    ) -> Query<'q, Postgres, PgArguments> {
        if items.is_empty() {
            return query.bind(serde_json::Value::Array(Vec::new()));
        }

        if let Some(ints) = collect_all(items, |v| match v {
            Value::I32(i) => Some(*i),
            _ => None,
        }) {
            return query.bind(ints);
        }
        if let Some(bigints) = collect_all(items, |v| match v {
            Value::I16(i) => Some(i64::from(*i)),
            Value::I32(i) => Some(i64::from(*i)),
            Value::I64(i) => Some(*i),
            _ => None,
        }) {
            return query.bind(bigints);
        }
        if let Some(texts) = collect_all(items, |v| match v {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }) {
            return query.bind(texts);
        }
        if let Some(bools) = collect_all(items, |v| match v {
            Value::Bool(b) => Some(*b),
            _ => None,
        }) {
            return query.bind(bools);
        }
        if let Some(floats) = collect_all(items, |v| match v {
            Value::F32(f) => Some(f64::from(*f)),
            Value::F64(f) => Some(*f),
            _ => None,
        }) {
            return query.bind(floats);
        }

        query.bind(serde_json::Value::Array(items.iter().map(Value::to_json).collect()))
    }

    fn collect_all<T>(items: &[Value], f: impl Fn(&Value) -> Option<T>) -> Option<Vec<T>> {
        items.iter().map(f).collect()
    }

    fn decode<'r, T>(row: &'r PgRow, index: usize, column: &str) -> Result<T>
    where
        T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
    {
        row.try_get(index)
            .map_err(|e| Error::decode(column, e.to_string()))
    }

    fn number(value: Option<serde_json::Number>) -> serde_json::Value {
        value.map(serde_json::Value::Number).unwrap_or(serde_json::Value::Null)
    }

    /// Render a bit string the way PostgreSQL prints it, e.g. `1011`
    fn bit_string(bits: &BitVec) -> String {
        bits.iter().map(|bit| if bit { '1' } else { '0' }).collect()
    }

    /// Convert a PostgreSQL row into a JSON object keyed by column name.
    ///
    /// `NUMERIC`, `MONEY` and the date/time types come back as strings so
    /// no precision is lost.
    fn row_to_json(row: &PgRow) -> Result<Row> {
        use serde_json::{Number, Value as Json};

        let mut out = Row::with_capacity(row.len());
        for (index, column) in row.columns().iter().enumerate() {
            let name = column.name();
            let raw = row
                .try_get_raw(index)
                .map_err(|e| Error::decode(name, e.to_string()))?;
            if raw.is_null() {
                out.insert(name.to_string(), Json::Null);
                continue;
            }

            let value = match column.type_info().name() {
                "BOOL" => Json::Bool(decode(row, index, name)?),
                "INT2" => Json::from(decode::<i16>(row, index, name)?),
                "INT4" => Json::from(decode::<i32>(row, index, name)?),
                "INT8" => Json::from(decode::<i64>(row, index, name)?),
                "OID" => Json::from(decode::<Oid>(row, index, name)?.0),
                "FLOAT4" => number(Number::from_f64(f64::from(decode::<f32>(row, index, name)?))),
                "FLOAT8" => number(Number::from_f64(decode::<f64>(row, index, name)?)),
                "NUMERIC" => {
                    Json::String(decode::<rust_decimal::Decimal>(row, index, name)?.to_string())
                }
                "MONEY" => Json::String(
                    decode::<PgMoney>(row, index, name)?
                        .to_decimal(MONEY_FRAC_DIGITS)
                        .to_string(),
                ),
                "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CITEXT" => {
                    Json::String(decode(row, index, name)?)
                }
                "JSON" | "JSONB" => decode::<Json>(row, index, name)?,
                "BYTEA" => Json::from(decode::<Vec<u8>>(row, index, name)?),
                "UUID" => Json::String(decode::<uuid::Uuid>(row, index, name)?.to_string()),
                "DATE" => Json::String(decode::<chrono::NaiveDate>(row, index, name)?.to_string()),
                "TIME" => Json::String(decode::<chrono::NaiveTime>(row, index, name)?.to_string()),
                "TIMETZ" => {
                    let value: PgTimeTz<chrono::NaiveTime, chrono::FixedOffset> =
                        decode(row, index, name)?;
                    Json::String(format!("{}{}", value.time, value.offset))
                }
                "TIMESTAMP" => Json::String(
                    decode::<chrono::NaiveDateTime>(row, index, name)?.to_string(),
                ),
                "TIMESTAMPTZ" => Json::String(
                    decode::<chrono::DateTime<chrono::Utc>>(row, index, name)?.to_rfc3339(),
                ),
                "BIT" | "VARBIT" => Json::String(bit_string(&decode::<BitVec>(row, index, name)?)),
                "INT4[]" => Json::from(decode::<Vec<i32>>(row, index, name)?),
                "INT8[]" => Json::from(decode::<Vec<i64>>(row, index, name)?),
                "TEXT[]" | "VARCHAR[]" => Json::from(decode::<Vec<String>>(row, index, name)?),
                "BOOL[]" => Json::from(decode::<Vec<bool>>(row, index, name)?),
                other => match raw.format() {
                    PgValueFormat::Text => Json::String(
                        raw.as_str()
                            .map_err(|e| Error::decode(name, e.to_string()))?
                            .to_string(),
                    ),
                    PgValueFormat::Binary => {
                        return Err(Error::decode(name, format!("unsupported type {other}")));
                    }
                },
            };
            out.insert(name.to_string(), value);
        }
        Ok(out)
    }

}
