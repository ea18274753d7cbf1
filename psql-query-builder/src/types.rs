//! Column type resolution and column definitions for `CREATE TABLE`

use std::fmt::{self, Display};

use crate::{Error, Result};

/// Numeric fill-ins for templated types such as `VARCHAR(n)` or `DECIMAL(p,s)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeParams {
    /// Length, for `CHAR(n)`, `VARCHAR(n)`, `BIT(n)`, ...
    pub n: Option<u32>,
    /// Precision
    pub p: Option<u32>,
    /// Scale
    pub s: Option<u32>,
}

/// Resolve a type token into its literal SQL rendering.
///
/// Every `n`, `p` or `s` between the first `(` and the following `)` is
/// replaced by the matching number; text outside the parentheses is kept
/// as is. A letter that appears without a value is an error naming that
/// letter; letters are checked in the order `n`, `p`, `s`. Tokens without
/// a parenthesized segment are returned unchanged.
///
/// # Examples
/// ```
/// use psql_query_builder::{resolve_type, TypeParams};
///
/// let params = TypeParams { p: Some(10), s: Some(2), ..Default::default() };
/// assert_eq!(resolve_type("DECIMAL(p, s)", params).unwrap(), "DECIMAL(10, 2)");
/// assert_eq!(resolve_type("TEXT", TypeParams::default()).unwrap(), "TEXT");
/// ```
pub fn resolve_type(token: &str, params: TypeParams) -> Result<String> {
    let Some((name, rest)) = token.split_once('(') else {
        return Ok(token.to_string());
    };
    let (arguments, suffix) = match rest.split_once(')') {
        Some((arguments, suffix)) => (arguments, Some(suffix)),
        None => (rest, None),
    };

    let mut arguments = arguments.to_string();
    for (letter, value) in [('n', params.n), ('p', params.p), ('s', params.s)] {
        if !arguments.contains(letter) {
            continue;
        }
        let value = value.ok_or_else(|| Error::missing_type_parameter(letter, token))?;
        arguments = arguments.replace(letter, &value.to_string());
    }

    Ok(match suffix {
        Some(suffix) => format!("{name}({arguments}){suffix}"),
        None => format!("{name}({arguments}"),
    })
}

/// PostgreSQL column types with their templated forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    BigInt,
    BigSerial,
    Bit,
    VarBit,
    Bool,
    Char,
    VarChar,
    Date,
    Float8,
    Int,
    Money,
    Decimal,
    Float4,
    SmallInt,
    SmallSerial,
    Serial,
    Text,
    Time,
    TimeTz,
    Timestamp,
    TimestampTz,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::BigInt => "BIGINT",
            ColumnType::BigSerial => "BIGSERIAL",
            ColumnType::Bit => "BIT(n)",
            ColumnType::VarBit => "VARBIT(n)",
            ColumnType::Bool => "BOOL",
            ColumnType::Char => "CHAR(n)",
            ColumnType::VarChar => "VARCHAR(n)",
            ColumnType::Date => "DATE",
            ColumnType::Float8 => "FLOAT8",
            ColumnType::Int => "INT",
            ColumnType::Money => "MONEY",
            ColumnType::Decimal => "DECIMAL(p, s)",
            ColumnType::Float4 => "FLOAT4",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::SmallSerial => "SMALLSERIAL",
            ColumnType::Serial => "SERIAL",
            ColumnType::Text => "TEXT",
            ColumnType::Time => "TIME",
            ColumnType::TimeTz => "TIMETZ",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::TimestampTz => "TIMESTAMPTZ",
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ColumnType> for String {
    fn from(ty: ColumnType) -> Self {
        ty.as_str().to_string()
    }
}

/// `ON DELETE` action of a foreign key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    SetNull,
    Cascade,
}

impl Display for OnDelete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnDelete::SetNull => write!(f, "SET NULL"),
            OnDelete::Cascade => write!(f, "CASCADE"),
        }
    }
}

/// A column-level `REFERENCES` constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub column: String,
    pub on_delete: Option<OnDelete>,
}

impl ForeignKey {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            on_delete: None,
        }
    }

    pub fn on_delete(mut self, action: OnDelete) -> Self {
        self.on_delete = Some(action);
        self
    }
}

impl Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {} ( {} )", self.table, self.column)?;
        if let Some(action) = self.on_delete {
            write!(f, " ON DELETE {action}")?;
        }
        Ok(())
    }
}

/// Declarative description of one column
///
/// # Examples
/// ```
/// use psql_query_builder::{ColumnSpec, ColumnType};
///
/// let name = ColumnSpec::new(ColumnType::VarChar).n(50).nullable(true);
/// assert_eq!(name.definition("name").unwrap(), "name VARCHAR(50)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub column_type: String,
    pub default_value: Option<String>,
    pub nullable: bool,
    pub primary_key: bool,
    pub references: Option<ForeignKey>,
    pub params: TypeParams,
}

impl ColumnSpec {
    pub fn new(column_type: impl Into<String>) -> Self {
        Self {
            column_type: column_type.into(),
            default_value: None,
            nullable: false,
            primary_key: false,
            references: None,
            params: TypeParams::default(),
        }
    }

    /// Default expression, rendered verbatim after `DEFAULT`
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    pub fn references(mut self, foreign_key: ForeignKey) -> Self {
        self.references = Some(foreign_key);
        self
    }

    pub fn n(mut self, n: u32) -> Self {
        self.params.n = Some(n);
        self
    }

    pub fn p(mut self, p: u32) -> Self {
        self.params.p = Some(p);
        self
    }

    pub fn s(mut self, s: u32) -> Self {
        self.params.s = Some(s);
        self
    }

    /// Render `<name> <type> [NOT NULL] [DEFAULT v] [PRIMARY KEY] [REFERENCES ...]`
    pub fn definition(&self, name: &str) -> Result<String> {
        let mut parts = vec![
            name.to_string(),
            resolve_type(&self.column_type, self.params)?,
        ];

        if !self.nullable {
            parts.push("NOT NULL".to_string());
        }
        if let Some(default) = &self.default_value {
            parts.push(format!("DEFAULT {default}"));
        }
        if self.primary_key {
            parts.push("PRIMARY KEY".to_string());
        }
        if let Some(foreign_key) = &self.references {
            parts.push(foreign_key.to_string());
        }

        Ok(parts.join(" "))
    }
}

impl From<ColumnType> for ColumnSpec {
    fn from(ty: ColumnType) -> Self {
        ColumnSpec::new(ty)
    }
}
