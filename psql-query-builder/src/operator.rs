//! Comparison operators accepted by `WHERE`, `AND` and `OR` clauses

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::Error;

/// The closed set of comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Gt,
    Lt,
    Eq,
    Lte,
    Gte,
    Neq,
    /// `<>`, the standard spelling of `!=`
    NotEqual,
    And,
    Or,
    In,
    NotIn,
    Between,
    NotBetween,
    Like,
    NotLike,
    ILike,
    NotILike,
    IsNull,
    IsNotNull,
}

impl Operator {
    pub const ALL: [Operator; 19] = [
        Operator::Gt,
        Operator::Lt,
        Operator::Eq,
        Operator::Lte,
        Operator::Gte,
        Operator::Neq,
        Operator::NotEqual,
        Operator::And,
        Operator::Or,
        Operator::In,
        Operator::NotIn,
        Operator::Between,
        Operator::NotBetween,
        Operator::Like,
        Operator::NotLike,
        Operator::ILike,
        Operator::NotILike,
        Operator::IsNull,
        Operator::IsNotNull,
    ];

    /// Get the SQL representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Eq => "=",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
            Operator::Neq => "!=",
            Operator::NotEqual => "<>",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::ILike => "ILIKE",
            Operator::NotILike => "NOT ILIKE",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// Operators that take no right-hand operand
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| Error::invalid_operator(s))
    }
}

/// Trait for types that can be converted to SQL operators
pub trait IntoOperator {
    fn into_operator(self) -> Operator;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> Operator {
        self
    }
}

/// Allow string literals for the supported operators.
///
/// # Panics
///
/// Panics on strings outside the supported set. Use [`Operator::from_str`]
/// to handle untrusted input.
impl IntoOperator for &str {
    fn into_operator(self) -> Operator {
        match self.parse() {
            Ok(op) => op,
            Err(_) => panic!(
                "Unknown operator '{}'. Use the Operator variants or `str::parse::<Operator>()` for fallible parsing.",
                self
            ),
        }
    }
}

/// Convenience module for operator constants
pub mod op {
    use super::Operator;

    pub const GT: Operator = Operator::Gt;
    pub const LT: Operator = Operator::Lt;
    pub const EQ: Operator = Operator::Eq;
    pub const NEQ: Operator = Operator::Neq;
    pub const NOT_EQUAL: Operator = Operator::NotEqual;
    pub const GTE: Operator = Operator::Gte;
    pub const LTE: Operator = Operator::Lte;
    pub const AND: Operator = Operator::And;
    pub const OR: Operator = Operator::Or;
    pub const IN: Operator = Operator::In;
    pub const NOT_IN: Operator = Operator::NotIn;
    pub const BETWEEN: Operator = Operator::Between;
    pub const NOT_BETWEEN: Operator = Operator::NotBetween;
    pub const LIKE: Operator = Operator::Like;
    pub const NOT_LIKE: Operator = Operator::NotLike;
    pub const ILIKE: Operator = Operator::ILike;
    pub const NOT_ILIKE: Operator = Operator::NotILike;
    pub const IS_NULL: Operator = Operator::IsNull;
    pub const IS_NOT_NULL: Operator = Operator::IsNotNull;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_strings() {
        assert_eq!(Operator::Gt.as_str(), ">");
        assert_eq!(Operator::NotEqual.as_str(), "<>");
        assert_eq!(Operator::NotBetween.as_str(), "NOT BETWEEN");
        assert_eq!(Operator::IsNull.as_str(), "IS NULL");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", op::GTE), ">=");
        assert_eq!(format!("{}", op::NOT_LIKE), "NOT LIKE");
    }

    #[test]
    fn test_parse_round_trips_every_operator() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_parse_is_case_and_space_insensitive() {
        assert_eq!("like".parse::<Operator>().unwrap(), Operator::Like);
        assert_eq!("not  in".parse::<Operator>().unwrap(), Operator::NotIn);
        assert_eq!("is not null".parse::<Operator>().unwrap(), Operator::IsNotNull);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "@@".parse::<Operator>().unwrap_err();
        assert!(matches!(err, Error::InvalidOperator(ref s) if s == "@@"));
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(">".into_operator(), Operator::Gt);
        assert_eq!("=".into_operator(), Operator::Eq);
        assert_eq!("NOT BETWEEN".into_operator(), Operator::NotBetween);
    }

    #[test]
    #[should_panic(expected = "Unknown operator 'INVALID'")]
    fn test_invalid_string_conversion() {
        "INVALID".into_operator();
    }

    #[test]
    fn test_unary_operators() {
        assert!(Operator::IsNull.is_unary());
        assert!(Operator::IsNotNull.is_unary());
        assert!(!Operator::Eq.is_unary());
        assert!(!Operator::In.is_unary());
    }
}
