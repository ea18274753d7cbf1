//! Fragment and argument accumulation

use std::fmt::{self, Display};

use crate::Value;

/// Core trait for anything that renders to a parameterized statement
pub trait QueryBuilder {
    /// Generate the SQL query string
    fn to_sql(&self) -> String;

    /// Get the parameters for the query
    fn parameters(&self) -> &[Value];
}

/// Ordered SQL fragments plus the values bound to their `$n` placeholders.
///
/// Append-only: fragments and args are never removed or reordered. The
/// placeholder handed out for a value is always the number of args pushed so
/// far, so numbering is global across every fragment of one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    fragments: Vec<String>,
    args: Vec<Value>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a fragment that binds no values
    pub fn append(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Push `values` as args, then build the fragment from their placeholders.
    ///
    /// `template` receives one `$n` token per value, in order.
    pub fn append_with_args<I, F>(&mut self, values: I, template: F)
    where
        I: IntoIterator<Item = Value>,
        F: FnOnce(&[String]) -> String,
    {
        let placeholders: Vec<String> = values
            .into_iter()
            .map(|value| {
                self.args.push(value);
                format!("${}", self.args.len())
            })
            .collect();

        self.fragments.push(template(&placeholders));
    }

    /// Push args verbatim, without handing out placeholders
    pub fn extend_args<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.args.extend(values);
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty() && self.args.is_empty()
    }

    /// Render the fragments joined by single spaces, plus a copy of the args
    pub fn render(&self) -> Statement {
        Statement {
            text: self.to_sql(),
            args: self.args.clone(),
        }
    }
}

impl QueryBuilder for QueryState {
    fn to_sql(&self) -> String {
        self.fragments.join(" ")
    }

    fn parameters(&self) -> &[Value] {
        &self.args
    }
}

/// A rendered statement: SQL text and its positional args
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub text: String,
    pub args: Vec<Value>,
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_renders_empty_statement() {
        let state = QueryState::new();
        assert!(state.is_empty());
        assert_eq!(state.render(), Statement::default());
        assert_eq!(state.to_sql(), "");
    }

    #[test]
    fn test_fragments_join_with_single_space() {
        let mut state = QueryState::new();
        state.append("SELECT *");
        state.append("FROM users");
        assert_eq!(state.to_sql(), "SELECT * FROM users");
        assert!(state.parameters().is_empty());
    }

    #[test]
    fn test_placeholders_follow_running_arg_count() {
        let mut state = QueryState::new();
        state.append_with_args([Value::I32(5)], |p| format!("WHERE id = {}", p[0]));
        state.append_with_args([Value::from("a"), Value::from("b")], |p| {
            format!("AND tag IN ( {} )", p.join(", "))
        });

        assert_eq!(state.to_sql(), "WHERE id = $1 AND tag IN ( $2, $3 )");
        assert_eq!(
            state.args(),
            &[Value::I32(5), Value::from("a"), Value::from("b")]
        );
    }

    #[test]
    fn test_extend_args_shifts_later_placeholders() {
        let mut state = QueryState::new();
        state.append("SELECT * FROM t WHERE a = $1 AND b = $2");
        state.extend_args([Value::I32(1), Value::I32(2)]);
        state.append_with_args([Value::I32(3)], |p| format!("AND c = {}", p[0]));

        assert_eq!(
            state.to_sql(),
            "SELECT * FROM t WHERE a = $1 AND b = $2 AND c = $3"
        );
        assert_eq!(state.args().len(), 3);
    }

    #[test]
    fn test_render_does_not_consume() {
        let mut state = QueryState::new();
        state.append_with_args([Value::Bool(true)], |p| format!("WHERE active = {}", p[0]));
        let first = state.render();
        let second = state.render();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "WHERE active = $1");
    }
}
