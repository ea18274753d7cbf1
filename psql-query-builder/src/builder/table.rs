//! CREATE TABLE and DROP TABLE fragments

use super::PsqlQueryBuilder;
use crate::executor::Connection;
use crate::types::ColumnSpec;
use crate::Result;

impl<C: Connection> PsqlQueryBuilder<C> {
    /// `CREATE TABLE IF NOT EXISTS <table> ( <column definitions> )`
    ///
    /// Every column type is resolved before anything is appended, so a
    /// missing `n`/`p`/`s` leaves the statement untouched.
    ///
    /// # Examples
    /// ```ignore
    /// qb.create_table("products", [
    ///     ("id", ColumnSpec::new(ColumnType::Serial).primary_key(true)),
    ///     ("price", ColumnSpec::new(ColumnType::Decimal).p(10).s(2)),
    /// ])?
    /// .send()
    /// .await?;
    /// ```
    pub fn create_table<K, I>(&mut self, table: &str, columns: I) -> Result<&mut Self>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, ColumnSpec)>,
    {
        let definitions = columns
            .into_iter()
            .map(|(name, spec)| spec.definition(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let fragment = if definitions.is_empty() {
            format!("CREATE TABLE IF NOT EXISTS {table} ( )")
        } else {
            format!("CREATE TABLE IF NOT EXISTS {table} ( {} )", definitions.join(", "))
        };
        self.state.append(fragment);
        Ok(self)
    }

    /// `DROP TABLE IF EXISTS <table>`
    pub fn drop_table(&mut self, table: &str) -> &mut Self {
        self.state.append(format!("DROP TABLE IF EXISTS {table}"));
        self
    }
}
