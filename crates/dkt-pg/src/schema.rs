/// Schema metadata for PostgreSQL tables.
///
/// Provides compile-time SQL generation for table creation and indexing.
/// All methods return `&'static str` so implementations can build their
/// statements with [`const_format::concatcp!`].
///
/// # Design
///
/// This trait contains no I/O operations; it purely describes table
/// structure. Queries live in the repository implementations.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
    /// Bundles the three statements for [`crate::migrate`].
    fn ddl() -> (&'static str, &'static str, &'static str) {
        (Self::name(), Self::creates(), Self::indices())
    }
}
