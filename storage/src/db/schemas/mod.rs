pub mod song;

use surrealdb::{Connection, Result, Surreal};

/// A table the catalog stores records in.
pub trait Table {
    const TABLE_NAME: &'static str;
    /// `DEFINE` statements for the table, its fields, and its indexes.
    ///
    /// Must be safe to run against a database where the table already exists.
    const TABLE_SCHEMA_QUERY: &'static str;

    fn init_table<C: Connection>(
        db: &Surreal<C>,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        async {
            db.query(Self::TABLE_SCHEMA_QUERY).await?.check()?;
            Ok(())
        }
    }
}
