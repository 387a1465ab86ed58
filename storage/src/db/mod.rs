pub mod crud;
pub mod health;
pub mod queries;
pub mod schemas;

use log::info;
use surrealdb::{
    Connection, Surreal,
    engine::any::{Any, connect},
};

use schemas::{Table, song::Song};

/// Connect to the database at `url` and make sure every table is defined.
///
/// `url` is anything `surrealdb::engine::any` understands, e.g. `mem://` or `surrealkv://<path>`.
///
/// # Errors
///
/// This function will return an error if the connection cannot be established,
/// or if the namespace, database, or tables cannot be selected / defined.
pub async fn init_database(
    url: &str,
    namespace: &str,
    database: &str,
) -> surrealdb::Result<Surreal<Any>> {
    let db = connect(url).await?;

    db.use_ns(namespace).use_db(database).await?;

    register_tables(&db).await?;

    info!("Connected to catalog database at {url} ({namespace}/{database})");

    Ok(db)
}

/// Define the tables, fields, and indexes the catalog relies on.
///
/// # Errors
///
/// Fails if the schema definition query cannot be executed.
pub async fn register_tables<C: Connection>(db: &Surreal<C>) -> surrealdb::Result<()> {
    Song::init_table(db).await
}
