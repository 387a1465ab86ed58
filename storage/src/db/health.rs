//! Aggregate counts over the catalog, used by the metadata endpoint.

use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        queries::generic::Count,
        schemas::{Table, song::Song},
    },
    errors::Error,
};

/// Count the number of songs in the database
///
/// # Errors
///
/// see [`Count::count`]
#[instrument]
pub async fn count_songs<C: Connection>(db: &Surreal<C>) -> Result<u64, Error> {
    Count::count(db, Song::TABLE_NAME).await
}

/// Count the number of distinct artists the songs in the database are by
///
/// # Errors
///
/// see [`Count::count_distinct`]
#[instrument]
pub async fn count_unique_artists<C: Connection>(db: &Surreal<C>) -> Result<u64, Error> {
    Count::count_distinct(db, Song::TABLE_NAME, "artist").await
}

/// Count the number of distinct albums the songs in the database are on
///
/// # Errors
///
/// see [`Count::count_distinct`]
#[instrument]
pub async fn count_unique_albums<C: Connection>(db: &Surreal<C>) -> Result<u64, Error> {
    Count::count_distinct(db, Song::TABLE_NAME, "album").await
}
