use songbook_storage::db::{
    health::{count_songs, count_unique_albums, count_unique_artists},
    schemas::song::Song,
};
use songbook_types::{FieldCount, MetadataInfo, SongField};
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::errors::ApiError;

/// Total songs, distinct artists and distinct albums.
///
/// The three counts are read concurrently and are not a consistent snapshot.
///
/// # Errors
///
/// Fails if any of the counts fails.
#[instrument]
pub async fn metadata<C: Connection>(db: &Surreal<C>) -> Result<MetadataInfo, ApiError> {
    let (total_songs, unique_artists, unique_albums) = tokio::try_join!(
        count_songs(db),
        count_unique_artists(db),
        count_unique_albums(db),
    )?;

    Ok(MetadataInfo {
        total_songs,
        unique_artists,
        unique_albums,
    })
}

/// How many songs share each value of `field`, most common first.
///
/// # Errors
///
/// Fails if the store fails.
#[instrument]
pub async fn stats_by<C: Connection>(
    db: &Surreal<C>,
    field: SongField,
) -> Result<Vec<FieldCount>, ApiError> {
    Ok(Song::count_by_field(db, field).await?)
}
