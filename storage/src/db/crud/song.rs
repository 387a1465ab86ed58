//! CRUD operations for the song table
use songbook_types::{FieldCount, NewSong, SongChangeSet, SongField};
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        queries::song::{count_songs_by_field, read_page, read_song_by_title, read_songs_by_field},
        schemas::song::{Song, SongId, TABLE_NAME},
    },
    errors::{Error, StorageResult},
};

/// One row of [`count_songs_by_field`].
#[derive(Debug, serde::Deserialize)]
struct FieldTotal {
    name: String,
    total: u64,
}

impl From<FieldTotal> for FieldCount {
    fn from(FieldTotal { name, total }: FieldTotal) -> Self {
        Self { name, count: total }
    }
}

impl Song {
    /// Create a new [`Song`], unless a song with the same title already exists.
    ///
    /// `song` is stored as given, callers are expected to have normalized it.
    ///
    /// The title check and the insert are two separate statements,
    /// so two concurrent creates with the same title can both succeed.
    ///
    /// # Errors
    ///
    /// * [`Error::AlreadyExists`] if a song with the same title is already stored
    /// * [`Error::NotCreated`] if the database did not hand back the created record
    #[instrument]
    pub async fn create<C: Connection>(db: &Surreal<C>, song: NewSong) -> StorageResult<Self> {
        if Self::read_by_title(db, song.title.clone()).await?.is_some() {
            return Err(Error::AlreadyExists(song.title));
        }

        let id = Self::generate_id();
        let created: Option<Self> = db
            .create((TABLE_NAME, id.id.to_raw()))
            .content(song)
            .await?;
        created.ok_or(Error::NotCreated(id))
    }

    /// Create every song in `songs` whose title is not taken yet,
    /// neither by a stored song nor by an earlier song of the same batch.
    ///
    /// Returns only the songs that were actually created, in input order.
    ///
    /// # Errors
    ///
    /// Fails on the first database error, songs created before that point are kept.
    #[instrument(skip(songs), fields(count = songs.len()))]
    pub async fn create_many<C: Connection>(
        db: &Surreal<C>,
        songs: Vec<NewSong>,
    ) -> StorageResult<Vec<Self>> {
        let mut created = Vec::with_capacity(songs.len());
        for song in songs {
            match Self::create(db, song).await {
                Ok(song) => created.push(song),
                Err(Error::AlreadyExists(title)) => {
                    log::debug!("Skipping \"{title}\", a song with that title already exists");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(created)
    }

    #[instrument]
    pub async fn read<C: Connection>(db: &Surreal<C>, id: SongId) -> StorageResult<Option<Self>> {
        Ok(db.select((TABLE_NAME, id.id.to_raw())).await?)
    }

    #[instrument]
    pub async fn read_by_title<C: Connection>(
        db: &Surreal<C>,
        title: String,
    ) -> StorageResult<Option<Self>> {
        Ok(db
            .query(read_song_by_title())
            .bind(("title", title))
            .await?
            .take(0)?)
    }

    /// Read `limit` songs, newest first, skipping the first `start`.
    #[instrument]
    pub async fn read_page<C: Connection>(
        db: &Surreal<C>,
        start: u64,
        limit: u64,
    ) -> StorageResult<Vec<Self>> {
        Ok(db
            .query(read_page())
            .bind(("start", start))
            .bind(("limit", limit))
            .await?
            .take(0)?)
    }

    /// Read every song whose `field` is exactly `value`, newest first.
    #[instrument]
    pub async fn read_by_field<C: Connection>(
        db: &Surreal<C>,
        field: SongField,
        value: String,
    ) -> StorageResult<Vec<Self>> {
        Ok(db
            .query(read_songs_by_field(field))
            .bind(("value", value))
            .await?
            .take(0)?)
    }

    /// Count the songs sharing each value of `field`, sorted by count, descending,
    /// then by name.
    #[instrument]
    pub async fn count_by_field<C: Connection>(
        db: &Surreal<C>,
        field: SongField,
    ) -> StorageResult<Vec<FieldCount>> {
        let rows: Vec<FieldTotal> = db.query(count_songs_by_field(field)).await?.take(0)?;
        let mut counts: Vec<FieldCount> = rows.into_iter().map(Into::into).collect();
        // GROUP BY hands rows back in key order, not by count
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        Ok(counts)
    }

    /// Merge `changes` into the song with the given id.
    ///
    /// Returns `None` if there is no such song, nothing is created in that case.
    #[instrument]
    pub async fn update<C: Connection>(
        db: &Surreal<C>,
        id: SongId,
        changes: SongChangeSet,
    ) -> StorageResult<Option<Self>> {
        Ok(db
            .update((TABLE_NAME, id.id.to_raw()))
            .merge(changes)
            .await?)
    }

    /// Delete the song with the given id, returning it if it existed.
    #[instrument]
    pub async fn delete<C: Connection>(
        db: &Surreal<C>,
        id: SongId,
    ) -> StorageResult<Option<Self>> {
        Ok(db.delete((TABLE_NAME, id.id.to_raw())).await?)
    }
}
