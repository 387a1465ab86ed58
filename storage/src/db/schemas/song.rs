#![allow(clippy::module_name_repetitions)]
//--------------------------------------------------------------------------------- other libraries
use serde::{Deserialize, Serialize};
use songbook_types::SongBrief;
use surrealdb::sql::{Datetime, Id, Thing};
use ulid::Ulid;
//----------------------------------------------------------------------------------- local modules
use super::Table;
use crate::errors::{Error, StorageResult};

pub type SongId = Thing;

pub const TABLE_NAME: &str = "song";

/// A song as it is stored in the database.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Song {
    /// The unique identifier for this [`Song`].
    pub id: SongId,
    /// Title of the [`Song`], unique across the catalog.
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    /// Set by the database when the record is created.
    pub created_at: Datetime,
    /// Refreshed by the database on every write.
    pub updated_at: Datetime,
}

impl Table for Song {
    const TABLE_NAME: &'static str = TABLE_NAME;
    const TABLE_SCHEMA_QUERY: &'static str = "
DEFINE TABLE IF NOT EXISTS song SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS title ON song TYPE string;
DEFINE FIELD IF NOT EXISTS artist ON song TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS album ON song TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS genre ON song TYPE string DEFAULT '';
DEFINE FIELD IF NOT EXISTS created_at ON song TYPE datetime DEFAULT time::now() READONLY;
DEFINE FIELD IF NOT EXISTS updated_at ON song TYPE datetime VALUE time::now();
DEFINE INDEX IF NOT EXISTS song_title_index ON song FIELDS title;
DEFINE INDEX IF NOT EXISTS song_created_at_index ON song FIELDS created_at;
";
}

impl Song {
    #[must_use]
    pub fn generate_id() -> SongId {
        Thing::from((TABLE_NAME, Id::ulid()))
    }

    /// The opaque key of this song, as handed out to clients.
    #[must_use]
    pub fn key(&self) -> String {
        self.id.id.to_raw()
    }
}

/// Parse a client supplied id into a [`SongId`].
///
/// Accepts the bare key (a ULID) as well as the fully qualified `song:<key>` form.
///
/// # Errors
///
/// Returns [`Error::InvalidId`] if the key is not a ULID, or if the id names another table.
pub fn parse_song_id(raw: &str) -> StorageResult<SongId> {
    let raw = raw.trim();
    let key = match raw.split_once(':') {
        Some((TABLE_NAME, key)) => key,
        Some(_) => return Err(Error::InvalidId(raw.to_owned())),
        None => raw,
    };

    let ulid = Ulid::from_string(key).map_err(|_| Error::InvalidId(raw.to_owned()))?;

    Ok(Thing::from((TABLE_NAME, Id::String(ulid.to_string()))))
}

impl From<Song> for SongBrief {
    fn from(song: Song) -> Self {
        Self {
            id: song.key(),
            title: song.title,
            artist: song.artist,
            album: song.album,
            genre: song.genre,
            created_at: song.created_at.0,
            updated_at: song.updated_at.0,
        }
    }
}
