use thiserror::Error;

use crate::db::schemas::song::SongId;

pub type StorageResult<T> = Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SurrealDB error: {0}")]
    DbError(#[from] surrealdb::Error),
    #[error("Item not found.")]
    NotFound,
    #[error("Malformed record id: {0}")]
    InvalidId(String),
    #[error("A song titled \"{0}\" already exists.")]
    AlreadyExists(String),
    #[error("Song {0} was not created.")]
    NotCreated(SongId),
}
