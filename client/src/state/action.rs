//! The things that can happen to the songs state.
//!
//! An [`Intent`] is what a caller asks for, the store turns each one into a `*Request` [`Action`]
//! and an effect that eventually dispatches the matching `*Success` or `*Failure`.
#![allow(clippy::module_name_repetitions)]

use songbook_types::{MetadataInfo, NewSong, SongBrief, SongChangeSet};

use crate::api::SongPage;

/// Something a caller wants done against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    FetchSongs { page: u64, limit: u64 },
    CreateSong(NewSong),
    DeleteSong(String),
    UpdateSong { id: String, changes: SongChangeSet },
    FetchMetadata,
}

impl Intent {
    /// The action recorded when this intent starts.
    #[must_use]
    pub fn request(&self) -> Action {
        match self {
            Self::FetchSongs { page, limit } => Action::FetchSongsRequest {
                page: *page,
                limit: *limit,
            },
            Self::CreateSong(song) => Action::CreateSongRequest(song.clone()),
            Self::DeleteSong(id) => Action::DeleteSongRequest(id.clone()),
            Self::UpdateSong { id, changes } => Action::UpdateSongRequest {
                id: id.clone(),
                changes: changes.clone(),
            },
            Self::FetchMetadata => Action::FetchMetadataRequest,
        }
    }
}

/// A named transition of the songs state, see [`super::SongsState::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchSongsRequest { page: u64, limit: u64 },
    FetchSongsSuccess(SongPage),
    FetchSongsFailure(String),

    CreateSongRequest(NewSong),
    CreateSongSuccess(SongBrief),
    CreateSongFailure(String),

    DeleteSongRequest(String),
    /// carries the id of the deleted song
    DeleteSongSuccess(String),
    DeleteSongFailure(String),

    UpdateSongRequest { id: String, changes: SongChangeSet },
    UpdateSongSuccess(SongBrief),
    UpdateSongFailure(String),

    FetchMetadataRequest,
    FetchMetadataSuccess(MetadataInfo),
    FetchMetadataFailure(String),

    ClearError,
}
