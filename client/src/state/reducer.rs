//! The songs state, and the only function allowed to change it.

use songbook_types::{MetadataInfo, PaginationInfo, SongBrief};

use super::action::Action;

/// A snapshot of everything the client knows about the catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongsState {
    pub songs: Vec<SongBrief>,
    pub loading: bool,
    pub error: Option<String>,
    pub pagination: Option<PaginationInfo>,
    pub metadata: Option<MetadataInfo>,
}

impl SongsState {
    /// Apply `action` to the state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::FetchSongsRequest { .. } | Action::FetchMetadataRequest => {
                self.loading = true;
                self.error = None;
            }
            Action::CreateSongRequest(_)
            | Action::DeleteSongRequest(_)
            | Action::UpdateSongRequest { .. } => self.loading = true,

            Action::FetchSongsSuccess(page) => {
                self.loading = false;
                self.songs = page.songs;
                self.pagination = Some(page.pagination);
            }
            Action::CreateSongSuccess(song) => {
                self.loading = false;
                self.songs.push(song);
            }
            Action::DeleteSongSuccess(id) => {
                self.loading = false;
                self.songs.retain(|song| song.id != id);
            }
            Action::UpdateSongSuccess(updated) => {
                self.loading = false;
                if let Some(song) = self.songs.iter_mut().find(|song| song.id == updated.id) {
                    *song = updated;
                }
            }
            Action::FetchMetadataSuccess(metadata) => {
                self.loading = false;
                self.metadata = Some(metadata);
            }

            Action::FetchSongsFailure(message)
            | Action::CreateSongFailure(message)
            | Action::DeleteSongFailure(message)
            | Action::UpdateSongFailure(message)
            | Action::FetchMetadataFailure(message) => {
                self.loading = false;
                self.error = Some(message);
            }

            Action::ClearError => self.error = None,
        }
    }

    /// The page and limit of the last fetched page, `(1, 10)` before anything was fetched.
    #[must_use]
    pub fn current_page(&self) -> (u64, u64) {
        self.pagination
            .map_or((1, 10), |pagination| (pagination.page, pagination.limit))
    }
}
