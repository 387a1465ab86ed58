//! utilities used for testing the client without a running catalog

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use chrono::{DateTime, Utc};
use songbook_types::{MetadataInfo, NewSong, PaginationInfo, SongBrief, SongChangeSet};

use crate::api::{ApiError, ApiResult, CatalogApi, SongPage};

/// A song with fixed timestamps, and placeholder artist, album, and genre.
pub fn song(id: &str, title: &str) -> SongBrief {
    let timestamp = DateTime::<Utc>::UNIX_EPOCH;
    SongBrief {
        id: id.into(),
        title: title.into(),
        artist: "Artist".into(),
        album: "Album".into(),
        genre: "Genre".into(),
        created_at: timestamp,
        updated_at: timestamp,
    }
}

pub fn new_song(title: &str) -> NewSong {
    NewSong::new(title, "Artist", "Album", "Genre")
}

fn status(status: u16, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: message.into(),
    }
}

/// An in memory [`CatalogApi`] that records every call it gets.
///
/// Songs are listed newest first, like the real catalog.
#[derive(Default)]
pub struct MockCatalog {
    songs: Mutex<Vec<SongBrief>>,
    calls: Mutex<Vec<String>>,
    delete_delays: HashMap<String, Duration>,
    fail_list: bool,
    next_id: Mutex<usize>,
}

impl MockCatalog {
    /// `songs` are given oldest first.
    pub fn with_songs(songs: Vec<SongBrief>) -> Self {
        Self {
            songs: Mutex::new(songs),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_delete_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delete_delays.insert(id.into(), delay);
        self
    }

    #[must_use]
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl CatalogApi for MockCatalog {
    async fn list(&self, page: u64, limit: u64) -> ApiResult<SongPage> {
        self.record(format!("list {page} {limit}"));
        if self.fail_list {
            return Err(status(500, "INTERNAL_ERROR"));
        }

        let songs = self.songs.lock().unwrap();
        let pagination = PaginationInfo::new(page, limit, songs.len() as u64);
        let songs = songs
            .iter()
            .rev()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect();

        Ok(SongPage { songs, pagination })
    }

    async fn create(&self, new: NewSong) -> ApiResult<SongBrief> {
        self.record(format!("create {}", new.title));
        let mut songs = self.songs.lock().unwrap();
        if songs.iter().any(|s| s.title == new.title) {
            return Err(status(409, "ALREADY_EXISTS"));
        }

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = SongBrief {
            id: format!("new-{next_id}"),
            title: new.title,
            artist: new.artist,
            album: new.album,
            genre: new.genre,
            ..song("", "")
        };
        songs.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: String) -> ApiResult<()> {
        self.record(format!("delete {id}"));
        if let Some(delay) = self.delete_delays.get(&id) {
            tokio::time::sleep(*delay).await;
        }

        let mut songs = self.songs.lock().unwrap();
        let before = songs.len();
        songs.retain(|s| s.id != id);
        if songs.len() == before {
            return Err(status(404, "NOT_FOUND"));
        }
        Ok(())
    }

    async fn update(&self, id: String, changes: SongChangeSet) -> ApiResult<SongBrief> {
        self.record(format!("update {id}"));
        let mut songs = self.songs.lock().unwrap();
        let song = songs
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| status(404, "NOT_FOUND"))?;

        if let Some(title) = changes.title {
            song.title = title;
        }
        if let Some(artist) = changes.artist {
            song.artist = artist;
        }
        if let Some(album) = changes.album {
            song.album = album;
        }
        if let Some(genre) = changes.genre {
            song.genre = genre;
        }
        Ok(song.clone())
    }

    async fn metadata(&self) -> ApiResult<MetadataInfo> {
        self.record("metadata".into());
        let songs = self.songs.lock().unwrap();
        Ok(MetadataInfo {
            total_songs: songs.len() as u64,
            unique_artists: songs.iter().map(|s| &s.artist).collect::<HashSet<_>>().len() as u64,
            unique_albums: songs.iter().map(|s| &s.album).collect::<HashSet<_>>().len() as u64,
        })
    }
}
