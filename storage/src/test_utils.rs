use std::ops::RangeInclusive;

use anyhow::Result;
use rand::{Rng, seq::SliceRandom};
use songbook_types::NewSong;
use surrealdb::{Surreal, engine::any::Any};

use crate::db::{init_database, schemas::song::Song};

const ARTISTS: &[&str] = &["Adele", "Muse", "Radiohead", "Billie Eilish", "Daft Punk"];
const ALBUMS: &[&str] = &["25", "Drones", "OK Computer", "Discovery", ""];
const GENRES: &[&str] = &["Pop", "Rock", "Electronic", "Alternative", ""];

/// Initialize a fresh in-memory database with the catalog schema registered.
///
/// # Errors
///
/// Fails if the in-memory engine cannot be started.
pub async fn init_test_database() -> Result<Surreal<Any>> {
    Ok(init_database("mem://", "test", "test").await?)
}

/// Store `song` as is and return the created record.
///
/// # Errors
///
/// Fails if the song cannot be created, e.g. because its title is already taken.
pub async fn create_song(db: &Surreal<Any>, song: NewSong) -> Result<Song> {
    Ok(Song::create(db, song).await?)
}

/// A normalized [`NewSong`] with a title that is unique across calls.
#[must_use]
pub fn arb_new_song() -> NewSong {
    let rng = &mut rand::thread_rng();
    let pick = |options: &[&str], rng: &mut rand::rngs::ThreadRng| {
        options.choose(rng).copied().unwrap_or_default().to_owned()
    };

    NewSong {
        title: format!("Song {}", ulid::Ulid::new()),
        artist: pick(ARTISTS, rng),
        album: pick(ALBUMS, rng),
        genre: pick(GENRES, rng),
    }
}

/// Between `range.start()` and `range.end()` arbitrary songs, see [`arb_new_song`].
#[must_use]
pub fn arb_new_songs(range: RangeInclusive<usize>) -> Vec<NewSong> {
    let count = rand::thread_rng().gen_range(range);
    (0..count).map(|_| arb_new_song()).collect()
}
