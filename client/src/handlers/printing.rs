//! Turns the songs state into something a human can read.

use std::fmt::Write;

use songbook_client::state::SongsState;
use songbook_types::{MetadataInfo, SongBrief};

pub fn song_page(state: &SongsState) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    match state.pagination {
        Some(pagination) => writeln!(
            output,
            "Songs (page {}/{}, {} total):",
            pagination.page,
            pagination.total_pages.max(1),
            pagination.total
        )?,
        None => writeln!(output, "Songs:")?,
    }

    if state.songs.is_empty() {
        writeln!(output, "\tno songs")?;
    }
    for song in &state.songs {
        writeln!(output, "\t{}", song_line(song))?;
    }

    Ok(output)
}

pub fn song_line(song: &SongBrief) -> String {
    format!("{}: {song}", song.id)
}

pub fn metadata(metadata: &MetadataInfo) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output, "Catalog:")?;
    writeln!(output, "\tSongs: {}", metadata.total_songs)?;
    writeln!(output, "\tArtists: {}", metadata.unique_artists)?;
    writeln!(output, "\tAlbums: {}", metadata.unique_albums)?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use songbook_types::PaginationInfo;

    fn song(id: &str, title: &str) -> SongBrief {
        SongBrief {
            id: id.into(),
            title: title.into(),
            artist: "Nina Simone".into(),
            album: "Pastel Blues".into(),
            genre: "Jazz".into(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_song_page() {
        let state = SongsState {
            songs: vec![song("01A", "Sinnerman"), song("01B", "Trouble in Mind")],
            pagination: Some(PaginationInfo::new(1, 2, 3)),
            ..Default::default()
        };

        assert_eq!(
            song_page(&state).unwrap(),
            "Songs (page 1/2, 3 total):\n\
             \t01A: Sinnerman - Nina Simone (Pastel Blues, Jazz)\n\
             \t01B: Trouble in Mind - Nina Simone (Pastel Blues, Jazz)\n"
        );
    }

    #[test]
    fn test_empty_song_page() {
        let state = SongsState {
            pagination: Some(PaginationInfo::new(1, 10, 0)),
            ..Default::default()
        };

        assert_eq!(
            song_page(&state).unwrap(),
            "Songs (page 1/1, 0 total):\n\tno songs\n"
        );
        assert_eq!(
            song_page(&SongsState::default()).unwrap(),
            "Songs:\n\tno songs\n"
        );
    }

    #[test]
    fn test_metadata() {
        let info = MetadataInfo {
            total_songs: 3,
            unique_artists: 1,
            unique_albums: 2,
        };

        assert_eq!(
            metadata(&info).unwrap(),
            "Catalog:\n\tSongs: 3\n\tArtists: 1\n\tAlbums: 2\n"
        );
    }
}
