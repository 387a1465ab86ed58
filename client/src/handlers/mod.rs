pub mod printing;
pub mod utils;

use std::fmt::Write;

use clap::Subcommand;

use songbook_client::state::{Intent, Store};
use songbook_types::{NewSong, SongChangeSet};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a page of songs, newest first
    List {
        /// The page to show, starting at 1
        #[clap(long, default_value_t = 1)]
        page: u64,
        /// How many songs per page (e.g. 5, 10, 20, 50), defaults to the configured page size
        #[clap(long)]
        limit: Option<u64>,
    },
    /// Add a song to the catalog
    Add {
        #[clap(long)]
        title: String,
        #[clap(long, default_value = "")]
        artist: String,
        #[clap(long, default_value = "")]
        album: String,
        #[clap(long, default_value = "")]
        genre: String,
    },
    /// Change some fields of a song
    Edit {
        /// The id of the song
        id: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        artist: Option<String>,
        #[clap(long)]
        album: Option<String>,
        #[clap(long)]
        genre: Option<String>,
    },
    /// Remove a song from the catalog
    #[clap(alias = "remove")]
    Rm {
        /// The id of the song
        id: String,
    },
    /// Show how many songs, artists, and albums are in the catalog
    Stats,
}

impl Command {
    /// Dispatch the intent(s) of this command, wait for the store to settle, and print the result.
    ///
    /// # Errors
    ///
    /// Fails with the store's error message if the last operation failed, or if writing the
    /// output fails.
    pub async fn handle<W1: Write + Send, W2: Write + Send>(
        &self,
        store: &Store,
        page_size: u64,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> anyhow::Result<()> {
        match self {
            Self::List { page, limit } => {
                run(
                    store,
                    Intent::FetchSongs {
                        page: *page,
                        limit: limit.unwrap_or(page_size),
                    },
                )
                .await?;
                write!(stdout, "{}", printing::song_page(&store.state())?)?;
            }
            Self::Add {
                title,
                artist,
                album,
                genre,
            } => {
                // start from the first page, the new song is the newest one
                run(store, Intent::FetchSongs { page: 1, limit: page_size }).await?;
                run(
                    store,
                    Intent::CreateSong(NewSong::new(title, artist, album, genre)),
                )
                .await?;
                print_page_and_metadata(store, stdout)?;
            }
            Self::Edit {
                id,
                title,
                artist,
                album,
                genre,
            } => {
                let changes = SongChangeSet {
                    title: title.clone(),
                    artist: artist.clone(),
                    album: album.clone(),
                    genre: genre.clone(),
                };
                if changes.is_empty() {
                    writeln!(
                        stderr,
                        "Nothing to change, pass at least one of --title, --artist, --album, --genre"
                    )?;
                    return Ok(());
                }

                run(
                    store,
                    Intent::UpdateSong {
                        id: id.clone(),
                        changes,
                    },
                )
                .await?;
                writeln!(stdout, "Updated song {id}")?;
            }
            Self::Rm { id } => {
                run(store, Intent::FetchSongs { page: 1, limit: page_size }).await?;
                run(store, Intent::DeleteSong(id.clone())).await?;
                writeln!(stdout, "Removed song {id}")?;
                print_page_and_metadata(store, stdout)?;
            }
            Self::Stats => {
                run(store, Intent::FetchMetadata).await?;
                if let Some(metadata) = store.state().metadata {
                    write!(stdout, "{}", printing::metadata(&metadata)?)?;
                }
            }
        }

        Ok(())
    }
}

/// Dispatch `intent` and wait until it (and everything it triggered) is reflected in the state.
async fn run(store: &Store, intent: Intent) -> anyhow::Result<()> {
    store.dispatch(intent);
    store.wait_idle().await;

    match store.state().error {
        Some(error) => Err(anyhow::anyhow!(error)),
        None => Ok(()),
    }
}

fn print_page_and_metadata<W: Write>(store: &Store, stdout: &mut W) -> anyhow::Result<()> {
    let state = store.state();
    write!(stdout, "{}", printing::song_page(&state)?)?;
    if let Some(metadata) = state.metadata {
        write!(stdout, "{}", printing::metadata(&metadata)?)?;
    }
    Ok(())
}
