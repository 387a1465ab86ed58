use log::debug;
use songbook_storage::db::{
    health::count_songs,
    schemas::song::{Song, parse_song_id},
};
use songbook_types::{NewSong, PaginationInfo, SongBrief, SongChangeSet, SongField};
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::errors::ApiError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;
/// `i64::MAX`, the largest `START` the store accepts.
const MAX_OFFSET: u64 = u64::MAX >> 1;

/// Which page of the catalog to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from raw query parameters.
    ///
    /// Missing or unparseable values fall back to the defaults,
    /// `page` is clamped to at least 1 and `limit` to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>, default: u64| {
            raw.and_then(|s| s.trim().parse::<i64>().ok())
                .map_or(default, |n| u64::try_from(n).unwrap_or(0))
        };

        Self {
            page: parse(page, DEFAULT_PAGE).max(1),
            limit: parse(limit, DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    /// How many songs precede the requested page, capped to what the store can bind.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        let offset = self.page.saturating_sub(1).saturating_mul(self.limit);
        if offset > MAX_OFFSET { MAX_OFFSET } else { offset }
    }
}

/// Read one page of songs, newest first.
///
/// The page and the total count are read concurrently,
/// so the pagination info may be off by the songs written in between.
///
/// # Errors
///
/// Fails if the store fails.
#[instrument]
pub async fn list<C: Connection>(
    db: &Surreal<C>,
    request: PageRequest,
) -> Result<(Vec<SongBrief>, PaginationInfo), ApiError> {
    let (songs, total) = tokio::try_join!(
        Song::read_page(db, request.offset(), request.limit),
        count_songs(db),
    )?;

    Ok((
        songs.into_iter().map(Into::into).collect(),
        PaginationInfo::new(request.page, request.limit, total),
    ))
}

/// # Errors
///
/// [`ApiError::InvalidId`] if `id` is malformed, [`ApiError::NotFound`] if there is no such song.
#[instrument]
pub async fn get<C: Connection>(db: &Surreal<C>, id: &str) -> Result<SongBrief, ApiError> {
    let id = parse_song_id(id)?;
    Song::read(db, id)
        .await?
        .map(Into::into)
        .ok_or(ApiError::NotFound)
}

/// Normalize and store a new song.
///
/// # Errors
///
/// [`ApiError::Validation`] if the title is blank,
/// [`ApiError::Conflict`] if the title is taken.
#[instrument]
pub async fn create<C: Connection>(db: &Surreal<C>, song: NewSong) -> Result<SongBrief, ApiError> {
    let song = song.normalize()?;
    Ok(Song::create(db, song).await?.into())
}

/// Store every song of the batch whose title is not taken yet.
///
/// Songs with a blank title and duplicates are dropped without failing the batch.
///
/// # Errors
///
/// Fails if the store fails.
#[instrument(skip(songs), fields(count = songs.len()))]
pub async fn create_many<C: Connection>(
    db: &Surreal<C>,
    songs: Vec<NewSong>,
) -> Result<Vec<SongBrief>, ApiError> {
    let songs = songs
        .into_iter()
        .filter_map(|song| {
            song.normalize()
                .inspect_err(|e| debug!("Dropping song from batch: {e}"))
                .ok()
        })
        .collect();

    Ok(Song::create_many(db, songs)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Merge the given fields into a song. Title uniqueness is not re-checked.
///
/// # Errors
///
/// [`ApiError::InvalidId`], [`ApiError::NotFound`],
/// or [`ApiError::Validation`] if the new title is blank.
#[instrument]
pub async fn update<C: Connection>(
    db: &Surreal<C>,
    id: &str,
    changes: SongChangeSet,
) -> Result<SongBrief, ApiError> {
    let id = parse_song_id(id)?;
    let changes = changes.normalize()?;
    Song::update(db, id, changes)
        .await?
        .map(Into::into)
        .ok_or(ApiError::NotFound)
}

/// # Errors
///
/// [`ApiError::InvalidId`] if `id` is malformed, [`ApiError::NotFound`] if there is no such song.
#[instrument]
pub async fn delete<C: Connection>(db: &Surreal<C>, id: &str) -> Result<(), ApiError> {
    let id = parse_song_id(id)?;
    Song::delete(db, id)
        .await?
        .map(|_| ())
        .ok_or(ApiError::NotFound)
}

/// Every song whose `field` is exactly `value`, newest first.
///
/// # Errors
///
/// Fails if the store fails.
#[instrument]
pub async fn list_by<C: Connection>(
    db: &Surreal<C>,
    field: SongField,
    value: String,
) -> Result<Vec<SongBrief>, ApiError> {
    Ok(Song::read_by_field(db, field, value)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use songbook_storage::test_utils::{arb_new_song, create_song, init_test_database};

    #[rstest]
    #[case::defaults(None, None, 1, 10)]
    #[case::explicit(Some("3"), Some("20"), 3, 20)]
    #[case::garbage(Some("abc"), Some("x1"), 1, 10)]
    #[case::zero_page(Some("0"), Some("10"), 1, 10)]
    #[case::negative(Some("-4"), Some("-1"), 1, 1)]
    #[case::zero_limit(Some("1"), Some("0"), 1, 1)]
    #[case::huge_limit(Some("2"), Some("5000"), 2, 100)]
    #[case::whitespace(Some(" 2 "), Some(" 5"), 2, 5)]
    fn test_page_request_from_raw(
        #[case] page: Option<&str>,
        #[case] limit: Option<&str>,
        #[case] expected_page: u64,
        #[case] expected_limit: u64,
    ) {
        assert_eq!(
            PageRequest::from_raw(page, limit),
            PageRequest {
                page: expected_page,
                limit: expected_limit,
            }
        );
    }

    #[rstest]
    #[case::first(1, 10, 0)]
    #[case::third(3, 10, 20)]
    #[case::huge_page(9_223_372_036_854_775_807, MAX_LIMIT, MAX_OFFSET)]
    #[case::max_page(u64::MAX, MAX_LIMIT, MAX_OFFSET)]
    fn test_page_request_offset(#[case] page: u64, #[case] limit: u64, #[case] expected: u64) {
        assert_eq!(PageRequest { page, limit }.offset(), expected);
    }

    #[tokio::test]
    async fn test_list_far_past_the_end() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        create_song(&db, arb_new_song()).await?;

        let request = PageRequest::from_raw(Some("9223372036854775807"), Some("100"));
        let (songs, pagination) = list(&db, request).await?;

        assert!(songs.is_empty());
        assert_eq!(pagination.total, 1);
        assert!(!pagination.has_next);
        assert!(pagination.has_prev);
        Ok(())
    }

    #[rstest]
    #[case::empty(0, 1, 10, 0)]
    #[case::first_page(25, 1, 10, 10)]
    #[case::last_page(25, 3, 10, 5)]
    #[case::past_the_end(25, 4, 10, 0)]
    #[case::single_item_pages(3, 2, 1, 1)]
    #[tokio::test]
    async fn test_list(
        #[case] total: usize,
        #[case] page: u64,
        #[case] limit: u64,
        #[case] expected_len: usize,
    ) -> anyhow::Result<()> {
        let db = init_test_database().await?;
        for _ in 0..total {
            create_song(&db, arb_new_song()).await?;
        }

        let (songs, pagination) = list(&db, PageRequest { page, limit }).await?;

        assert!(songs.len() as u64 <= limit);
        assert_eq!(songs.len(), expected_len);
        assert_eq!(pagination, PaginationInfo::new(page, limit, total as u64));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_trims_and_rejects_duplicates() -> anyhow::Result<()> {
        let db = init_test_database().await?;

        let created = create(&db, NewSong::new("  Hello ", " Adele ", "25", "Pop")).await?;
        assert_eq!(created.title, "Hello");
        assert_eq!(created.artist, "Adele");

        let result = create(&db, NewSong::new("Hello", "Someone", "", "")).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));

        let (songs, _) = list(&db, PageRequest::default()).await?;
        assert_eq!(songs.iter().filter(|s| s.title == "Hello").count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_blank_title() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        let result = create(&db, NewSong::new("   ", "a", "b", "c")).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_many_drops_invalid_and_duplicates() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        create(&db, NewSong::new("Existing", "", "", "")).await?;

        let created = create_many(
            &db,
            vec![
                NewSong::new("New", "", "", ""),
                NewSong::new(" ", "", "", ""),
                NewSong::new("Existing", "", "", ""),
                NewSong::new(" New ", "", "", ""),
            ],
        )
        .await?;

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "New");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_then_get() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        let song: SongBrief = create_song(&db, arb_new_song()).await?.into();

        let changes = SongChangeSet {
            title: Some("X".into()),
            ..Default::default()
        };
        update(&db, &song.id, changes).await?;

        let read = get(&db, &song.id).await?;
        assert_eq!(read.title, "X");
        assert_eq!(read.artist, song.artist);
        assert_eq!(read.album, song.album);
        assert_eq!(read.genre, song.genre);
        assert_eq!(read.created_at, song.created_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_errors() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        let song: SongBrief = create_song(&db, arb_new_song()).await?.into();

        let blank_title = SongChangeSet {
            title: Some(" ".into()),
            ..Default::default()
        };
        assert!(matches!(
            update(&db, &song.id, blank_title).await,
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            update(&db, "garbage", SongChangeSet::default()).await,
            Err(ApiError::InvalidId(_))
        ));
        assert!(matches!(
            update(&db, &ulid_string(), SongChangeSet::default()).await,
            Err(ApiError::NotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_twice() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        let song: SongBrief = create_song(&db, arb_new_song()).await?.into();

        delete(&db, &song.id).await?;
        assert!(matches!(get(&db, &song.id).await, Err(ApiError::NotFound)));
        assert!(matches!(
            delete(&db, &song.id).await,
            Err(ApiError::NotFound)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_invalid_id() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        assert!(matches!(
            get(&db, "not-an-id").await,
            Err(ApiError::InvalidId(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_by() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        create(&db, NewSong::new("a", "Muse", "Drones", "Rock")).await?;
        create(&db, NewSong::new("b", "Muse", "Origin", "Rock")).await?;
        create(&db, NewSong::new("c", "Adele", "25", "Pop")).await?;

        assert_eq!(
            list_by(&db, SongField::Artist, "Muse".into()).await?.len(),
            2
        );
        assert_eq!(
            list_by(&db, SongField::Album, "25".into()).await?.len(),
            1
        );
        assert_eq!(
            list_by(&db, SongField::Genre, "Jazz".into()).await?.len(),
            0
        );
        Ok(())
    }

    fn ulid_string() -> String {
        Song::generate_id().id.to_raw()
    }
}
