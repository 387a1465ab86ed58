use songbook_types::SongField;
use surrealdb::opt::IntoQuery;

use crate::db::schemas::song::TABLE_NAME;

/// Query to read a song by its title
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM song WHERE title = $title LIMIT 1
/// ```
#[must_use]
#[inline]
pub fn read_song_by_title() -> impl IntoQuery {
    format!("SELECT * FROM {TABLE_NAME} WHERE title = $title LIMIT 1")
}

/// Query to read one page of songs, newest first
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM song ORDER BY created_at DESC LIMIT type::int($limit) START type::int($start)
/// ```
#[must_use]
#[inline]
pub fn read_page() -> impl IntoQuery {
    format!(
        "SELECT * FROM {TABLE_NAME} ORDER BY created_at DESC LIMIT type::int($limit) START type::int($start)"
    )
}

/// Query to read every song whose `field` equals `$value`, newest first
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM song WHERE field = $value ORDER BY created_at DESC
/// ```
#[must_use]
#[inline]
pub fn read_songs_by_field(field: SongField) -> impl IntoQuery {
    format!("SELECT * FROM {TABLE_NAME} WHERE {field} = $value ORDER BY created_at DESC")
}

/// Query to count how many songs share each value of `field`, grouped by value
///
/// Compiles to:
/// ```sql, ignore
/// SELECT field AS name, count() AS total FROM song GROUP BY name
/// ```
#[must_use]
#[inline]
pub fn count_songs_by_field(field: SongField) -> impl IntoQuery {
    format!(
        "SELECT {field} AS name, count() AS total FROM {TABLE_NAME} GROUP BY name"
    )
}
