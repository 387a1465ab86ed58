use surrealdb::opt::IntoQuery;

use crate::errors::Error;

/// Struct to assist deserializing the results of the count queries
#[derive(Debug, serde::Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Count {
    count: u64,
}

impl Count {
    #[cfg(test)]
    pub const fn new(count: u64) -> Self {
        Self { count }
    }

    /// Count the number of items in a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or if the result cannot be deserialized.
    pub async fn count<C: surrealdb::Connection>(
        db: &surrealdb::Surreal<C>,
        table: &str,
    ) -> Result<u64, Error> {
        let result: Option<Self> = db.query(count(table)).await?.take(0)?;
        Ok(result.map_or_else(
            || {
                log::debug!("When counting entries in table {table}, no count was returned");
                0
            },
            |c| c.count,
        ))
    }

    /// Count the number of distinct values `field` takes in a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or if the result cannot be deserialized.
    pub async fn count_distinct<C: surrealdb::Connection>(
        db: &surrealdb::Surreal<C>,
        table: &str,
        field: &str,
    ) -> Result<u64, Error> {
        let result: Option<Self> = db.query(count_distinct(table, field)).await?.take(0)?;
        Ok(result.map_or_else(
            || {
                log::debug!(
                    "When counting distinct values of {field} in table {table}, no count was returned"
                );
                0
            },
            |c| c.count,
        ))
    }
}

/// Query to count the number of items in a table.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT count() FROM table GROUP ALL
/// ```
#[must_use]
#[inline]
pub fn count(table: &str) -> impl IntoQuery + use<> {
    format!("SELECT count() FROM {table} GROUP ALL")
}

/// Query to count the number of distinct values a field takes in a table.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT count() FROM (SELECT field FROM table GROUP BY field) GROUP ALL
/// ```
#[must_use]
#[inline]
pub fn count_distinct(table: &str, field: &str) -> impl IntoQuery + use<> {
    format!("SELECT count() FROM (SELECT {field} FROM {table} GROUP BY {field}) GROUP ALL")
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::schemas::{Table, song::Song},
        test_utils::{create_song, init_test_database},
    };
    use pretty_assertions::assert_eq;
    use songbook_types::NewSong;

    #[test]
    fn test_count_deserializes() {
        let count: Count = serde_json::from_str(r#"{"count": 7}"#).unwrap();
        assert_eq!(count, Count::new(7));
    }

    #[tokio::test]
    async fn test_count_empty_table() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        assert_eq!(Count::count(&db, Song::TABLE_NAME).await?, 0);
        assert_eq!(
            Count::count_distinct(&db, Song::TABLE_NAME, "artist").await?,
            0
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_count_distinct() -> anyhow::Result<()> {
        let db = init_test_database().await?;
        for (title, artist) in [("a", "X"), ("b", "X"), ("c", "Y")] {
            create_song(&db, NewSong::new(title, artist, "", "")).await?;
        }

        assert_eq!(Count::count(&db, Song::TABLE_NAME).await?, 3);
        assert_eq!(
            Count::count_distinct(&db, Song::TABLE_NAME, "artist").await?,
            2
        );
        assert_eq!(
            Count::count_distinct(&db, Song::TABLE_NAME, "album").await?,
            1
        );
        Ok(())
    }
}
