#![allow(clippy::module_name_repetitions)]
//----------------------------------------------------------------------------------------- std lib
use std::fmt;
//--------------------------------------------------------------------------------- other libraries
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
//----------------------------------------------------------------------------------- local modules
use crate::errors::ValidationError;

/// A song as it is handed to clients.
///
/// `id` is the opaque key the store assigned to the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongBrief {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for SongBrief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}, {})",
            self.title, self.artist, self.album, self.genre
        )
    }
}

/// Payload used to create a [`SongBrief`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub genre: String,
}

impl NewSong {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            genre: genre.into(),
        }
    }

    /// Trim every field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] if nothing is left of the title after trimming.
    pub fn normalize(self) -> Result<Self, ValidationError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        Ok(Self {
            title,
            artist: self.artist.trim().to_owned(),
            album: self.album.trim().to_owned(),
            genre: self.genre.trim().to_owned(),
        })
    }
}

/// A partial update: only the fields that are `Some` get merged into the stored record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SongChangeSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl SongChangeSet {
    /// Trim every present field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] if a title is present but blank.
    pub fn normalize(self) -> Result<Self, ValidationError> {
        let trim = |field: Option<String>| field.map(|s| s.trim().to_owned());

        let title = trim(self.title);
        if title.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::EmptyTitle);
        }

        Ok(Self {
            title,
            artist: trim(self.artist),
            album: trim(self.album),
            genre: trim(self.genre),
        })
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none() && self.genre.is_none()
    }
}

/// The song fields that can be grouped or filtered on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SongField {
    Artist,
    Album,
    Genre,
}

impl SongField {
    /// The name of the field in the stored record.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for SongField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
