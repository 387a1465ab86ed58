use serde::{Deserialize, Serialize};

/// Aggregate counts over the whole catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataInfo {
    pub total_songs: u64,
    pub unique_artists: u64,
    pub unique_albums: u64,
}

/// One group of a group-by-field count, e.g. an artist and how many songs they have.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCount {
    pub name: String,
    pub count: u64,
}
