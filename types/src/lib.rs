//! Types shared between the catalog daemon and its clients.
//!
//! Everything in here is (de)serialized with the exact field names that travel over the wire,
//! so changing a `serde` attribute here is a breaking change to the HTTP API.

pub mod envelope;
pub mod errors;
pub mod metadata;
pub mod pagination;
pub mod song;

pub use envelope::Envelope;
pub use errors::ValidationError;
pub use metadata::{FieldCount, MetadataInfo};
pub use pagination::PaginationInfo;
pub use song::{NewSong, SongBrief, SongChangeSet, SongField};
