//! The catalog operations, independent of how they are exposed over HTTP.
//!
//! Every function takes the database connection it works on and returns wire types,
//! failures are already mapped into [`crate::errors::ApiError`].

pub mod songs;
pub mod stats;
