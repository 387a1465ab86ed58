//! The client side of songbook.
//!
//! - [`api`]: a typed client for the catalog's HTTP API.
//! - [`state`]: a store that keeps a local view of the catalog in sync through that API.

pub mod api;
pub mod state;
#[cfg(test)]
mod test_utils;
