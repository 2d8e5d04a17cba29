//! Remote movie catalog access.
//!
//! - `client`: the [`Catalog`] trait and the HTTP implementation
//! - `wire`: deserialization envelopes for the catalog's JSON responses

pub mod client;
pub(crate) mod wire;

pub use client::{Catalog, OmdbCatalog};
