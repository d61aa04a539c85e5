//! Implementations of the [`Action`][action]s.
//!
//! [action]: crate::cli::Action

pub mod blob;
pub mod header;
pub mod rasterize;
