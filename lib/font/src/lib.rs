//! Encoding of bitmap fonts into packed rows and array literals for embedding into programs.
//!
//! Glyph images are packed by [`pixel`], assembled into tables by [`table`], viewed through
//! [`glyph`] and serialized by [`literal`].
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod glyph;
pub mod literal;
pub mod pixel;
pub mod table;
