//! Tools for converting fonts and C sources into artifacts that can be embedded into programs.
//!
//! - `rasterize`: renders a TrueType font into a packed glyph table literal.
//! - `blob`: converts a raw packed font blob (such as an F16 font) into an array literal.
//! - `header`: generates a C header from the function declarations of a C source file.

pub mod action;
pub mod cli;
pub mod common;
pub mod declarations;
pub mod truetype;
