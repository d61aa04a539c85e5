//! Command line parsing and [`Action::Rasterize`][ar] construction.
//!
//! [ar]: crate::cli::Action::Rasterize

use std::{num::NonZeroUsize, ops::Range, path::PathBuf};

use clap::{Arg, ArgMatches, Command, builder::EnumValueParser, value_parser};
use font::pixel::{Cell, MAX_GLYPH_WIDTH};

use crate::{
    common::{Case, Destination, Element, Syntax},
    truetype::{MAX_SIZE, MIN_SIZE, is_valid_size},
};

/// Description of how a TrueType font is rasterized and how the resulting glyph table is
/// emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterizeConfig {
    /// Path to the TrueType font.
    pub font_path: PathBuf,
    /// The size at which the font is rendered, in pixels.
    pub size: f32,
    /// The character codes to rasterize.
    pub codes: Range<u32>,
    /// The dimensions of each glyph.
    pub cell: Cell,
    /// The name of the emitted array.
    pub symbol: String,
    /// The element type of the emitted array. `None` selects the narrowest type that fits.
    pub element: Option<Element>,
    /// The declaration syntax of the emitted array.
    pub syntax: Syntax,
    /// The case of the emitted hexadecimal digits.
    pub hex_case: Case,
    /// The number of values after which a glyph's rows are wrapped.
    pub values_per_line: Option<NonZeroUsize>,
    /// Where the emitted array is written.
    pub output: Destination,
}

/// Parses the arguments required to produce a valid [`RasterizeConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> RasterizeConfig {
    let font_path = matches
        .get_one::<PathBuf>("font")
        .cloned()
        .unwrap_or_else(|| unreachable!("`font` is a required argument"));

    let size = matches
        .get_one::<f32>("size")
        .copied()
        .unwrap_or_else(|| unreachable!("`size` should have a default value"));

    let first = matches
        .get_one::<u32>("first")
        .copied()
        .unwrap_or_else(|| unreachable!("`first` should have a default value"));
    let last = matches
        .get_one::<u32>("last")
        .copied()
        .unwrap_or_else(|| unreachable!("`last` should have a default value"));

    let width = matches
        .get_one::<u8>("width")
        .copied()
        .unwrap_or_else(|| unreachable!("`width` should have a default value"));
    let height = matches
        .get_one::<u8>("height")
        .copied()
        .unwrap_or_else(|| unreachable!("`height` should have a default value"));

    let syntax = matches
        .get_one::<Syntax>("syntax")
        .copied()
        .unwrap_or_else(|| unreachable!("`syntax` should have a default value"));
    let symbol = super::symbol_argument(matches, syntax);

    let hex_case = matches
        .get_one::<Case>("hex-case")
        .copied()
        .unwrap_or_else(|| unreachable!("`hex-case` should have a default value"));

    RasterizeConfig {
        font_path,
        size,
        codes: first..last,
        cell: Cell::new(width, height),
        symbol,
        element: matches.get_one::<Element>("element").copied(),
        syntax,
        hex_case,
        values_per_line: matches.get_one::<NonZeroUsize>("wrap").copied(),
        output: Destination::from_path(matches.get_one::<PathBuf>("output").cloned()),
    }
}

/// Returns the command parser for an [`Action::Rasterize`][ar].
///
/// [ar]: crate::cli::Action::Rasterize
pub fn subcommand_parser() -> Command {
    let font = Arg::new("font")
        .long("font")
        .env("FONT_CONVERTER_FONT")
        .value_parser(value_parser!(PathBuf))
        .help("Path to the TrueType font to rasterize")
        .required(true);

    let size = Arg::new("size")
        .long("size")
        .env("FONT_CONVERTER_SIZE")
        .value_parser(parse_size)
        .help("Size at which glyphs are rendered, in pixels")
        .default_value("16");

    let first = Arg::new("first")
        .long("first")
        .value_parser(value_parser!(u32))
        .help("First character code to rasterize")
        .default_value("32");

    let last = Arg::new("last")
        .long("last")
        .value_parser(value_parser!(u32))
        .help("Character code following the last one to rasterize")
        .default_value("128");

    let width = Arg::new("width")
        .long("width")
        .value_parser(value_parser!(u8).range(1..=i64::from(MAX_GLYPH_WIDTH)))
        .help("Width of each glyph cell, in pixels")
        .default_value("8");

    let height = Arg::new("height")
        .long("height")
        .value_parser(value_parser!(u8).range(1..))
        .help("Height of each glyph cell, in pixels")
        .default_value("16");

    let symbol = Arg::new("symbol")
        .long("symbol")
        .help("Name of the emitted array")
        .default_value("g_8x16_font");

    let element = Arg::new("element")
        .long("element")
        .value_parser(EnumValueParser::<Element>::new())
        .help("Element type of the emitted array [default: narrowest that fits]");

    let syntax = Arg::new("syntax")
        .long("syntax")
        .value_parser(EnumValueParser::<Syntax>::new())
        .default_value("c");

    let hex_case = Arg::new("hex-case")
        .long("hex-case")
        .value_parser(EnumValueParser::<Case>::new())
        .default_value("upper");

    let wrap = Arg::new("wrap")
        .long("wrap")
        .value_parser(value_parser!(NonZeroUsize))
        .help("Number of values after which a glyph's rows are wrapped");

    let output = Arg::new("output")
        .long("output")
        .short('o')
        .value_parser(value_parser!(PathBuf))
        .help("File to write to [default: standard output]");

    Command::new("rasterize")
        .about("Rasterizes a TrueType font into a packed glyph table literal")
        .arg(font)
        .arg(size)
        .arg(first)
        .arg(last)
        .arg(width)
        .arg(height)
        .arg(symbol)
        .arg(element)
        .arg(syntax)
        .arg(hex_case)
        .arg(wrap)
        .arg(output)
}

/// Parses a rendering size in pixels.
fn parse_size(value: &str) -> Result<f32, String> {
    let size = value.parse::<f32>().map_err(|error| error.to_string())?;
    if !is_valid_size(size) {
        return Err(format!("expected a size between {MIN_SIZE} and {MAX_SIZE}"));
    }

    Ok(size)
}
