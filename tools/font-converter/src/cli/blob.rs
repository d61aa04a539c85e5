//! Command line parsing and [`Action::Blob`][ab] construction.
//!
//! [ab]: crate::cli::Action::Blob

use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command, builder::EnumValueParser, value_parser};

use crate::common::{Case, Destination, Shape, Syntax};

/// Description of how a raw packed font blob is converted into an array literal.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct BlobConfig {
    /// Path to the raw font blob.
    pub input: PathBuf,
    /// Where the emitted array is written.
    pub output: Destination,
    /// The number of rows forming a glyph.
    pub rows_per_glyph: u8,
    /// The size the blob is expected to have, in bytes.
    pub expected_size: usize,
    /// The name of the emitted array.
    pub symbol: String,
    /// The shape of the emitted array.
    pub shape: Shape,
    /// The declaration syntax of the emitted array.
    pub syntax: Syntax,
    /// The case of the emitted hexadecimal digits.
    pub hex_case: Case,
    /// The number of values after which a line break is inserted.
    pub values_per_line: Option<NonZeroUsize>,
}

/// Parses the arguments required to produce a valid [`BlobConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> BlobConfig {
    let input = matches
        .get_one::<PathBuf>("input")
        .cloned()
        .unwrap_or_else(|| unreachable!("`input` is a required argument"));

    let rows_per_glyph = matches
        .get_one::<u8>("rows-per-glyph")
        .copied()
        .unwrap_or_else(|| unreachable!("`rows-per-glyph` should have a default value"));

    let expected_size = matches
        .get_one::<usize>("expected-size")
        .copied()
        .unwrap_or_else(|| unreachable!("`expected-size` should have a default value"));

    let shape = matches
        .get_one::<Shape>("layout")
        .copied()
        .unwrap_or_else(|| unreachable!("`layout` should have a default value"));

    let syntax = matches
        .get_one::<Syntax>("syntax")
        .copied()
        .unwrap_or_else(|| unreachable!("`syntax` should have a default value"));
    let symbol = super::symbol_argument(matches, syntax);

    let hex_case = matches
        .get_one::<Case>("hex-case")
        .copied()
        .unwrap_or_else(|| unreachable!("`hex-case` should have a default value"));

    let values_per_line = if matches.get_flag("no-wrap") {
        None
    } else {
        matches.get_one::<NonZeroUsize>("wrap").copied()
    };

    BlobConfig {
        input,
        output: Destination::from_path(matches.get_one::<PathBuf>("output").cloned()),
        rows_per_glyph,
        expected_size,
        symbol,
        shape,
        syntax,
        hex_case,
        values_per_line,
    }
}

/// Returns the command parser for an [`Action::Blob`][ab].
///
/// [ab]: crate::cli::Action::Blob
pub fn subcommand_parser() -> Command {
    let input = Arg::new("input")
        .value_parser(value_parser!(PathBuf))
        .help("Path to the raw font blob")
        .required(true);

    let output = Arg::new("output")
        .value_parser(value_parser!(PathBuf))
        .help("File to write to [default: standard output]");

    let rows_per_glyph = Arg::new("rows-per-glyph")
        .long("rows-per-glyph")
        .value_parser(value_parser!(u8).range(1..))
        .default_value("16");

    let expected_size = Arg::new("expected-size")
        .long("expected-size")
        .value_parser(value_parser!(usize))
        .help("Expected size of the blob in bytes; other sizes produce a warning")
        .default_value("4096");

    let symbol = Arg::new("symbol")
        .long("symbol")
        .help("Name of the emitted array")
        .default_value("builtin_font");

    let layout = Arg::new("layout")
        .long("layout")
        .value_parser(EnumValueParser::<Shape>::new())
        .default_value("flat");

    let syntax = Arg::new("syntax")
        .long("syntax")
        .value_parser(EnumValueParser::<Syntax>::new())
        .default_value("c");

    let hex_case = Arg::new("hex-case")
        .long("hex-case")
        .value_parser(EnumValueParser::<Case>::new())
        .default_value("lower");

    let wrap = Arg::new("wrap")
        .long("wrap")
        .value_parser(value_parser!(NonZeroUsize))
        .help("Number of values after which a line break is inserted")
        .default_value("12");

    let no_wrap = Arg::new("no-wrap")
        .long("no-wrap")
        .action(ArgAction::SetTrue)
        .conflicts_with("wrap")
        .help("Never insert line breaks between values");

    Command::new("blob")
        .about("Converts a raw packed font blob (such as an F16 font) into an array literal")
        .arg(input)
        .arg(output)
        .arg(rows_per_glyph)
        .arg(expected_size)
        .arg(symbol)
        .arg(layout)
        .arg(syntax)
        .arg(hex_case)
        .arg(wrap)
        .arg(no_wrap)
}
