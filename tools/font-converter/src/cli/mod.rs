//! Command line parsing and [`Action`] construction.

use clap::{Arg, ArgAction, ArgMatches, Command, parser::ValueSource};
use log::LevelFilter;

use crate::{
    cli::{blob::BlobConfig, header::HeaderConfig, rasterize::RasterizeConfig},
    common::Syntax,
};

pub mod blob;
pub mod header;
pub mod rasterize;

/// The action to carry out.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Rasterize a TrueType font into a glyph table literal.
    Rasterize(RasterizeConfig),
    /// Convert a raw packed font blob into an array literal.
    Blob(BlobConfig),
    /// Generate a C header from the function declarations of a C source file.
    Header(HeaderConfig),
}

/// A parsed invocation of `font-converter`.
#[derive(Clone, Debug, PartialEq)]
pub struct Invocation {
    /// The maximum level of log messages to emit.
    pub verbosity: LevelFilter,
    /// The [`Action`] to carry out.
    pub action: Action,
}

/// Parses `font-converter`'s arguments to construct an [`Invocation`].
pub fn get_invocation() -> Invocation {
    parse_invocation(&command_parser().get_matches())
}

/// Constructs an [`Invocation`] from already matched arguments.
pub fn parse_invocation(matches: &ArgMatches) -> Invocation {
    let verbosity = match matches.get_count("verbose") {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let Some((subcommand_name, subcommand_matches)) = matches.subcommand() else {
        unreachable!("subcommand is required");
    };
    let action = match subcommand_name {
        "rasterize" => Action::Rasterize(rasterize::parse_arguments(subcommand_matches)),
        "blob" => Action::Blob(blob::parse_arguments(subcommand_matches)),
        "header" => Action::Header(header::parse_arguments(subcommand_matches)),
        _ => unreachable!("unexpected subcommand: {subcommand_name:?}"),
    };

    Invocation { verbosity, action }
}

/// Returns the value of the `symbol` argument.
///
/// Default symbols are lower case C names; for Rust they are upper-cased so the emitted item
/// follows the naming convention of globals.
fn symbol_argument(matches: &ArgMatches, syntax: Syntax) -> String {
    let symbol = matches
        .get_one::<String>("symbol")
        .unwrap_or_else(|| unreachable!("`symbol` should have a default value"));

    match (syntax, matches.value_source("symbol")) {
        (Syntax::Rust, Some(ValueSource::DefaultValue)) => symbol.to_ascii_uppercase(),
        _ => symbol.clone(),
    }
}

/// Returns the command parser for all [`Action`]s.
pub fn command_parser() -> Command {
    let verbose = Arg::new("verbose")
        .long("verbose")
        .short('v')
        .help("Increase logging verbosity (repeat for more)")
        .action(ArgAction::Count)
        .global(true);

    Command::new("font-converter")
        .about("Converts fonts and C sources into embeddable source artifacts")
        .arg(verbose)
        .subcommand(rasterize::subcommand_parser())
        .subcommand(blob::subcommand_parser())
        .subcommand(header::subcommand_parser())
        .subcommand_required(true)
        .arg_required_else_help(true)
}
