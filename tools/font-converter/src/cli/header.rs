//! Command line parsing and [`Action::Header`][ah] construction.
//!
//! [ah]: crate::cli::Action::Header

use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, value_parser};

/// Description of the C source file to scan and the header file to generate.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct HeaderConfig {
    /// Path to the C source file.
    pub source: PathBuf,
    /// Path to the header file to generate.
    pub header: PathBuf,
}

/// Parses the arguments required to produce a valid [`HeaderConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> HeaderConfig {
    let source = matches
        .get_one::<PathBuf>("source")
        .cloned()
        .unwrap_or_else(|| unreachable!("`source` is a required argument"));

    let header = matches
        .get_one::<PathBuf>("header")
        .cloned()
        .unwrap_or_else(|| unreachable!("`header` is a required argument"));

    HeaderConfig { source, header }
}

/// Returns the command parser for an [`Action::Header`][ah].
///
/// [ah]: crate::cli::Action::Header
pub fn subcommand_parser() -> Command {
    let source = Arg::new("source")
        .value_parser(value_parser!(PathBuf))
        .help("C source file to scan for function declarations")
        .required(true);

    let header = Arg::new("header")
        .value_parser(value_parser!(PathBuf))
        .help("Header file to generate")
        .required(true);

    Command::new("header")
        .about("Generates a header from the single-line function declarations of a C file")
        .arg(source)
        .arg(header)
}
