//! Tool for converting fonts and C sources into artifacts that can be embedded into programs.

use anyhow::Result;
use font_converter::{
    action::{blob::convert_blob, header::create_header, rasterize::rasterize},
    cli::{self, Action},
};

fn main() -> Result<()> {
    let invocation = cli::get_invocation();

    env_logger::Builder::new()
        .filter_level(invocation.verbosity)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    match invocation.action {
        Action::Rasterize(config) => rasterize(&config)?,
        Action::Blob(config) => convert_blob(&config)?,
        Action::Header(config) => create_header(&config)?,
    }

    Ok(())
}
