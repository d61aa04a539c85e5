//! Helper functions to rasterize a TrueType font given a [`RasterizeConfig`].

use std::{error, fs};

use anyhow::{Context, Result};
use font::{
    literal::{ElementWidth, LiteralConfig, to_literal},
    table::{Rasterizer, build_table},
};

use crate::{cli::rasterize::RasterizeConfig, truetype::TrueTypeRasterizer};

/// Rasterizes the font named by `config` and writes its glyph table literal to the configured
/// destination.
///
/// # Errors
///
/// Returns errors if the font cannot be read or parsed, a glyph cannot be rendered, or the output
/// cannot be written.
pub fn rasterize(config: &RasterizeConfig) -> Result<()> {
    let font = fs::read(&config.font_path)
        .with_context(|| format!("error reading \"{}\"", config.font_path.display()))?;
    let mut rasterizer = TrueTypeRasterizer::from_bytes(&font, config.size)
        .with_context(|| format!("error loading \"{}\"", config.font_path.display()))?;

    let provenance = config
        .font_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let text = font_literal(&mut rasterizer, config, provenance.as_deref())?;

    config.output.write(&text)
}

/// Builds the glyph table described by `config` using `rasterizer` and serializes it.
///
/// # Errors
///
/// Returns errors if any character code fails to render, in which case no output is produced, or
/// if the table cannot be serialized with the configured element type.
pub fn font_literal<R>(
    rasterizer: &mut R,
    config: &RasterizeConfig,
    provenance: Option<&str>,
) -> Result<String>
where
    R: Rasterizer,
    R::Error: error::Error + Send + Sync + 'static,
{
    let table = build_table(rasterizer, config.codes.clone(), config.cell)?;
    log::info!(
        "rasterized {} glyphs of {} for codes {}..{}",
        table.len(),
        config.cell,
        config.codes.start,
        config.codes.end
    );

    let element = match config.element {
        Some(element) => element.into(),
        None => ElementWidth::for_row_width(config.cell.width)
            .with_context(|| format!("no element type holds {} pixel rows", config.cell.width))?,
    };

    let literal_config = LiteralConfig {
        syntax: config.syntax.into(),
        element,
        hex_case: config.hex_case.into(),
        values_per_line: config.values_per_line,
        provenance,
        ..LiteralConfig::grouped(&config.symbol)
    };

    to_literal(&table, &literal_config).context("error serializing glyph table")
}
