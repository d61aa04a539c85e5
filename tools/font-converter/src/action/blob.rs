//! Helper functions to convert a raw packed font blob given a [`BlobConfig`].

use std::fs;

use anyhow::{Context, Result};
use font::{
    glyph::{GlyphArray, UnexpectedBlobSize, check_blob_size},
    literal::{LiteralConfig, to_literal},
};

use crate::cli::blob::BlobConfig;

/// Width of the glyphs in a raw font blob; every byte holds one row.
const BLOB_GLYPH_WIDTH: u8 = 8;

/// The result of serializing a raw font blob.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct BlobLiteral {
    /// The generated array literal.
    pub text: String,
    /// The number of complete glyphs in the blob.
    pub glyph_count: usize,
    /// The number of rows in the short final group, if any.
    pub trailing_rows: usize,
    /// Set when the blob's size does not match the expected size.
    pub warning: Option<UnexpectedBlobSize>,
}

/// Reads the blob named by `config` and writes its array literal to the configured destination.
///
/// # Errors
///
/// Returns errors if the blob cannot be read, is empty, or the output cannot be written.
pub fn convert_blob(config: &BlobConfig) -> Result<()> {
    let blob = fs::read(&config.input)
        .with_context(|| format!("error reading \"{}\"", config.input.display()))?;

    let provenance = config
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let literal = blob_literal(&blob, config, provenance.as_deref())?;

    config.output.write(&literal.text)
}

/// Serializes `blob` as described by `config`.
///
/// A blob whose size differs from [`BlobConfig::expected_size`] is still serialized in full, but
/// a warning is logged and recorded in the returned [`BlobLiteral`].
///
/// # Errors
///
/// Returns errors if `blob` is empty.
pub fn blob_literal(
    blob: &[u8],
    config: &BlobConfig,
    provenance: Option<&str>,
) -> Result<BlobLiteral> {
    let warning = check_blob_size(blob.len(), config.expected_size);
    if let Some(warning) = warning {
        log::warn!("{warning}; the generated array should be re-validated");
    }

    let glyphs = GlyphArray::new(blob, BLOB_GLYPH_WIDTH, config.rows_per_glyph);
    log::debug!(
        "{} glyphs of {} rows with {} trailing rows",
        glyphs.glyph_count(),
        config.rows_per_glyph,
        glyphs.trailing_rows()
    );

    let literal_config = LiteralConfig {
        syntax: config.syntax.into(),
        layout: config.shape.into(),
        hex_case: config.hex_case.into(),
        values_per_line: config.values_per_line,
        provenance,
        ..LiteralConfig::flat(&config.symbol)
    };
    let text = to_literal(&glyphs, &literal_config).context("error serializing font blob")?;

    Ok(BlobLiteral {
        text,
        glyph_count: glyphs.glyph_count(),
        trailing_rows: glyphs.trailing_rows(),
        warning,
    })
}
