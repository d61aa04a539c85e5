//! [`Rasterizer`] implementation for TrueType fonts.

use core::{error, fmt};

use anyhow::Result;
use font::{
    pixel::{Cell, PixelGrid},
    table::Rasterizer,
};
use fontdue::{Font, FontSettings};

/// The smallest size at which glyphs are rendered, in pixels.
pub const MIN_SIZE: f32 = 1.0;
/// The largest size at which glyphs are rendered, in pixels.
pub const MAX_SIZE: f32 = 512.0;

/// Returns `true` if glyphs can be rendered at `size` pixels.
///
/// `NaN` and infinite sizes are rejected.
pub fn is_valid_size(size: f32) -> bool {
    (MIN_SIZE..=MAX_SIZE).contains(&size)
}

/// Renders glyphs of a TrueType font at a fixed pixel size.
pub struct TrueTypeRasterizer {
    /// The parsed font.
    font: Font,
    /// The size at which glyphs are rendered, in pixels.
    size: f32,
    /// The distance from the top of a cell to the baseline, in pixels.
    baseline: i32,
}

impl TrueTypeRasterizer {
    /// Parses `font` and prepares it for rendering at `size` pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is not a valid size (see [`is_valid_size`]) or if `font` is not a
    /// valid TrueType or OpenType font.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "font ascents are far below i32::MAX pixels"
    )]
    pub fn from_bytes(font: &[u8], size: f32) -> Result<Self> {
        anyhow::ensure!(
            is_valid_size(size),
            "invalid size {size}px: expected a size between {MIN_SIZE}px and {MAX_SIZE}px"
        );

        let settings = FontSettings {
            scale: size,
            ..FontSettings::default()
        };
        let font =
            Font::from_bytes(font, settings).map_err(|error| anyhow::anyhow!("invalid font: {error}"))?;

        let ascent = font
            .horizontal_line_metrics(size)
            .map_or(size, |metrics| metrics.ascent);
        log::debug!("rendering at {size}px with an ascent of {ascent}px");

        Ok(Self {
            font,
            size,
            baseline: ascent.round() as i32,
        })
    }
}

impl Rasterizer for TrueTypeRasterizer {
    type Error = RenderError;

    fn render(&mut self, code: u32, cell: Cell) -> Result<PixelGrid, Self::Error> {
        let c = char::from_u32(code).ok_or(RenderError::InvalidCode(code))?;

        let index = self.font.lookup_glyph_index(c);
        if index == 0 {
            return missing_glyph(c, cell);
        }

        let (metrics, coverage) = self.font.rasterize_indexed(index, self.size);
        let height = i32::try_from(metrics.height).unwrap_or(i32::MAX);
        let bitmap = Bitmap {
            coverage: &coverage,
            width: metrics.width,
            height: metrics.height,
            left: metrics.xmin,
            top: self.baseline - metrics.ymin.saturating_add(height),
        };

        Ok(bitmap.place(cell))
    }
}

/// Handles a character the font has no glyph for.
///
/// Control characters such as DEL draw nothing and produce an empty cell; any other character is
/// a [`RenderError::MissingGlyph`].
fn missing_glyph(c: char, cell: Cell) -> Result<PixelGrid, RenderError> {
    if !c.is_control() {
        return Err(RenderError::MissingGlyph(c));
    }

    log::debug!("no glyph for control character {c:?}, leaving its cell empty");
    Ok(PixelGrid::new(cell))
}

/// A rendered coverage bitmap and its position relative to the top-left corner of a cell.
#[derive(Clone, Copy, Debug)]
struct Bitmap<'coverage> {
    /// Row-major coverage values.
    coverage: &'coverage [u8],
    /// The width of the bitmap in pixels.
    width: usize,
    /// The height of the bitmap in pixels.
    height: usize,
    /// Column of the cell holding the bitmap's first column.
    left: i32,
    /// Row of the cell holding the bitmap's first row.
    top: i32,
}

impl Bitmap<'_> {
    /// Draws the bitmap into a [`PixelGrid`] of size `cell`, clipping anything outside of it.
    fn place(&self, cell: Cell) -> PixelGrid {
        PixelGrid::from_fn(cell, |x, y| self.coverage_at(x, y) > 0)
    }

    fn coverage_at(&self, x: u8, y: u8) -> u8 {
        let column = usize::try_from(i32::from(x) - self.left);
        let row = usize::try_from(i32::from(y) - self.top);
        let (Ok(column), Ok(row)) = (column, row) else {
            return 0;
        };

        if column >= self.width || row >= self.height {
            return 0;
        }

        self.coverage
            .get(row * self.width + column)
            .copied()
            .unwrap_or(0)
    }
}

/// Various errors that can occur while rendering a character code.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum RenderError {
    /// The character code is not a Unicode scalar value.
    InvalidCode(u32),
    /// The font has no glyph for the character.
    MissingGlyph(char),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCode(code) => write!(f, "{code:#x} is not a unicode scalar value"),
            Self::MissingGlyph(c) => write!(f, "font has no glyph for {c:?}"),
        }
    }
}

impl error::Error for RenderError {}

#[cfg(test)]
mod test {
    use font::pixel::Cell;

    use super::{
        Bitmap, MAX_SIZE, MIN_SIZE, RenderError, TrueTypeRasterizer, is_valid_size, missing_glyph,
    };

    const CELL: Cell = Cell::new(8, 16);

    #[test]
    fn placed_at_offset() {
        let coverage = [255, 0, 12, 1];
        let bitmap = Bitmap {
            coverage: &coverage,
            width: 2,
            height: 2,
            left: 3,
            top: 5,
        };

        let grid = bitmap.place(CELL);
        assert_eq!(grid.get(3, 5), Some(true));
        assert_eq!(grid.get(4, 5), Some(false));
        assert_eq!(grid.get(3, 6), Some(true));
        assert_eq!(grid.get(4, 6), Some(true));

        let on = grid.rows().flatten().filter(|pixel| **pixel).count();
        assert_eq!(on, 3);
    }

    #[test]
    fn clipped_to_cell() {
        let coverage = [1; 4 * 4];
        let bitmap = Bitmap {
            coverage: &coverage,
            width: 4,
            height: 4,
            left: -2,
            top: 14,
        };

        let grid = bitmap.place(CELL);
        let on = grid.rows().flatten().filter(|pixel| **pixel).count();
        assert_eq!(on, 2 * 2);
        assert_eq!(grid.get(0, 14), Some(true));
        assert_eq!(grid.get(1, 15), Some(true));
        assert_eq!(grid.get(2, 15), Some(false));
    }

    #[test]
    fn empty_bitmap() {
        let bitmap = Bitmap {
            coverage: &[],
            width: 0,
            height: 0,
            left: 0,
            top: 0,
        };

        assert!(bitmap.place(CELL).rows().flatten().all(|pixel| !pixel));
    }

    #[test]
    fn control_characters_without_glyphs_are_blank() {
        let grid = missing_glyph('\u{7f}', CELL).unwrap();
        assert_eq!(grid.cell(), CELL);
        assert!(grid.rows().flatten().all(|pixel| !pixel));

        assert!(missing_glyph('\0', CELL).is_ok());
    }

    #[test]
    fn printable_characters_without_glyphs_fail() {
        assert_eq!(
            missing_glyph('A', CELL).unwrap_err(),
            RenderError::MissingGlyph('A')
        );
        assert_eq!(
            missing_glyph(' ', CELL).unwrap_err(),
            RenderError::MissingGlyph(' ')
        );
    }

    #[test]
    fn sizes() {
        assert!(is_valid_size(16.0));
        assert!(is_valid_size(MIN_SIZE));
        assert!(is_valid_size(MAX_SIZE));

        assert!(!is_valid_size(0.0));
        assert!(!is_valid_size(-5.0));
        assert!(!is_valid_size(f32::NAN));
        assert!(!is_valid_size(f32::INFINITY));
        assert!(!is_valid_size(1e9));
    }

    #[test]
    fn invalid_size_is_rejected() {
        for size in [0.0, -5.0, f32::NAN, 1e9] {
            let Err(error) = TrueTypeRasterizer::from_bytes(b"garbage", size) else {
                panic!("{size}px should be rejected");
            };
            assert!(error.to_string().starts_with("invalid size"), "{error}");
        }
    }

    #[test]
    fn invalid_font_is_rejected() {
        let Err(error) = TrueTypeRasterizer::from_bytes(b"garbage", 16.0) else {
            panic!("garbage should not parse as a font");
        };
        assert!(error.to_string().starts_with("invalid font"), "{error}");
    }
}
