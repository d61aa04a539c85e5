//! Construction of [`GlyphTable`]s by rasterizing a contiguous range of character codes.

use alloc::vec::Vec;
use core::{error, fmt, ops::Range};

use crate::{
    glyph::{Glyph, GlyphArray},
    pixel::{Cell, MAX_GLYPH_WIDTH, PackError, PixelGrid, pack_glyph},
};

/// Capability to render a single character code into a [`PixelGrid`] of a given [`Cell`] size.
///
/// The font resource and the point size are owned by the implementation.
pub trait Rasterizer {
    /// The error returned when a character code cannot be rendered.
    type Error;

    /// Renders `code` into a [`PixelGrid`] with the dimensions of `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`Rasterizer::Error`] when `code` cannot be rendered.
    fn render(&mut self, code: u32, cell: Cell) -> Result<PixelGrid, Self::Error>;
}

impl<F, E> Rasterizer for F
where
    F: FnMut(u32, Cell) -> Result<PixelGrid, E>,
{
    type Error = E;

    fn render(&mut self, code: u32, cell: Cell) -> Result<PixelGrid, Self::Error> {
        self(code, cell)
    }
}

/// An ordered, owned collection of packed glyphs for a contiguous range of character codes.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct GlyphTable {
    /// The character code of the first glyph.
    first_code: u32,
    /// The dimensions of each glyph.
    cell: Cell,
    /// Packed rows, stored in the [`GlyphArray`] layout.
    buffer: Vec<u8>,
}

impl GlyphTable {
    /// Creates a new empty [`GlyphTable`] whose first glyph will be `first_code`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnsupportedWidth`] if `cell` is wider than [`MAX_GLYPH_WIDTH`].
    pub fn new(first_code: u32, cell: Cell) -> Result<Self, PackError> {
        if cell.width > MAX_GLYPH_WIDTH {
            return Err(PackError::UnsupportedWidth(usize::from(cell.width)));
        }

        Ok(Self {
            first_code,
            cell,
            buffer: Vec::new(),
        })
    }

    /// Packs `grid` and appends it as the glyph of the next character code.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidGlyphDimensions`] if `grid` does not match the table's
    /// [`Cell`].
    pub fn push(&mut self, grid: &PixelGrid) -> Result<(), PackError> {
        let rows = pack_glyph(grid, self.cell)?;

        let row_byte_count = usize::from(self.cell.width.div_ceil(8));
        for row in rows {
            let bytes = row.to_be_bytes();
            self.buffer
                .extend_from_slice(&bytes[bytes.len() - row_byte_count..]);
        }

        Ok(())
    }

    /// Returns the character code of the first glyph.
    pub const fn first_code(&self) -> u32 {
        self.first_code
    }

    /// Returns the range of character codes covered by the [`GlyphTable`].
    pub fn codes(&self) -> Range<u32> {
        let len = u32::try_from(self.len()).unwrap_or(u32::MAX);
        self.first_code..self.first_code.saturating_add(len)
    }

    /// Returns the dimensions of each glyph.
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Returns the number of glyphs in the [`GlyphTable`].
    pub fn len(&self) -> usize {
        self.glyphs().glyph_count()
    }

    /// Returns `true` if the [`GlyphTable`] contains no glyphs.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns a [`GlyphArray`] view of the packed glyphs.
    pub fn glyphs(&self) -> GlyphArray<'_> {
        GlyphArray::new(&self.buffer, self.cell.width, self.cell.height)
    }

    /// Returns the [`Glyph`] for `code`, or `None` if `code` is not in the [`GlyphTable`].
    pub fn get(&self, code: u32) -> Option<Glyph<'_>> {
        let index = code.checked_sub(self.first_code)?;
        self.glyphs().get(usize::try_from(index).ok()?)
    }

    /// Reconstructs the [`PixelGrid`] of the glyph for `code`.
    pub fn pixel_grid(&self, code: u32) -> Option<PixelGrid> {
        let glyph = self.get(code)?;

        let mut grid = PixelGrid::new(self.cell);
        for (y, row) in (0..self.cell.height).zip(glyph) {
            for (x, pixel) in (0..self.cell.width).zip(row) {
                grid.set(x, y, pixel);
            }
        }

        Some(grid)
    }
}

/// Rasterizes every character code in `codes`, in order, and packs the results into a
/// [`GlyphTable`].
///
/// The build is all or nothing: the first character code that fails to render or to pack aborts
/// the build and no partial table is returned.
///
/// # Errors
///
/// - [`BuildError::FontRenderFailure`]: Returned if `rasterizer` fails to render a character code.
/// - [`BuildError::Pack`]: Returned if a rendered glyph cannot be packed into `cell`.
pub fn build_table<R: Rasterizer>(
    rasterizer: &mut R,
    codes: Range<u32>,
    cell: Cell,
) -> Result<GlyphTable, BuildError<R::Error>> {
    let mut table = GlyphTable::new(codes.start, cell).map_err(|error| BuildError::Pack {
        code: codes.start,
        error,
    })?;

    for code in codes.clone() {
        let grid = rasterizer
            .render(code, cell)
            .map_err(|error| BuildError::FontRenderFailure { code, error })?;
        table
            .push(&grid)
            .map_err(|error| BuildError::Pack { code, error })?;

        log::trace!("packed glyph {code:#04x}");
    }

    log::debug!(
        "built glyph table for codes {}..{} with {} glyphs of {cell}",
        codes.start,
        codes.end,
        table.len()
    );
    Ok(table)
}

/// Various errors that can occur while building a [`GlyphTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError<E> {
    /// The rasterizer failed to render a character code.
    FontRenderFailure {
        /// The character code that failed to render.
        code: u32,
        /// The error returned by the rasterizer.
        error: E,
    },
    /// A rendered glyph could not be packed.
    Pack {
        /// The character code of the glyph.
        code: u32,
        /// The reason packing failed.
        error: PackError,
    },
}

impl<E> BuildError<E> {
    /// Returns the character code that caused the build to fail.
    pub const fn code(&self) -> u32 {
        match self {
            Self::FontRenderFailure { code, .. } | Self::Pack { code, .. } => *code,
        }
    }
}

impl<E: fmt::Display> fmt::Display for BuildError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontRenderFailure { code, error } => {
                write!(f, "failed to render character code {code}: {error}")
            }
            Self::Pack { code, error } => {
                write!(f, "failed to pack character code {code}: {error}")
            }
        }
    }
}

impl<E: error::Error + 'static> error::Error for BuildError<E> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::FontRenderFailure { error, .. } => Some(error),
            Self::Pack { error, .. } => Some(error),
        }
    }
}
