//! Glyph images and packing of glyph images into packed rows.

use alloc::{vec, vec::Vec};
use core::{error, fmt};

/// The maximum supported width of a glyph, in pixels.
pub const MAX_GLYPH_WIDTH: u8 = 16;

/// The dimensions of a glyph cell, in pixels.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cell {
    /// The width of the cell.
    pub width: u8,
    /// The height of the cell.
    pub height: u8,
}

impl Cell {
    /// Creates a new [`Cell`].
    pub const fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    /// Returns the number of pixels in the [`Cell`].
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangular grid of on/off pixels representing a single glyph.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PixelGrid {
    /// The dimensions of the grid.
    cell: Cell,
    /// Row-major pixel values.
    pixels: Vec<bool>,
}

impl PixelGrid {
    /// Creates a new [`PixelGrid`] with every pixel in the background.
    pub fn new(cell: Cell) -> Self {
        Self {
            cell,
            pixels: vec![false; cell.area()],
        }
    }

    /// Creates a new [`PixelGrid`] where the pixel at (`x`, `y`) is `f(x, y)`.
    pub fn from_fn<F: FnMut(u8, u8) -> bool>(cell: Cell, mut f: F) -> Self {
        let mut pixels = Vec::with_capacity(cell.area());
        for y in 0..cell.height {
            for x in 0..cell.width {
                pixels.push(f(x, y));
            }
        }

        Self { cell, pixels }
    }

    /// Creates a new [`PixelGrid`] from row-major coverage values, as produced by an
    /// anti-aliasing rasterizer.
    ///
    /// Any coverage greater than zero is treated as foreground. Returns `None` if `coverage`
    /// does not hold exactly one value per pixel of `cell`.
    pub fn from_coverage(cell: Cell, coverage: &[u8]) -> Option<Self> {
        if coverage.len() != cell.area() {
            return None;
        }

        let pixels = coverage.iter().map(|&value| value > 0).collect();
        Some(Self { cell, pixels })
    }

    /// Returns the dimensions of the [`PixelGrid`].
    pub const fn cell(&self) -> Cell {
        self.cell
    }

    /// Returns whether the pixel at (`x`, `y`) is in the foreground, or `None` if out of bounds.
    pub fn get(&self, x: u8, y: u8) -> Option<bool> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Sets the pixel at (`x`, `y`). Returns `false` if the pixel is out of bounds.
    pub fn set(&mut self, x: u8, y: u8, value: bool) -> bool {
        match self.index(x, y) {
            Some(index) => {
                self.pixels[index] = value;
                true
            }
            None => false,
        }
    }

    /// Returns the pixels of row `y` from left to right.
    pub fn row(&self, y: u8) -> Option<&[bool]> {
        if y >= self.cell.height {
            return None;
        }

        let width = usize::from(self.cell.width);
        let start = usize::from(y) * width;
        self.pixels.get(start..start + width)
    }

    /// Returns an [`Iterator`] over the rows of the [`PixelGrid`].
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        (0..self.cell.height).filter_map(|y| self.row(y))
    }

    fn index(&self, x: u8, y: u8) -> Option<usize> {
        if x >= self.cell.width || y >= self.cell.height {
            return None;
        }

        Some(usize::from(y) * usize::from(self.cell.width) + usize::from(x))
    }
}

/// Packs a single row of pixels into an integer with the leftmost pixel in the most significant
/// used bit.
///
/// # Errors
///
/// Returns [`PackError::UnsupportedWidth`] if `pixels` is wider than [`MAX_GLYPH_WIDTH`].
pub fn pack_row(pixels: &[bool]) -> Result<u16, PackError> {
    if pixels.len() > usize::from(MAX_GLYPH_WIDTH) {
        return Err(PackError::UnsupportedWidth(pixels.len()));
    }

    let width = pixels.len();
    let mut row = 0u16;
    for (x, _) in pixels.iter().enumerate().filter(|(_, on)| **on) {
        row |= 1 << (width - 1 - x);
    }

    Ok(row)
}

/// Packs `grid` into `cell.height` packed rows.
///
/// # Errors
///
/// - [`PackError::InvalidGlyphDimensions`]: Returned if `grid` is not exactly `cell` sized.
/// - [`PackError::UnsupportedWidth`]: Returned if `cell` is wider than [`MAX_GLYPH_WIDTH`].
pub fn pack_glyph(grid: &PixelGrid, cell: Cell) -> Result<Vec<u16>, PackError> {
    if grid.cell() != cell {
        return Err(PackError::InvalidGlyphDimensions {
            expected: cell,
            actual: grid.cell(),
        });
    }

    if cell.width > MAX_GLYPH_WIDTH {
        return Err(PackError::UnsupportedWidth(usize::from(cell.width)));
    }

    grid.rows().map(pack_row).collect()
}

/// Various errors that can occur while packing a glyph.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum PackError {
    /// The glyph does not have the dimensions of the target cell.
    InvalidGlyphDimensions {
        /// The dimensions of the target cell.
        expected: Cell,
        /// The dimensions of the glyph.
        actual: Cell,
    },
    /// The glyph is wider than [`MAX_GLYPH_WIDTH`].
    UnsupportedWidth(usize),
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGlyphDimensions { expected, actual } => {
                write!(f, "invalid glyph dimensions: expected {expected} but got {actual}")
            }
            Self::UnsupportedWidth(width) => write!(
                f,
                "unsupported glyph width: {width} pixels exceeds the maximum of {MAX_GLYPH_WIDTH}"
            ),
        }
    }
}

impl error::Error for PackError {}

#[cfg(test)]
mod test {
    use alloc::vec::Vec;

    use super::{Cell, PackError, PixelGrid, pack_glyph, pack_row};

    /// Reconstructs the pixels of a row using the same MSB-left convention as [`pack_row`].
    fn unpack_row(row: u16, width: u8) -> Vec<bool> {
        (0..width)
            .map(|x| (row >> (width - 1 - x)) & 1 == 1)
            .collect()
    }

    #[test]
    fn outer_pixels() {
        let row = [true, false, false, false, false, false, false, true];
        assert_eq!(pack_row(&row), Ok(0x81));
    }

    #[test]
    fn row_widths() {
        assert_eq!(pack_row(&[]), Ok(0));
        assert_eq!(pack_row(&[true]), Ok(0b1));
        assert_eq!(pack_row(&[true, false, true]), Ok(0b101));
        assert_eq!(pack_row(&[true; 16]), Ok(0xFFFF));
        assert_eq!(pack_row(&[true; 17]), Err(PackError::UnsupportedWidth(17)));
    }

    #[test]
    fn pack_unpack_round_trip() {
        // A handful of deterministic patterns across several cell sizes.
        let cells = [Cell::new(8, 16), Cell::new(5, 7), Cell::new(16, 16), Cell::new(12, 3)];
        let patterns: [fn(u8, u8) -> bool; 4] = [
            |x, y| (x + y) % 2 == 0,
            |x, y| x == y,
            |x, y| (u16::from(x) * 7 + u16::from(y) * 13) % 5 < 2,
            |x, _| x == 0,
        ];

        for cell in cells {
            for pattern in patterns {
                let grid = PixelGrid::from_fn(cell, pattern);
                let rows = pack_glyph(&grid, cell).unwrap();
                assert_eq!(rows.len(), usize::from(cell.height));

                let rebuilt = PixelGrid::from_fn(cell, |x, y| {
                    unpack_row(rows[usize::from(y)], cell.width)[usize::from(x)]
                });
                assert_eq!(rebuilt, grid);
                assert!(rows.iter().all(|row| u32::from(*row) < 1 << cell.width));
            }
        }
    }

    #[test]
    fn wrong_dimensions() {
        let grid = PixelGrid::new(Cell::new(8, 8));
        assert_eq!(
            pack_glyph(&grid, Cell::new(8, 16)),
            Err(PackError::InvalidGlyphDimensions {
                expected: Cell::new(8, 16),
                actual: Cell::new(8, 8),
            })
        );
    }

    #[test]
    fn coverage_threshold() {
        let cell = Cell::new(4, 1);
        let grid = PixelGrid::from_coverage(cell, &[0, 1, 128, 255]).unwrap();
        assert_eq!(pack_glyph(&grid, cell), Ok(alloc::vec![0b0111]));

        assert!(PixelGrid::from_coverage(cell, &[0, 1, 2]).is_none());
    }

    #[test]
    fn set_and_get() {
        let mut grid = PixelGrid::new(Cell::new(3, 2));
        assert!(grid.set(2, 1, true));
        assert!(!grid.set(3, 1, true));
        assert_eq!(grid.get(2, 1), Some(true));
        assert_eq!(grid.get(0, 0), Some(false));
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.row(1), Some(&[false, false, true][..]));
    }
}
