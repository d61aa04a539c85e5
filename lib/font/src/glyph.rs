//! Read-only views over packed glyph data.
//!
//! A packed glyph is stored as `height` rows, each row taking `width.div_ceil(8)` bytes. A row
//! holds its packed-row value in big-endian order: bit `width - 1 - x` of the value is set iff
//! pixel `x` of that row is in the foreground. For 8 pixel wide glyphs this is the conventional
//! one byte per row VGA layout, with the most significant bit at the left edge of the glyph.

use core::{error, fmt};

/// Size in bytes of a standard F16 font blob (256 glyphs of 8x16 pixels).
pub const F16_BLOB_SIZE: usize = 4096;
/// Number of rows per glyph in a standard F16 font blob.
pub const F16_ROWS_PER_GLYPH: u8 = 16;

/// An array of [`Glyph`]s.
///
/// The buffer does not need to hold a whole number of glyphs: rows following the last full
/// [`Glyph`] form a short trailing group, accessible through [`GlyphArray::trailing_rows()`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphArray<'buffer> {
    /// The buffer that contains the glyph data.
    buffer: &'buffer [u8],
    /// The width of each glyph.
    width: u8,
    /// The height of each glyph.
    height: u8,
}

impl<'buffer> GlyphArray<'buffer> {
    /// Creates a new [`GlyphArray`].
    pub const fn new(buffer: &'buffer [u8], width: u8, height: u8) -> Self {
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Returns the [`Glyph`] at `index` or `None` if out of bounds or if the glyph at `index` is
    /// not complete.
    pub fn get(&self, index: usize) -> Option<Glyph<'buffer>> {
        if index >= self.glyph_count() {
            return None;
        }

        let glyph_byte_count = self.glyph_byte_count();
        let start = index * glyph_byte_count;

        let glyph = Glyph {
            buffer: &self.buffer[start..start + glyph_byte_count],
            width: self.width,
            height: self.height,
        };
        Some(glyph)
    }

    /// Returns an [`Iterator`] over the complete [`Glyph`]s in this [`GlyphArray`].
    pub fn iter(&self) -> impl Iterator<Item = Glyph<'buffer>> + '_ {
        (0..self.glyph_count()).filter_map(|index| self.get(index))
    }

    /// Returns the width of a [`Glyph`] in pixels.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the height of a [`Glyph`] in pixels.
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the number of bytes used to store a single row.
    pub const fn row_byte_count(&self) -> usize {
        self.width.div_ceil(8) as usize
    }

    /// Returns the number of complete [`Glyph`]s in this [`GlyphArray`].
    pub const fn glyph_count(&self) -> usize {
        match self.buffer.len().checked_div(self.glyph_byte_count()) {
            Some(count) => count,
            None => 0,
        }
    }

    /// Returns the number of glyph groups, counting a short trailing group as a group.
    pub const fn group_count(&self) -> usize {
        match self.height {
            0 => 0,
            height => self.row_count().div_ceil(height as usize),
        }
    }

    /// Returns the number of complete rows in this [`GlyphArray`], including those of a short
    /// trailing group.
    pub const fn row_count(&self) -> usize {
        match self.buffer.len().checked_div(self.row_byte_count()) {
            Some(count) => count,
            None => 0,
        }
    }

    /// Returns the number of rows that follow the last complete [`Glyph`].
    pub const fn trailing_rows(&self) -> usize {
        self.row_count() - self.glyph_count() * self.height as usize
    }

    /// Returns the packed value of the row at `index`, counting rows across all glyphs.
    pub fn row(&self, index: usize) -> Option<u16> {
        let row_byte_count = self.row_byte_count();
        let start = index.checked_mul(row_byte_count)?;
        let bytes = self.buffer.get(start..start.checked_add(row_byte_count)?)?;

        Some(row_value(bytes))
    }

    /// Returns the underlying buffer.
    pub const fn as_bytes(&self) -> &'buffer [u8] {
        self.buffer
    }

    const fn glyph_byte_count(&self) -> usize {
        self.row_byte_count() * self.height as usize
    }
}

/// Stores the on/off layout of a specific glyph in a font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph<'buffer> {
    /// The buffer utilized to store the glyph.
    buffer: &'buffer [u8],
    /// The width of each glyph.
    width: u8,
    /// The height of each glyph.
    height: u8,
}

impl<'buffer> Glyph<'buffer> {
    /// Returns the width of the [`Glyph`] in pixels.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the height of the [`Glyph`] in pixels.
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the [`GlyphRow`] at `y` or `None` if out of bounds.
    pub fn row(&self, y: u8) -> Option<GlyphRow<'buffer>> {
        self.into_iter().nth(usize::from(y))
    }

    /// Returns whether the pixel at (`x`, `y`) is in the foreground.
    pub fn pixel(&self, x: u8, y: u8) -> Option<bool> {
        self.row(y)?.into_iter().nth(usize::from(x))
    }
}

impl<'buffer> IntoIterator for Glyph<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowsIter {
            buffer: self.buffer,
            width: self.width,
            height: self.height,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the rows of a [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowsIter<'buffer> {
    /// The buffer utilized to store the glyph.
    buffer: &'buffer [u8],
    /// The width of each glyph.
    width: u8,
    /// The height of each glyph.
    height: u8,
    /// The index of the row that will be returned next.
    index: u8,
}

impl<'buffer> Iterator for GlyphRowsIter<'buffer> {
    type Item = GlyphRow<'buffer>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.height {
            return None;
        }

        let row_byte_count = usize::from(self.width.div_ceil(8));
        let row_index = row_byte_count * usize::from(self.index);

        self.index += 1;
        let row = GlyphRow {
            buffer: self.buffer.get(row_index..row_index + row_byte_count)?,
            width: self.width,
        };
        Some(row)
    }
}

/// A row in the [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow<'buffer> {
    /// The buffer utilized to store the glyph row.
    buffer: &'buffer [u8],
    /// The width of the row.
    width: u8,
}

impl GlyphRow<'_> {
    /// Returns the packed value of this row.
    pub fn value(&self) -> u16 {
        row_value(self.buffer)
    }
}

impl IntoIterator for GlyphRow<'_> {
    type Item = bool;
    type IntoIter = GlyphRowIter;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowIter {
            value: self.value(),
            width: self.width,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the pixels in a [`GlyphRow`], from left to right.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowIter {
    /// The packed value of the row.
    value: u16,
    /// The width of the row.
    width: u8,
    /// The index of the pixel value to be returned.
    index: u8,
}

impl Iterator for GlyphRowIter {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.width {
            return None;
        }

        let shift = u32::from(self.width - 1 - self.index);
        let bit = self.value.checked_shr(shift).unwrap_or(0) & 0b1;

        self.index += 1;
        Some(bit == 1)
    }
}

fn row_value(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |value, &byte| (value << 8) | u16::from(byte))
}

/// Checks the size of a raw font blob against the size expected for its format.
///
/// A mismatch is not fatal: the blob can still be serialized, but the caller should warn that
/// the result needs to be re-validated.
pub fn check_blob_size(actual: usize, expected: usize) -> Option<UnexpectedBlobSize> {
    if actual == expected {
        return None;
    }

    Some(UnexpectedBlobSize { actual, expected })
}

/// Warning produced when a raw font blob does not have the expected size.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct UnexpectedBlobSize {
    /// The size of the blob in bytes.
    pub actual: usize,
    /// The size expected for the blob's format.
    pub expected: usize,
}

impl fmt::Display for UnexpectedBlobSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "blob size is {} bytes, expected {} bytes",
            self.actual, self.expected
        )
    }
}

impl error::Error for UnexpectedBlobSize {}

#[cfg(test)]
mod test {
    use super::{F16_BLOB_SIZE, F16_ROWS_PER_GLYPH, GlyphArray, check_blob_size};

    #[test]
    fn full_f16_blob() {
        let blob = [0xAA; F16_BLOB_SIZE];
        let array = GlyphArray::new(&blob, 8, F16_ROWS_PER_GLYPH);

        assert_eq!(array.glyph_count(), 256);
        assert_eq!(array.group_count(), 256);
        assert_eq!(array.trailing_rows(), 0);
        assert!(array.iter().all(|glyph| glyph.into_iter().count() == 16));
        assert_eq!(check_blob_size(blob.len(), F16_BLOB_SIZE), None);
    }

    #[test]
    fn short_f16_blob() {
        let blob = [0x00; F16_BLOB_SIZE - 1];
        let array = GlyphArray::new(&blob, 8, F16_ROWS_PER_GLYPH);

        assert_eq!(array.glyph_count(), 255);
        assert_eq!(array.group_count(), 256);
        assert_eq!(array.trailing_rows(), 15);
        assert!(array.get(255).is_none());
        assert_eq!(array.row(F16_BLOB_SIZE - 2), Some(0));
        assert_eq!(array.row(F16_BLOB_SIZE - 1), None);

        let warning = check_blob_size(blob.len(), F16_BLOB_SIZE).unwrap();
        assert_eq!(warning.actual, 4095);
        assert_eq!(warning.expected, 4096);
    }

    #[test]
    fn narrow_rows_read_msb_first() {
        let array = GlyphArray::new(&[0x81, 0x40], 8, 2);
        let glyph = array.get(0).unwrap();

        let first: [bool; 8] = core::array::from_fn(|x| glyph.pixel(x as u8, 0).unwrap());
        assert_eq!(first, [true, false, false, false, false, false, false, true]);
        assert_eq!(glyph.pixel(1, 1), Some(true));
        assert_eq!(glyph.pixel(8, 0), None);
    }

    #[test]
    fn wide_rows_are_big_endian_values() {
        // 12 pixels wide: only the low 12 bits of each value are used.
        let array = GlyphArray::new(&[0x08, 0x01, 0x0F, 0xFF], 12, 2);
        let glyph = array.get(0).unwrap();

        assert_eq!(array.row_byte_count(), 2);
        assert_eq!(array.row(0), Some(0x0801));
        assert_eq!(glyph.pixel(0, 0), Some(true));
        assert_eq!(glyph.pixel(11, 0), Some(true));
        assert_eq!(glyph.pixel(1, 0), Some(false));
        assert!(glyph.row(1).unwrap().into_iter().all(|pixel| pixel));
    }

    #[test]
    fn degenerate_dimensions() {
        let array = GlyphArray::new(&[0xFF; 4], 8, 0);
        assert_eq!(array.glyph_count(), 0);
        assert_eq!(array.group_count(), 0);

        let array = GlyphArray::new(&[0xFF; 4], 0, 4);
        assert_eq!(array.row_count(), 0);
        assert_eq!(array.glyph_count(), 0);
    }
}
