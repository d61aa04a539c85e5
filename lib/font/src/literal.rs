//! Serialization of packed rows as array literals suitable for embedding into source code.
//!
//! Serialization is a pure function of its input: the same rows and [`LiteralConfig`] always
//! produce identical text. Line wrapping only changes whitespace.

use alloc::string::String;
use core::{error, fmt, num::NonZeroUsize};

use crate::{glyph::GlyphArray, table::GlyphTable};

/// The default number of values per line for [`Layout::Flat`] literals.
pub const DEFAULT_VALUES_PER_LINE: NonZeroUsize = NonZeroUsize::new(12).unwrap();

/// A source of packed rows, grouped into glyphs.
pub trait RowSource {
    /// The width of each packed row, in bits.
    fn row_width(&self) -> u8;

    /// The number of rows forming a glyph.
    fn rows_per_glyph(&self) -> u8;

    /// The total number of rows.
    fn row_count(&self) -> usize;

    /// Returns the packed value of the row at `index`.
    fn row(&self, index: usize) -> Option<u16>;
}

impl RowSource for GlyphArray<'_> {
    fn row_width(&self) -> u8 {
        self.width()
    }

    fn rows_per_glyph(&self) -> u8 {
        self.height()
    }

    fn row_count(&self) -> usize {
        GlyphArray::row_count(self)
    }

    fn row(&self, index: usize) -> Option<u16> {
        GlyphArray::row(self, index)
    }
}

impl RowSource for GlyphTable {
    fn row_width(&self) -> u8 {
        self.cell().width
    }

    fn rows_per_glyph(&self) -> u8 {
        self.cell().height
    }

    fn row_count(&self) -> usize {
        self.glyphs().row_count()
    }

    fn row(&self, index: usize) -> Option<u16> {
        self.glyphs().row(index)
    }
}

/// The language whose array declaration syntax is emitted.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum ArraySyntax {
    /// `static unsigned char name[96][16] = { { 0x00, ... }, ... };`
    #[default]
    C,
    /// `static NAME: [[u8; 16]; 96] = [[0x00, ...], ...];`
    Rust,
}

/// The shape of the emitted array.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Layout {
    /// A single dimension array holding every row.
    Flat,
    /// A two dimensional array with one group of rows per glyph.
    #[default]
    Grouped,
}

/// The integer type of each array element.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum ElementWidth {
    /// 8-bit unsigned elements.
    #[default]
    U8,
    /// 16-bit unsigned elements.
    U16,
}

impl ElementWidth {
    /// Returns the number of bits in an element.
    pub const fn bits(&self) -> u8 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
        }
    }

    /// Returns the narrowest [`ElementWidth`] able to hold rows of `row_width` bits.
    pub const fn for_row_width(row_width: u8) -> Option<Self> {
        match row_width {
            0..=8 => Some(Self::U8),
            9..=16 => Some(Self::U16),
            _ => None,
        }
    }

    const fn hex_digits(&self) -> usize {
        match self {
            Self::U8 => 2,
            Self::U16 => 4,
        }
    }

    fn type_name(&self, syntax: ArraySyntax, fixed_width_types: bool) -> &'static str {
        match (syntax, self, fixed_width_types) {
            (ArraySyntax::C, Self::U8, true) => "uint8_t",
            (ArraySyntax::C, Self::U16, true) => "uint16_t",
            (ArraySyntax::C, Self::U8, false) => "unsigned char",
            (ArraySyntax::C, Self::U16, false) => "unsigned short",
            (ArraySyntax::Rust, Self::U8, _) => "u8",
            (ArraySyntax::Rust, Self::U16, _) => "u16",
        }
    }
}

/// The case of the hexadecimal digits of each value.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum HexCase {
    /// `0xab`
    #[default]
    Lower,
    /// `0xAB`
    Upper,
}

/// Configuration of the emitted array literal.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct LiteralConfig<'a> {
    /// The name of the array.
    pub symbol: &'a str,
    /// The declaration syntax.
    pub syntax: ArraySyntax,
    /// The shape of the array.
    pub layout: Layout,
    /// The element type.
    pub element: ElementWidth,
    /// The case of hexadecimal digits.
    pub hex_case: HexCase,
    /// The number of values after which a line break is inserted. `None` never breaks within a
    /// glyph (for [`Layout::Grouped`]) or within the array (for [`Layout::Flat`]).
    pub values_per_line: Option<NonZeroUsize>,
    /// Whether the array is declared constant.
    pub constant: bool,
    /// Whether C output uses `<stdint.h>` fixed-width types, including the header.
    pub fixed_width_types: bool,
    /// Name of the file the data was generated from, emitted as a leading comment.
    pub provenance: Option<&'a str>,
}

impl<'a> LiteralConfig<'a> {
    /// Creates a [`LiteralConfig`] for a two dimensional `unsigned char` array named `symbol`, one
    /// glyph per line.
    pub const fn grouped(symbol: &'a str) -> Self {
        Self {
            symbol,
            syntax: ArraySyntax::C,
            layout: Layout::Grouped,
            element: ElementWidth::U8,
            hex_case: HexCase::Upper,
            values_per_line: None,
            constant: false,
            fixed_width_types: false,
            provenance: None,
        }
    }

    /// Creates a [`LiteralConfig`] for a flat `const uint8_t` array named `symbol`, wrapped every
    /// [`DEFAULT_VALUES_PER_LINE`] values.
    pub const fn flat(symbol: &'a str) -> Self {
        Self {
            symbol,
            syntax: ArraySyntax::C,
            layout: Layout::Flat,
            element: ElementWidth::U8,
            hex_case: HexCase::Lower,
            values_per_line: Some(DEFAULT_VALUES_PER_LINE),
            constant: true,
            fixed_width_types: true,
            provenance: None,
        }
    }
}

/// Writes `source` into `writer` as an array literal described by `config`.
///
/// # Errors
///
/// - [`LiteralError::EmptyInput`]: Returned if `source` contains no rows.
/// - [`LiteralError::ElementTooNarrow`]: Returned if the rows of `source` do not fit in
///   `config.element`.
/// - [`LiteralError::Format`]: Returned if `writer` fails.
pub fn write_literal<W: fmt::Write, S: RowSource + ?Sized>(
    writer: &mut W,
    source: &S,
    config: &LiteralConfig<'_>,
) -> Result<(), LiteralError> {
    let row_count = source.row_count();
    if row_count == 0 {
        return Err(LiteralError::EmptyInput);
    }

    if source.row_width() > config.element.bits() {
        return Err(LiteralError::ElementTooNarrow {
            row_width: source.row_width(),
            element_bits: config.element.bits(),
        });
    }

    if config.syntax == ArraySyntax::C && config.fixed_width_types {
        writeln!(writer, "#include <stdint.h>")?;
    }
    if let Some(provenance) = config.provenance {
        writeln!(writer, "// generated from {provenance}")?;
    }

    let emitter = Emitter { config };
    match config.layout {
        Layout::Flat => emitter.write_flat(writer, source, row_count),
        Layout::Grouped => emitter.write_grouped(writer, source, row_count),
    }
}

/// Serializes `source` into a new [`String`] as an array literal described by `config`.
///
/// # Errors
///
/// Returns the same errors as [`write_literal()`].
pub fn to_literal<S: RowSource + ?Sized>(
    source: &S,
    config: &LiteralConfig<'_>,
) -> Result<String, LiteralError> {
    let mut output = String::new();
    write_literal(&mut output, source, config)?;
    Ok(output)
}

struct Emitter<'config, 'a> {
    config: &'config LiteralConfig<'a>,
}

impl Emitter<'_, '_> {
    const INDENT: &'static str = "    ";

    fn write_flat<W: fmt::Write, S: RowSource + ?Sized>(
        &self,
        writer: &mut W,
        source: &S,
        row_count: usize,
    ) -> Result<(), LiteralError> {
        self.write_declaration(writer, &[row_count])?;
        write!(writer, "{}", Self::INDENT)?;
        let rows = (0..row_count).map(|index| source.row(index).unwrap_or(0));
        self.write_values(writer, rows, Self::INDENT)?;
        writeln!(writer)?;
        self.write_closing(writer)
    }

    fn write_grouped<W: fmt::Write, S: RowSource + ?Sized>(
        &self,
        writer: &mut W,
        source: &S,
        row_count: usize,
    ) -> Result<(), LiteralError> {
        let rows_per_glyph = usize::from(source.rows_per_glyph()).max(1);
        let group_count = row_count.div_ceil(rows_per_glyph);
        self.write_declaration(writer, &[group_count, rows_per_glyph])?;

        let (open, close, continuation) = match self.config.syntax {
            ArraySyntax::C => ("{ ", " }", "      "),
            ArraySyntax::Rust => ("[", "]", "     "),
        };

        for group in 0..group_count {
            let start = group * rows_per_glyph;
            let end = match self.config.syntax {
                // A short C initializer leaves the remaining rows zeroed.
                ArraySyntax::C => (start + rows_per_glyph).min(row_count),
                // Rust arrays must be complete, so missing rows are emitted as zero.
                ArraySyntax::Rust => start + rows_per_glyph,
            };
            let rows = (start..end).map(|index| source.row(index).unwrap_or(0));

            write!(writer, "{}{open}", Self::INDENT)?;
            self.write_values(writer, rows, continuation)?;
            writeln!(writer, "{close},")?;
        }

        self.write_closing(writer)
    }

    fn write_declaration<W: fmt::Write>(
        &self,
        writer: &mut W,
        dimensions: &[usize],
    ) -> Result<(), LiteralError> {
        let config = self.config;
        let element = config.element.type_name(config.syntax, config.fixed_width_types);

        match config.syntax {
            ArraySyntax::C => {
                let qualifiers = if config.constant {
                    "static const"
                } else {
                    "static"
                };
                write!(writer, "{qualifiers} {element} {}", config.symbol)?;
                for dimension in dimensions {
                    write!(writer, "[{dimension}]")?;
                }
                writeln!(writer, " = {{")?;
            }
            ArraySyntax::Rust => {
                let keyword = if config.constant { "const" } else { "static" };
                let mut ty = String::from(element);
                for dimension in dimensions.iter().rev() {
                    ty = alloc::format!("[{ty}; {dimension}]");
                }
                writeln!(writer, "{keyword} {}: {ty} = [", config.symbol)?;
            }
        }

        Ok(())
    }

    fn write_closing<W: fmt::Write>(&self, writer: &mut W) -> Result<(), LiteralError> {
        match self.config.syntax {
            ArraySyntax::C => writeln!(writer, "}};")?,
            ArraySyntax::Rust => writeln!(writer, "];")?,
        }

        Ok(())
    }

    /// Writes `values` separated by `", "`, breaking the line after every
    /// [`LiteralConfig::values_per_line`] values and indenting continuation lines with
    /// `continuation`.
    fn write_values<W: fmt::Write, I: Iterator<Item = u16>>(
        &self,
        writer: &mut W,
        values: I,
        continuation: &str,
    ) -> Result<(), LiteralError> {
        let digits = self.config.element.hex_digits();
        for (index, value) in values.enumerate() {
            if index != 0 {
                let wrap = self
                    .config
                    .values_per_line
                    .is_some_and(|per_line| index % per_line.get() == 0);
                if wrap {
                    write!(writer, ",\n{continuation}")?;
                } else {
                    write!(writer, ", ")?;
                }
            }

            match self.config.hex_case {
                HexCase::Lower => write!(writer, "0x{value:0digits$x}")?,
                HexCase::Upper => write!(writer, "0x{value:0digits$X}")?,
            }
        }

        Ok(())
    }
}

/// Various errors that can occur while serializing an array literal.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum LiteralError {
    /// There are no rows to serialize.
    EmptyInput,
    /// The rows are wider than the element type.
    ElementTooNarrow {
        /// The width of each row, in bits.
        row_width: u8,
        /// The width of the element type, in bits.
        element_bits: u8,
    },
    /// Writing the literal failed.
    Format,
}

impl From<fmt::Error> for LiteralError {
    fn from(_: fmt::Error) -> Self {
        Self::Format
    }
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "nothing to serialize"),
            Self::ElementTooNarrow {
                row_width,
                element_bits,
            } => write!(
                f,
                "{row_width} bit rows do not fit in {element_bits} bit elements"
            ),
            Self::Format => write!(f, "error writing array literal"),
        }
    }
}

impl error::Error for LiteralError {}

#[cfg(test)]
mod test {
    use alloc::{string::String, vec::Vec};
    use core::num::NonZeroUsize;

    use super::{ArraySyntax, ElementWidth, HexCase, Layout, LiteralConfig, LiteralError, to_literal};
    use crate::{
        glyph::{F16_BLOB_SIZE, F16_ROWS_PER_GLYPH, GlyphArray},
        pixel::{Cell, PixelGrid},
        table::GlyphTable,
    };

    fn tokens(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn grouped_c_table() {
        let cell = Cell::new(8, 2);
        let mut table = GlyphTable::new(32, cell).unwrap();
        table.push(&PixelGrid::new(cell)).unwrap();
        table
            .push(&PixelGrid::from_fn(cell, |x, y| y == 1 && (x == 0 || x == 7)))
            .unwrap();

        let text = to_literal(&table, &LiteralConfig::grouped("g_8x2_font")).unwrap();
        assert_eq!(
            text,
            "static unsigned char g_8x2_font[2][2] = {\n    { 0x00, 0x00 },\n    { 0x00, 0x81 },\n};\n"
        );
    }

    #[test]
    fn flat_c_blob_wraps_every_twelve() {
        let blob: Vec<u8> = (0..14).collect();
        let array = GlyphArray::new(&blob, 8, F16_ROWS_PER_GLYPH);
        let config = LiteralConfig {
            provenance: Some("font.f16"),
            ..LiteralConfig::flat("builtin_font")
        };

        let text = to_literal(&array, &config).unwrap();
        assert_eq!(
            text,
            "#include <stdint.h>\n\
             // generated from font.f16\n\
             static const uint8_t builtin_font[14] = {\n    \
             0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b,\n    \
             0x0c, 0x0d\n\
             };\n"
        );
    }

    #[test]
    fn wrapping_is_whitespace_only() {
        let blob: Vec<u8> = (0..=255).cycle().take(F16_BLOB_SIZE).collect();
        let array = GlyphArray::new(&blob, 8, F16_ROWS_PER_GLYPH);

        for layout in [Layout::Flat, Layout::Grouped] {
            for syntax in [ArraySyntax::C, ArraySyntax::Rust] {
                let wrapped = LiteralConfig {
                    layout,
                    syntax,
                    values_per_line: NonZeroUsize::new(12),
                    ..LiteralConfig::flat("font")
                };
                let unwrapped = LiteralConfig {
                    values_per_line: None,
                    ..wrapped
                };

                let wrapped = to_literal(&array, &wrapped).unwrap();
                let unwrapped = to_literal(&array, &unwrapped).unwrap();
                assert_ne!(wrapped, unwrapped);
                assert_eq!(tokens(&wrapped), tokens(&unwrapped));
            }
        }
    }

    #[test]
    fn deterministic() {
        let blob = [0x5A; 64];
        let array = GlyphArray::new(&blob, 8, 16);
        let config = LiteralConfig::flat("font");

        assert_eq!(to_literal(&array, &config), to_literal(&array, &config));
    }

    #[test]
    fn empty_input() {
        let array = GlyphArray::new(&[], 8, 16);
        assert_eq!(
            to_literal(&array, &LiteralConfig::flat("font")),
            Err(LiteralError::EmptyInput)
        );

        let table = GlyphTable::new(32, Cell::new(8, 16)).unwrap();
        assert_eq!(
            to_literal(&table, &LiteralConfig::grouped("font")),
            Err(LiteralError::EmptyInput)
        );
    }

    #[test]
    fn short_final_group() {
        let blob = [0xFF; 5];
        let array = GlyphArray::new(&blob, 8, 4);

        let c = LiteralConfig {
            hex_case: HexCase::Lower,
            ..LiteralConfig::grouped("font")
        };
        assert_eq!(
            to_literal(&array, &c).unwrap(),
            "static unsigned char font[2][4] = {\n    \
             { 0xff, 0xff, 0xff, 0xff },\n    \
             { 0xff },\n\
             };\n"
        );

        let rust = LiteralConfig {
            syntax: ArraySyntax::Rust,
            ..c
        };
        assert_eq!(
            to_literal(&array, &rust).unwrap(),
            "static font: [[u8; 4]; 2] = [\n    \
             [0xff, 0xff, 0xff, 0xff],\n    \
             [0xff, 0x00, 0x00, 0x00],\n\
             ];\n"
        );
    }

    #[test]
    fn wide_rows() {
        let cell = Cell::new(12, 1);
        let mut table = GlyphTable::new(0, cell).unwrap();
        table.push(&PixelGrid::from_fn(cell, |x, _| x == 0)).unwrap();

        let narrow = LiteralConfig::grouped("font");
        assert_eq!(
            to_literal(&table, &narrow),
            Err(LiteralError::ElementTooNarrow {
                row_width: 12,
                element_bits: 8
            })
        );

        let wide = LiteralConfig {
            element: ElementWidth::U16,
            syntax: ArraySyntax::Rust,
            constant: true,
            ..narrow
        };
        assert_eq!(
            to_literal(&table, &wide).unwrap(),
            "const font: [[u16; 1]; 1] = [\n    [0x0800],\n];\n"
        );
    }

    #[test]
    fn element_width_selection() {
        assert_eq!(ElementWidth::for_row_width(8), Some(ElementWidth::U8));
        assert_eq!(ElementWidth::for_row_width(9), Some(ElementWidth::U16));
        assert_eq!(ElementWidth::for_row_width(17), None);
    }
}
