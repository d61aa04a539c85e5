//! Various items that are common between [`Action`][a] parsing and execution.
//!
//! [a]: crate::cli::Action

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::builder::PossibleValue;
use font::literal::{ArraySyntax, ElementWidth, HexCase, Layout};

/// Where generated text is written.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum Destination {
    /// Write to standard output.
    Stdout,
    /// Write to the file at the given path, replacing it if it exists.
    File(PathBuf),
}

impl Destination {
    /// Creates a [`Destination`] for `path`, or [`Destination::Stdout`] when no path is given.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Writes `text` verbatim to the [`Destination`].
    ///
    /// # Errors
    ///
    /// Returns errors if the file cannot be written or standard output is closed.
    pub fn write(&self, text: &str) -> Result<()> {
        match self {
            Self::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                stdout.flush()?;
            }
            Self::File(path) => {
                fs::write(path, text)
                    .with_context(|| format!("error writing \"{}\"", path.display()))?;
                log::info!("output written to \"{}\"", path.display());
            }
        }

        Ok(())
    }
}

/// The declaration syntax of the generated array.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Syntax {
    /// C array declarations.
    #[default]
    C,
    /// Rust `static` or `const` array items.
    Rust,
}

impl Syntax {
    /// Returns the textual representation of the [`Syntax`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Rust => "rust",
        }
    }
}

impl From<Syntax> for ArraySyntax {
    fn from(value: Syntax) -> Self {
        match value {
            Syntax::C => Self::C,
            Syntax::Rust => Self::Rust,
        }
    }
}

impl clap::ValueEnum for Syntax {
    fn value_variants<'a>() -> &'a [Self] {
        static SYNTAXES: &[Syntax] = &[Syntax::C, Syntax::Rust];

        SYNTAXES
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

/// The shape of the generated array.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum Shape {
    /// One dimension holding every row.
    #[default]
    Flat,
    /// One group of rows per glyph.
    Grouped,
}

impl Shape {
    /// Returns the textual representation of the [`Shape`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Grouped => "grouped",
        }
    }
}

impl From<Shape> for Layout {
    fn from(value: Shape) -> Self {
        match value {
            Shape::Flat => Self::Flat,
            Shape::Grouped => Self::Grouped,
        }
    }
}

impl clap::ValueEnum for Shape {
    fn value_variants<'a>() -> &'a [Self] {
        static SHAPES: &[Shape] = &[Shape::Flat, Shape::Grouped];

        SHAPES
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

/// The element type of the generated array.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Element {
    /// 8-bit elements.
    U8,
    /// 16-bit elements.
    U16,
}

impl Element {
    /// Returns the textual representation of the [`Element`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
        }
    }
}

impl From<Element> for ElementWidth {
    fn from(value: Element) -> Self {
        match value {
            Element::U8 => Self::U8,
            Element::U16 => Self::U16,
        }
    }
}

impl clap::ValueEnum for Element {
    fn value_variants<'a>() -> &'a [Self] {
        static ELEMENTS: &[Element] = &[Element::U8, Element::U16];

        ELEMENTS
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

/// The case of the hexadecimal digits in the generated array.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Case {
    /// Lowercase digits.
    Lower,
    /// Uppercase digits.
    Upper,
}

impl Case {
    /// Returns the textual representation of the [`Case`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
        }
    }
}

impl From<Case> for HexCase {
    fn from(value: Case) -> Self {
        match value {
            Case::Lower => Self::Lower,
            Case::Upper => Self::Upper,
        }
    }
}

impl clap::ValueEnum for Case {
    fn value_variants<'a>() -> &'a [Self] {
        static CASES: &[Case] = &[Case::Lower, Case::Upper];

        CASES
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.as_str()))
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::Destination;

    #[test]
    fn file_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.c");

        Destination::from_path(Some(path.clone()))
            .write("static unsigned char font[1][1] = {\n    { 0x00 },\n};\n")
            .unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with("static unsigned char"));
    }

    #[test]
    fn unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("font.c");

        let error = Destination::File(path).write("").unwrap_err();
        assert!(error.to_string().contains("font.c"));
    }

    #[test]
    fn no_path_is_stdout() {
        assert_eq!(Destination::from_path(None), Destination::Stdout);
    }
}
