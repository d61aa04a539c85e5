//! Helper functions to generate a C header given a [`HeaderConfig`].

use std::fs;

use anyhow::{Context, Result};

use crate::{
    cli::header::HeaderConfig,
    declarations::{extract_declarations, include_guard, render_header},
};

/// Scans the C source file named by `config` and writes a header with its function declarations.
///
/// # Errors
///
/// Returns errors if the source file cannot be read or the header cannot be written.
pub fn create_header(config: &HeaderConfig) -> Result<()> {
    let source = fs::read_to_string(&config.source)
        .with_context(|| format!("error reading \"{}\"", config.source.display()))?;

    let declarations = extract_declarations(&source);
    if declarations.is_empty() {
        log::warn!(
            "no single-line function declarations found in \"{}\"",
            config.source.display()
        );
    }

    let header = render_header(&include_guard(&config.header), &declarations);
    fs::write(&config.header, header)
        .with_context(|| format!("error writing \"{}\"", config.header.display()))?;

    log::info!(
        "header file \"{}\" created with {} declarations",
        config.header.display(),
        declarations.len()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::create_header;
    use crate::cli::header::HeaderConfig;

    #[test]
    fn writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("echo.c");
        let header = dir.path().join("echo.h");
        fs::write(&source, "void echo(const char *message);\nint x;\n").unwrap();

        create_header(&HeaderConfig {
            source,
            header: header.clone(),
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(header).unwrap(),
            "#ifndef ECHO_H\n#define ECHO_H\n\nvoid echo(const char *message);\n\n#endif // ECHO_H\n"
        );
    }

    #[test]
    fn missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = HeaderConfig {
            source: dir.path().join("missing.c"),
            header: dir.path().join("missing.h"),
        };

        let error = create_header(&config).unwrap_err();
        assert!(error.to_string().contains("missing.c"));
        assert!(!config.header.exists());
    }
}
