//! Heuristic extraction of function declarations from C source files.
//!
//! This is not a C parser. Each line is matched on its own against a pattern of the form
//! `type name(params);`, so declarations spanning several lines, multi-word return types
//! (`unsigned int`), pointer returns and anything hidden behind the preprocessor are not found.

use std::{path::Path, sync::LazyLock};

use regex::Regex;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([a-zA-Z_][a-zA-Z0-9_]*\s+[a-zA-Z_][a-zA-Z0-9_]*\s*\([^)]*\)\s*;)\s*")
        .unwrap_or_else(|error| unreachable!("declaration pattern is invalid: {error}"))
});

/// Returns the single-line function declarations found in `source`, in order of appearance.
pub fn extract_declarations(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| DECLARATION.captures(line.trim()))
        .filter_map(|captures| captures.get(1))
        .map(|declaration| declaration.as_str().to_owned())
        .collect()
}

/// Returns the include guard macro for the header at `header_path`.
///
/// The guard is derived from the file name: it is upper-cased and every character that cannot
/// appear in a C identifier is replaced with `_`. Guards that would not start with a letter or `_`
/// are prefixed with `H_`.
pub fn include_guard(header_path: &Path) -> String {
    let name = header_path
        .file_name()
        .unwrap_or(header_path.as_os_str())
        .to_string_lossy();

    let mut guard: String = name
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => c.to_ascii_uppercase(),
            _ => '_',
        })
        .collect();
    if !guard.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        guard.insert_str(0, "H_");
    }

    guard
}

/// Renders a header guarded by `guard` that contains `declarations`.
pub fn render_header(guard: &str, declarations: &[String]) -> String {
    let mut header = format!("#ifndef {guard}\n#define {guard}\n\n");
    for declaration in declarations {
        header.push_str(declaration);
        header.push('\n');
    }
    header.push_str(&format!("\n#endif // {guard}\n"));

    header
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::{extract_declarations, include_guard, render_header};

    const SOURCE: &str = r#"
#include "kernel.h"

void kernel_main(void);
  int   strlen (const char *s) ;
static int counter;
unsigned int unsupported(void);
char *also_unsupported(void);
void multi_line(int a,
                int b);

void kernel_main(void) {
    return;
}
"#;

    #[test]
    fn single_line_declarations() {
        assert_eq!(
            extract_declarations(SOURCE),
            ["void kernel_main(void);", "int   strlen (const char *s) ;"]
        );
    }

    #[test]
    fn definitions_are_skipped() {
        assert!(extract_declarations("int main(void) {\n    return 0;\n}\n").is_empty());
    }

    #[test]
    fn guards() {
        assert_eq!(include_guard(Path::new("kernel.h")), "KERNEL_H");
        assert_eq!(include_guard(Path::new("../drivers/vga-text.h")), "VGA_TEXT_H");
        assert_eq!(include_guard(Path::new("_private.h")), "_PRIVATE_H");
    }

    #[test]
    fn guards_start_with_a_letter() {
        assert_eq!(include_guard(Path::new("3d.h")), "H_3D_H");
        assert_eq!(include_guard(Path::new("include/8x16-font.h")), "H_8X16_FONT_H");
    }

    #[test]
    fn header_layout() {
        let declarations = extract_declarations(SOURCE);
        assert_eq!(
            render_header("KERNEL_H", &declarations),
            "#ifndef KERNEL_H\n\
             #define KERNEL_H\n\
             \n\
             void kernel_main(void);\n\
             int   strlen (const char *s) ;\n\
             \n\
             #endif // KERNEL_H\n"
        );
    }

    #[test]
    fn empty_header() {
        assert_eq!(
            render_header("EMPTY_H", &[]),
            "#ifndef EMPTY_H\n#define EMPTY_H\n\n\n#endif // EMPTY_H\n"
        );
    }
}
