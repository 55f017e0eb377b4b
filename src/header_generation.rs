use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::signature::{self, Pattern, Signature};

const POINT_TYPEDEF: &str = "typedef struct {\n    int x;\n    int y;\n} point_t;\n";

/// Renders the C header for the exported surface.
pub struct HeaderGenerator {
    guard: String,
    functions: Vec<Signature>,
}

impl HeaderGenerator {
    pub fn new() -> Self {
        Self {
            guard: format!("{}_H", env!("CARGO_PKG_NAME").replace('-', "_").to_uppercase()),
            functions: signature::catalog(),
        }
    }

    pub fn guard(&self) -> &str {
        &self.guard
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "/* Generated by {} {}. Do not edit. */\n",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        out.push_str(&format!("#ifndef {0}\n#define {0}\n\n", self.guard));
        out.push_str("#include <stddef.h>\n\n");
        out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");
        out.push_str(POINT_TYPEDEF);

        let mut current: Option<Pattern> = None;
        for function in &self.functions {
            if current != Some(function.pattern) {
                out.push_str(&format!("\n/* {} */\n", function.pattern.title()));
                current = Some(function.pattern);
            }
            out.push_str(&format!("{};\n", function.prototype()));
        }

        out.push_str("\n#ifdef __cplusplus\n}\n#endif\n\n");
        out.push_str(&format!("#endif /* {} */\n", self.guard));

        out
    }

    pub fn write_header(&self, path: &Path) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create header directory: {}", parent.display()))?;
        }

        fs::write(path, self.render())
            .with_context(|| format!("Failed to write header to {}", path.display()))?;

        debug!(path = %path.display(), "wrote header");

        Ok(path.to_path_buf())
    }
}

impl Default for HeaderGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard() {
        assert_eq!(HeaderGenerator::new().guard(), "CFIXTURE_H");
    }

    #[test]
    fn test_render_contains_prototypes() {
        let header = HeaderGenerator::new().render();

        assert!(header.contains("int myint_succ(int i);\n"));
        assert!(header.contains("float *myfloatp_null(float i);\n"));
        assert!(header.contains("int myint_add_array(int j, int *a, int n);\n"));
        assert!(header.contains("point_t *point_setx(point_t *p, int x);\n"));
        assert!(header.contains("double point_dist(point_t *p1, point_t *p2);\n"));
    }

    #[test]
    fn test_typedef_precedes_point_functions() {
        let header = HeaderGenerator::new().render();
        let typedef = header.find("} point_t;").unwrap();
        let first_use = header.find("point_t *make_point").unwrap();
        assert!(typedef < first_use);
    }

    #[test]
    fn test_sections_in_order() {
        let header = HeaderGenerator::new().render();
        let integer = header.find("/* Integer in/out */").unwrap();
        let arrays = header.find("/* Fixed-size array mutation */").unwrap();
        let structs = header.find("/* Struct lifecycle and accessors */").unwrap();
        assert!(integer < arrays && arrays < structs);
        assert_eq!(header.matches("/* Integer in/out */").count(), 1);
    }

    #[test]
    fn test_one_prototype_per_function() {
        let generator = HeaderGenerator::new();
        let header = generator.render();
        assert!(header.starts_with("/* Generated by cfixture "));
        assert_eq!(header.matches(");\n").count(), signature::catalog().len());
    }

    #[test]
    fn test_guard_wraps_everything() {
        let header = HeaderGenerator::new().render();
        assert!(header.contains("#ifndef CFIXTURE_H\n#define CFIXTURE_H\n"));
        assert!(header.trim_end().ends_with("#endif /* CFIXTURE_H */"));
    }
}
