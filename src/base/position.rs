//! Position tracking for declarations
//!
//! Stores the source location (file/line/character) of a declaration so that
//! documentation output can point back at the defining source.

use smol_str::SmolStr;

/// A location in source code.
///
/// `line` is 1-based (as shown to readers), `character` is 0-based.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub file_name: SmolStr,
    pub line: u32,
    pub character: u32,
    /// Declared outside the documented project (e.g. a dependency).
    pub is_external: bool,
}

impl SourceLocation {
    pub fn new(file_name: impl Into<SmolStr>, line: u32, character: u32) -> Self {
        Self {
            file_name: file_name.into(),
            line,
            character,
            is_external: false,
        }
    }

    /// Mark the location as belonging to an external source.
    pub fn external(mut self) -> Self {
        self.is_external = true;
        self
    }

    /// File name relative to `base_path`, using forward slashes.
    pub fn relative_file_name(&self, base_path: Option<&str>) -> String {
        let normalized = self.file_name.replace('\\', "/");
        match base_path {
            Some(base) if !base.is_empty() => {
                let base = base.replace('\\', "/");
                let base = base.trim_end_matches('/');
                normalized
                    .strip_prefix(base)
                    .map(|rest| rest.trim_start_matches('/').to_string())
                    .unwrap_or(normalized)
            }
            _ => normalized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_file_name_strips_base() {
        let loc = SourceLocation::new("/work/src/index.ts", 3, 0);
        assert_eq!(loc.relative_file_name(Some("/work/")), "src/index.ts");
        assert_eq!(loc.relative_file_name(Some("/other")), "/work/src/index.ts");
        assert_eq!(loc.relative_file_name(None), "/work/src/index.ts");
    }

    #[test]
    fn test_relative_file_name_normalizes_separators() {
        let loc = SourceLocation::new("C:\\work\\lib\\a.ts", 1, 4);
        assert_eq!(loc.relative_file_name(Some("C:\\work")), "lib/a.ts");
    }
}
