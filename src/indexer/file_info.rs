//! Discovered source file awaiting extraction

use super::language::SourceLanguage;
use crate::error::ExtractionCause;
use std::fs;
use std::path::PathBuf;

/// A supported file found by the walker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// `/`-separated path relative to the walk root
    pub relative_path: String,
    pub language: SourceLanguage,
    /// Size in bytes at discovery time
    pub size: u64,
}

impl SourceFile {
    /// Read the file as UTF-8 text, refusing files over `max_file_size` bytes
    pub fn read_text(&self, max_file_size: u64) -> Result<String, ExtractionCause> {
        if self.size > max_file_size {
            return Err(ExtractionCause::TooLarge {
                size: self.size,
                max: max_file_size,
            });
        }

        let bytes = fs::read(&self.path).map_err(|e| ExtractionCause::ReadFailed(e.to_string()))?;
        String::from_utf8(bytes).map_err(|_| ExtractionCause::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source_file(path: PathBuf, size: u64) -> SourceFile {
        SourceFile {
            path,
            relative_path: "a.ts".to_string(),
            language: SourceLanguage::TypeScript,
            size,
        }
    }

    #[test]
    fn test_read_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.ts");
        fs::write(&path, "export const a = 1;\n").unwrap();

        let file = source_file(path, 20);
        assert_eq!(file.read_text(1024).unwrap(), "export const a = 1;\n");
    }

    #[test]
    fn test_read_text_too_large() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.ts");
        fs::write(&path, "x").unwrap();

        let file = source_file(path, 2048);
        assert_eq!(
            file.read_text(1024),
            Err(ExtractionCause::TooLarge {
                size: 2048,
                max: 1024
            })
        );
    }

    #[test]
    fn test_read_text_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.ts");
        fs::write(&path, [0x66, 0xff, 0xfe, 0x00]).unwrap();

        let file = source_file(path, 4);
        assert_eq!(file.read_text(1024), Err(ExtractionCause::InvalidUtf8));
    }

    #[test]
    fn test_read_text_missing_file() {
        let dir = TempDir::new().unwrap();
        let file = source_file(dir.path().join("gone.ts"), 0);
        assert!(matches!(
            file.read_text(1024),
            Err(ExtractionCause::ReadFailed(_))
        ));
    }
}
