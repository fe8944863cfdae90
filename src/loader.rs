//! Template source loading.
//! Reads raw template text from storage; caching is left to the caller.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Trait for loading raw template text.
pub trait TemplateLoader {
    /// Loads the template stored at `file`.
    ///
    /// # Arguments
    /// * `file` - Fully resolved template file name, extension included
    ///
    /// # Returns
    /// * `Result<String>` - Raw template text
    fn load(&self, file: &Path) -> Result<String>;
}

/// Loader for templates on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemLoader;

impl FileSystemLoader {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateLoader for FileSystemLoader {
    /// Reads a template file.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the file does not exist
    /// * `Error::TemplateReadError` if the file exists but cannot be read as UTF-8 text
    fn load(&self, file: &Path) -> Result<String> {
        if !file.exists() {
            return Err(Error::TemplateNotFound { path: file.to_path_buf() });
        }

        debug!("Loading template from {}", file.display());
        fs::read_to_string(file)
            .map_err(|source| Error::TemplateReadError { path: file.to_path_buf(), source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("page.mustache");
        fs::write(&file, "Hello {{name}}").unwrap();

        assert_eq!(FileSystemLoader::new().load(&file).unwrap(), "Hello {{name}}");
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("missing.mustache");

        match FileSystemLoader::new().load(&file) {
            Err(Error::TemplateNotFound { path }) => assert_eq!(path, file),
            other => panic!("Expected TemplateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("binary.mustache");
        fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            FileSystemLoader::new().load(&file),
            Err(Error::TemplateReadError { .. })
        ));

        // A directory exists but is not readable as a file.
        assert!(matches!(
            FileSystemLoader::new().load(temp_dir.path()),
            Err(Error::TemplateReadError { .. })
        ));
    }
}
