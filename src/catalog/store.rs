use crate::error::{ExtractError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::entry::Catalog;

/// Suffix of the catalog file of a language
pub const CATALOG_SUFFIX: &str = ".json";

/// Suffix of the outdated sibling file of a language
pub const OUTDATED_SUFFIX: &str = ".outdated.json";

/// Reads and writes the JSON catalogs of one locales directory
#[derive(Debug, Clone)]
pub struct CatalogStore {
    locales_dir: PathBuf,
}

impl CatalogStore {
    pub fn new(locales_dir: impl Into<PathBuf>) -> Self {
        Self {
            locales_dir: locales_dir.into(),
        }
    }

    pub fn locales_dir(&self) -> &Path {
        &self.locales_dir
    }

    /// `<locales>/<language>.json`
    pub fn catalog_path(&self, language: &str) -> PathBuf {
        self.locales_dir.join(format!("{}{}", language, CATALOG_SUFFIX))
    }

    /// `<locales>/<language>.outdated.json`
    pub fn outdated_path(&self, language: &str) -> PathBuf {
        self.locales_dir.join(format!("{}{}", language, OUTDATED_SUFFIX))
    }

    /// File names in the locales directory, sorted. A missing directory has none.
    pub fn list_catalog_files(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.locales_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Parse the catalog at `path`; an absent (or blank) file is an empty catalog.
    pub fn read(&self, path: &Path) -> Result<Catalog> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Catalog::new()),
            Err(e) => {
                return Err(ExtractError::catalog_parse_error(
                    path,
                    format!("Failed to read file: {}", e),
                ))
            }
        };

        if content.trim().is_empty() {
            return Ok(Catalog::new());
        }

        let catalog: Catalog = serde_json::from_str(&content).map_err(|e| {
            ExtractError::catalog_parse_error(path, format!("Invalid catalog: {}", e))
        })?;
        debug!("read {} entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Write `catalog` as pretty-printed JSON, creating the parent directory.
    pub fn write(&self, path: &Path, catalog: &Catalog) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ExtractError::write_error(parent, e))?;
        }
        let data = serde_json::to_string_pretty(catalog)
            .map_err(|e| ExtractError::Generic(format!("Failed to serialize catalog: {}", e)))?;
        fs::write(path, data).map_err(|e| ExtractError::write_error(path, e))?;
        debug!("wrote {} entries to {}", catalog.len(), path.display());
        Ok(())
    }

    /// Remove the file at `path`. Returns whether a file was removed.
    pub fn delete(&self, path: &Path) -> Result<bool> {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("removed {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ExtractError::write_error(path, e)),
        }
    }
}
