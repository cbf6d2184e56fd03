use crate::error::{ExtractError, Result};
use std::path::{Path, PathBuf};

use super::exclusions::default_exclusions;

/// Files whose presence marks a directory as the project root
pub const PROJECT_MARKERS: &[&str] = &["package.json"];

/// Directory (relative to the project root) holding the catalogs
pub const LOCALES_DIR_NAME: &str = "locales";

/// Directory (relative to the project root) scanned when no source dir is given
pub const DEFAULT_SOURCE_DIR_NAME: &str = "src";

/// Walk upward from `start` until a directory containing a project marker is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| PROJECT_MARKERS.iter().any(|m| dir.join(m).is_file()))
        .map(Path::to_path_buf)
        .ok_or_else(|| ExtractError::project_root_not_found(start, PROJECT_MARKERS))
}

/// Function and element names that mark translatable strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    /// `__(text, context?)`
    pub singular: String,
    /// `__n(text, textPlural, context?)`
    pub plural: String,
    /// `` __t`text` `` or `__t(text)`
    pub template: String,
    /// `<i18n>text</i18n>` or `<span i18n>text</span>`
    pub markup: String,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            singular: "__".to_string(),
            plural: "__n".to_string(),
            template: "__t".to_string(),
            markup: "i18n".to_string(),
        }
    }
}

/// Resolved configuration for one extractor run
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub project_root: PathBuf,
    pub locales_dir: PathBuf,
    pub source_dirs: Vec<PathBuf>,
    pub keywords: Keywords,
    pub exclusions: Vec<String>,
}

impl ExtractorConfig {
    /// Configuration with the conventional layout under `project_root`:
    /// catalogs in `locales/`, sources in `src/`.
    pub fn for_project(project_root: PathBuf) -> Self {
        Self {
            locales_dir: project_root.join(LOCALES_DIR_NAME),
            source_dirs: vec![project_root.join(DEFAULT_SOURCE_DIR_NAME)],
            keywords: Keywords::default(),
            exclusions: default_exclusions().iter().map(|s| s.to_string()).collect(),
            project_root,
        }
    }

    /// Replace the source directories; an empty list keeps the default.
    pub fn with_source_dirs(mut self, source_dirs: Vec<PathBuf>) -> Self {
        if !source_dirs.is_empty() {
            self.source_dirs = source_dirs;
        }
        self
    }

    pub fn with_locales_dir(mut self, locales_dir: PathBuf) -> Self {
        self.locales_dir = locales_dir;
        self
    }

    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_exclusions(mut self, exclusions: Vec<String>) -> Self {
        self.exclusions.extend(exclusions);
        self
    }
}
