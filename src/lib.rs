pub mod catalog;
pub mod config;
pub mod error;
pub mod parse;

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// Re-export commonly used types
pub use catalog::{
    reconcile, resolve_languages, Catalog, CatalogEntry, CatalogStore, LocaleUpdate, OutdatedFile,
    PluralForms, ReconcileStats, Reconciler, Reconciliation,
};
pub use config::{find_project_root, ExtractorConfig, Keywords};
pub use error::{ExtractError, Result};
pub use parse::{Extract, ExtractedMessage, ExtractionStats, Location, MessageExtractor};

/// Parameters of one extractor run
#[derive(Debug, Clone, Default)]
pub struct ExtractQuery {
    /// Comma-separated language codes, `all`, or `None`
    pub languages: Option<String>,
    /// Directories to scan; empty means `<project_root>/src`
    pub source_dirs: Vec<PathBuf>,
    /// Where the project root search starts (defaults to the current directory)
    pub base_dir: Option<PathBuf>,
    /// Overrides `<project_root>/locales`
    pub locales_dir: Option<PathBuf>,
}

impl ExtractQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_languages(mut self, languages: impl Into<String>) -> Self {
        self.languages = Some(languages.into());
        self
    }

    pub fn with_source_dirs(mut self, source_dirs: Vec<PathBuf>) -> Self {
        self.source_dirs = source_dirs;
        self
    }

    pub fn with_base_dir(mut self, base_dir: PathBuf) -> Self {
        self.base_dir = Some(base_dir);
        self
    }

    pub fn with_locales_dir(mut self, locales_dir: PathBuf) -> Self {
        self.locales_dir = Some(locales_dir);
        self
    }
}

/// Outcome of a run: what was extracted and what happened to each language
#[derive(Debug)]
pub struct ExtractReport {
    pub project_root: PathBuf,
    pub locales_dir: PathBuf,
    pub messages: usize,
    pub extraction: ExtractionStats,
    pub updates: Vec<(String, Result<LocaleUpdate>)>,
}

impl ExtractReport {
    /// Languages whose update failed, with the error
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ExtractError)> {
        self.updates.iter().filter_map(|(language, result)| match result {
            Ok(_) => None,
            Err(err) => Some((language.as_str(), err)),
        })
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Main orchestrator: locate the project, extract messages and synchronize
/// every requested catalog.
///
/// Fails early (before any file is touched) when no project root can be
/// found. Per-language failures are collected in the report instead.
#[must_use = "this function returns a Result that should be handled"]
pub fn run_extract(query: ExtractQuery) -> Result<ExtractReport> {
    let base_dir = match query.base_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let project_root = find_project_root(&base_dir)?;
    debug!("project root: {}", project_root.display());

    let source_dirs = query
        .source_dirs
        .iter()
        .map(|dir| absolutize(&base_dir, dir))
        .collect();
    let mut config = ExtractorConfig::for_project(project_root).with_source_dirs(source_dirs);
    if let Some(locales_dir) = &query.locales_dir {
        config = config.with_locales_dir(absolutize(&base_dir, locales_dir));
    }

    let mut extractor = MessageExtractor::from_config(&config);
    let mut report = sync_catalogs(&config, &mut extractor, query.languages.as_deref())?;
    report.extraction = extractor.stats();
    Ok(report)
}

/// Extract messages from `source` and reconcile the catalog of every
/// language resolved from `languages`.
pub fn sync_catalogs<E: Extract>(
    config: &ExtractorConfig,
    source: &mut E,
    languages: Option<&str>,
) -> Result<ExtractReport> {
    let messages = source.extract(&config.source_dirs)?;

    let reconciler = Reconciler::from_config(config);
    let existing_files = reconciler.store().list_catalog_files()?;
    let languages = resolve_languages(languages, &existing_files);
    if languages.is_empty() {
        warn!(
            "No languages to update: pass a list such as 'fr,es' or create {}/<language>.json",
            config.locales_dir.display()
        );
    }

    let updates = reconciler.update_locales(&languages, &messages);

    Ok(ExtractReport {
        project_root: config.project_root.clone(),
        locales_dir: config.locales_dir.clone(),
        messages: messages.len(),
        extraction: ExtractionStats::default(),
        updates,
    })
}

fn absolutize(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
