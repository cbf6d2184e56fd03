// src/parse/extractor.rs

use crate::config::{is_excluded, ExtractorConfig, Keywords};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::markup::messages_from_elements;
use super::message::{ExtractedMessage, MessageCollection};
use super::script::messages_from_calls;
use super::sitter::{Sitter, SupportedLanguage};

/// Anything that can produce the messages of a source tree.
///
/// The reconciler only depends on this seam, so catalogs can be synchronized
/// from a precomputed message list as well as from a live scan.
pub trait Extract {
    fn extract(&mut self, source_dirs: &[PathBuf]) -> Result<Vec<ExtractedMessage>>;
}

impl Extract for Vec<ExtractedMessage> {
    fn extract(&mut self, _source_dirs: &[PathBuf]) -> Result<Vec<ExtractedMessage>> {
        Ok(self.clone())
    }
}

/// Counters reported after a scan
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Script and markup files parsed
    pub files: usize,
    /// Files that contained at least one message
    pub files_with_messages: usize,
    /// Distinct messages after de-duplication
    pub messages: usize,
    /// Plural messages among them
    pub plurals: usize,
    /// Files that could not be read or parsed
    pub skipped: usize,
}

/// `MessageExtractor` walks source directories and collects every
/// translatable message from `.js/.jsx/.ts/.tsx` and `.html` files.
pub struct MessageExtractor {
    sitter: Sitter,
    keywords: Keywords,
    exclusions: Vec<String>,
    stats: ExtractionStats,
}

impl Default for MessageExtractor {
    fn default() -> Self {
        Self::new(Keywords::default())
    }
}

impl MessageExtractor {
    pub fn new(keywords: Keywords) -> Self {
        Self {
            sitter: Sitter::new(),
            keywords,
            exclusions: Vec::new(),
            stats: ExtractionStats::default(),
        }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        let mut extractor = Self::new(config.keywords.clone());
        extractor.set_exclusions(config.exclusions.clone());
        extractor
    }

    /// Set directory names to skip while walking
    pub fn set_exclusions(&mut self, exclusions: Vec<String>) {
        self.exclusions = exclusions;
    }

    /// Statistics of the last `extract` call
    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    /// Extract messages from a single file's content
    pub fn extract_source(&mut self, path: &Path, code: &str) -> Result<Vec<ExtractedMessage>> {
        let Some(lang) = SupportedLanguage::from_path(path) else {
            return Ok(Vec::new());
        };

        let messages = if lang.is_markup() {
            let elements = self.sitter.find_elements(lang, code)?;
            messages_from_elements(&elements, &self.keywords.markup, path)
        } else {
            let calls = self.sitter.find_calls(lang, code)?;
            messages_from_calls(&calls, &self.keywords, path)
        };

        Ok(messages)
    }

    fn source_files(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| !is_excluded(e, &self.exclusions))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Skipping unreadable entry under {}: {}", dir.display(), err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| self.sitter.is_supported(p))
            .collect();
        files.sort();
        files
    }
}

impl Extract for MessageExtractor {
    /// Scan every source directory; unreadable files are logged and skipped.
    fn extract(&mut self, source_dirs: &[PathBuf]) -> Result<Vec<ExtractedMessage>> {
        let mut collection = MessageCollection::new();
        let mut stats = ExtractionStats::default();

        for dir in source_dirs {
            if !dir.is_dir() {
                warn!("Source directory {} does not exist", dir.display());
                continue;
            }

            for path in self.source_files(dir) {
                let code = match fs::read_to_string(&path) {
                    Ok(code) => code,
                    Err(err) => {
                        warn!("Skipping {}: {}", path.display(), err);
                        stats.skipped += 1;
                        continue;
                    }
                };

                stats.files += 1;
                match self.extract_source(&path, &code) {
                    Ok(messages) => {
                        debug!("{}: {} message(s)", path.display(), messages.len());
                        if !messages.is_empty() {
                            stats.files_with_messages += 1;
                        }
                        collection.extend(messages);
                    }
                    Err(err) => {
                        warn!("Skipping {}: {}", path.display(), err);
                        stats.skipped += 1;
                    }
                }
            }
        }

        let messages = collection.into_messages();
        stats.messages = messages.len();
        stats.plurals = messages.iter().filter(|m| m.is_plural()).count();
        self.stats = stats;

        info!(
            files = stats.files,
            messages = stats.messages,
            plurals = stats.plurals,
            skipped = stats.skipped,
            "extraction finished"
        );

        Ok(messages)
    }
}
