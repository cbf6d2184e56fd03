use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::parse::ExtractedMessage;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

use super::entry::{Catalog, CatalogEntry};
use super::store::CatalogStore;

/// Counters describing one reconciliation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Entries in the new catalog
    pub total: usize,
    /// Entries carrying a translation
    pub translated: usize,
    /// Keys that had no previous entry anywhere
    pub added: usize,
    /// Keys brought back from the outdated store
    pub restored: usize,
    /// Keys moved from the catalog to the outdated store
    pub demoted: usize,
    /// Entries in the new outdated store
    pub outdated: usize,
}

impl ReconcileStats {
    pub fn untranslated(&self) -> usize {
        self.total - self.translated
    }
}

/// New catalog and outdated store of one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub catalog: Catalog,
    pub outdated: Catalog,
    pub stats: ReconcileStats,
}

/// Merge freshly extracted messages with the previous catalog and outdated store.
///
/// Existing translations are kept (the catalog wins over the outdated store),
/// new messages start untranslated, plural messages get `{one, other}` with
/// `other` defaulting to the source plural text. Entries that are no longer
/// extracted move to the outdated store, unless they are blank (a plural only
/// when both of its forms are).
///
/// The new catalog holds exactly the extracted texts in extraction order. When
/// the same text is extracted twice, the later message decides the shape.
pub fn reconcile(
    messages: &[ExtractedMessage],
    existing_catalog: &Catalog,
    existing_outdated: &Catalog,
) -> Reconciliation {
    let mut previous = existing_outdated.clone();
    for (key, entry) in existing_catalog {
        previous.insert(key.clone(), entry.clone());
    }

    let mut consumed: HashMap<&str, CatalogEntry> = HashMap::new();
    let mut catalog = Catalog::with_capacity(messages.len());
    let mut stats = ReconcileStats::default();

    for message in messages {
        let text = message.text.as_str();
        if let Some(entry) = previous.shift_remove(text) {
            if !existing_catalog.contains_key(text) {
                stats.restored += 1;
            }
            consumed.insert(text, entry);
        } else if !consumed.contains_key(text) {
            stats.added += 1;
        }

        let prior = consumed.get(text);
        let entry = match &message.text_plural {
            Some(text_plural) => {
                let forms = prior.and_then(CatalogEntry::as_plural);
                let one = forms.map(|f| f.one.clone()).unwrap_or_default();
                let other = forms
                    .map(|f| f.other.clone())
                    .filter(|other| !other.is_empty())
                    .unwrap_or_else(|| text_plural.clone());
                CatalogEntry::plural(one, other)
            }
            None => CatalogEntry::Singular(
                prior
                    .and_then(CatalogEntry::as_singular)
                    .unwrap_or_default()
                    .to_string(),
            ),
        };

        catalog.insert(message.text.clone(), entry);
    }

    previous.retain(|_, entry| !entry.is_blank());

    stats.total = catalog.len();
    stats.translated = catalog.values().filter(|e| e.is_translated()).count();
    stats.demoted = previous
        .keys()
        .filter(|key| !existing_outdated.contains_key(key.as_str()))
        .count();
    stats.outdated = previous.len();

    Reconciliation {
        catalog,
        outdated: previous,
        stats,
    }
}

/// What happened to the outdated file of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutdatedFile {
    /// Written with this many entries
    Written(usize),
    /// Removed because nothing outdated is left
    Removed,
    /// Nothing to write and no file existed
    Absent,
}

/// Result of updating one language on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleUpdate {
    pub language: String,
    pub catalog_path: PathBuf,
    pub outdated_path: PathBuf,
    pub outdated_file: OutdatedFile,
    pub stats: ReconcileStats,
}

/// Synchronizes the catalogs of a locales directory with extracted messages
pub struct Reconciler {
    store: CatalogStore,
}

impl Reconciler {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(CatalogStore::new(config.locales_dir.clone()))
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Reconcile one language and persist the result.
    ///
    /// The catalog is always written (an empty one as `{}`); the outdated file
    /// is written when non-empty and removed otherwise.
    pub fn update_locale(&self, language: &str, messages: &[ExtractedMessage]) -> Result<LocaleUpdate> {
        let catalog_path = self.store.catalog_path(language);
        let outdated_path = self.store.outdated_path(language);

        let existing_catalog = self.store.read(&catalog_path)?;
        let existing_outdated = self.store.read(&outdated_path)?;

        let Reconciliation {
            catalog,
            outdated,
            stats,
        } = reconcile(messages, &existing_catalog, &existing_outdated);

        self.store.write(&catalog_path, &catalog)?;

        let outdated_file = if !outdated.is_empty() {
            self.store.write(&outdated_path, &outdated)?;
            OutdatedFile::Written(outdated.len())
        } else if self.store.delete(&outdated_path)? {
            OutdatedFile::Removed
        } else {
            OutdatedFile::Absent
        };

        debug!(language, ?stats, ?outdated_file, "locale reconciled");
        info!(
            "{}: {} entries ({} translated, {} new, {} outdated)",
            language, stats.total, stats.translated, stats.added, stats.outdated
        );

        Ok(LocaleUpdate {
            language: language.to_string(),
            catalog_path,
            outdated_path,
            outdated_file,
            stats,
        })
    }

    /// Update each language independently; a failure in one language does
    /// not stop the others.
    pub fn update_locales(
        &self,
        languages: &[String],
        messages: &[ExtractedMessage],
    ) -> Vec<(String, Result<LocaleUpdate>)> {
        languages
            .iter()
            .map(|language| (language.clone(), self.update_locale(language, messages)))
            .collect()
    }
}
