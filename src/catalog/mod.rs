pub mod entry;
pub mod languages;
pub mod reconcile;
pub mod store;

pub use entry::{Catalog, CatalogEntry, PluralForms};
pub use languages::{resolve_languages, ALL_LANGUAGES};
pub use reconcile::{reconcile, LocaleUpdate, OutdatedFile, ReconcileStats, Reconciler, Reconciliation};
pub use store::CatalogStore;
