use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Translated `{one, other}` forms of a plural message.
///
/// `other` is required and no other field is accepted, so a nested object
/// in a catalog is a parse error rather than an empty plural.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluralForms {
    #[serde(default)]
    pub one: String,
    pub other: String,
}

/// Value stored under a message text in a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Singular(String),
    Plural(PluralForms),
}

impl CatalogEntry {
    /// Untranslated singular entry
    pub fn empty() -> Self {
        Self::Singular(String::new())
    }

    pub fn plural(one: impl Into<String>, other: impl Into<String>) -> Self {
        Self::Plural(PluralForms {
            one: one.into(),
            other: other.into(),
        })
    }

    pub fn as_singular(&self) -> Option<&str> {
        match self {
            Self::Singular(s) => Some(s),
            Self::Plural(_) => None,
        }
    }

    pub fn as_plural(&self) -> Option<&PluralForms> {
        match self {
            Self::Singular(_) => None,
            Self::Plural(forms) => Some(forms),
        }
    }

    /// Whether the entry carries a real translation.
    ///
    /// Plural `other` defaults to the source plural text, so only `one`
    /// tells whether a translator touched the entry.
    pub fn is_translated(&self) -> bool {
        match self {
            Self::Singular(s) => !s.trim().is_empty(),
            Self::Plural(forms) => !forms.one.trim().is_empty(),
        }
    }

    /// Whether the entry holds no text at all. Blank entries are never kept
    /// as outdated; a plural is blank only when both forms are.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Singular(s) => s.trim().is_empty(),
            Self::Plural(forms) => forms.one.trim().is_empty() && forms.other.trim().is_empty(),
        }
    }
}

impl From<&str> for CatalogEntry {
    fn from(value: &str) -> Self {
        Self::Singular(value.to_string())
    }
}

impl From<String> for CatalogEntry {
    fn from(value: String) -> Self {
        Self::Singular(value)
    }
}

/// Message text -> entry, in insertion order
pub type Catalog = IndexMap<String, CatalogEntry>;
