use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A source location where a message was found (1-indexed line)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
}

impl Location {
    pub fn new(file: PathBuf, line: usize) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// One translatable message found in source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedMessage {
    /// Singular source text; the catalog key
    pub text: String,
    /// Plural source text, present only for plural messages
    pub text_plural: Option<String>,
    /// Disambiguation context (not part of the catalog key)
    pub context: Option<String>,
    /// Where the message occurs
    #[serde(default)]
    pub references: Vec<Location>,
}

impl ExtractedMessage {
    pub fn singular(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_plural: None,
            context: None,
            references: Vec::new(),
        }
    }

    pub fn plural(text: impl Into<String>, text_plural: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_plural: Some(text_plural.into()),
            context: None,
            references: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_reference(mut self, location: Location) -> Self {
        self.references.push(location);
        self
    }

    pub fn is_plural(&self) -> bool {
        self.text_plural.is_some()
    }
}

/// Ordered set of messages, de-duplicated on `(text, context)`.
///
/// A repeated message keeps its first position, gains the new references,
/// and picks up a plural text if the first occurrence had none.
#[derive(Debug, Default, Clone)]
pub struct MessageCollection {
    messages: IndexMap<(String, Option<String>), ExtractedMessage>,
}

impl MessageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: ExtractedMessage) {
        let key = (message.text.clone(), message.context.clone());
        match self.messages.entry(key) {
            Entry::Occupied(mut occupied) => {
                let existing = occupied.get_mut();
                if existing.text_plural.is_none() {
                    existing.text_plural = message.text_plural;
                }
                for reference in message.references {
                    if !existing.references.contains(&reference) {
                        existing.references.push(reference);
                    }
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(message);
            }
        }
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = ExtractedMessage>) {
        for message in messages {
            self.add(message);
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<ExtractedMessage> {
        self.messages.into_values().collect()
    }
}
