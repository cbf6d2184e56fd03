pub mod extractor;
pub mod markup;
pub mod message;
pub mod script;
pub mod sitter;

pub use extractor::{Extract, ExtractionStats, MessageExtractor};
pub use message::{ExtractedMessage, Location, MessageCollection};
pub use sitter::{Sitter, SupportedLanguage};
