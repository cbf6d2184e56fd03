use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use super::message::{ExtractedMessage, Location};
use super::sitter::ElementMatch;

fn indentation() -> &'static Regex {
    static INDENTATION: OnceLock<Regex> = OnceLock::new();
    INDENTATION.get_or_init(|| Regex::new(r"(?m)^[ \t]+").expect("valid indentation pattern"))
}

/// Trim element content and strip the leading indentation of every line
pub fn normalize_content(content: &str) -> String {
    indentation().replace_all(content.trim(), "").into_owned()
}

/// Extract the content of marked elements as singular messages.
///
/// An element is marked when its tag name equals `marker` or it carries
/// `marker` as an attribute. Elements with blank content are skipped.
pub fn messages_from_elements(elements: &[ElementMatch], marker: &str, file: &Path) -> Vec<ExtractedMessage> {
    elements
        .iter()
        .filter(|e| e.tag.eq_ignore_ascii_case(marker) || e.attributes.iter().any(|a| a == marker))
        .filter_map(|e| {
            let text = normalize_content(&e.content);
            if text.is_empty() {
                return None;
            }
            Some(
                ExtractedMessage::singular(text)
                    .with_reference(Location::new(file.to_path_buf(), e.line)),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str, attributes: &[&str], content: &str) -> ElementMatch {
        ElementMatch {
            tag: tag.to_string(),
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
            content: content.to_string(),
            line: 7,
        }
    }

    #[test]
    fn test_normalize_content() {
        assert_eq!(normalize_content("  Sign in \n"), "Sign in");
        assert_eq!(
            normalize_content("\n    First line\n    second <b>bold</b>\n  "),
            "First line\nsecond <b>bold</b>"
        );
    }

    #[test]
    fn test_marked_by_tag_or_attribute() {
        let elements = vec![
            element("i18n", &[], "Sign in"),
            element("button", &["i18n", "type"], "Submit"),
            element("p", &["class"], "Not translated"),
        ];
        let messages = messages_from_elements(&elements, "i18n", Path::new("index.html"));
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["Sign in", "Submit"]);
        assert_eq!(messages[0].references[0].line, 7);
    }

    #[test]
    fn test_blank_content_skipped() {
        let elements = vec![element("i18n", &[], "   \n  ")];
        assert!(messages_from_elements(&elements, "i18n", Path::new("a.html")).is_empty());
    }
}
