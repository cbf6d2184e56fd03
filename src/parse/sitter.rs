use anyhow::{Context, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

/// Source languages the extractor can parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedLanguage {
    JavaScript,
    TypeScript,
    Tsx,
    Html,
}

impl SupportedLanguage {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "js" | "jsx" => Some(Self::JavaScript),
            "ts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "html" => Some(Self::Html),
            _ => None,
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::language(),
            Self::TypeScript => tree_sitter_typescript::language_typescript(),
            Self::Tsx => tree_sitter_typescript::language_tsx(),
            Self::Html => tree_sitter_html::language(),
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Self::Html)
    }

    fn query_source(&self) -> &'static str {
        match self {
            Self::JavaScript | Self::TypeScript | Self::Tsx => {
                r#"
                (call_expression function: (identifier) @callee) @call
            "#
            }
            Self::Html => {
                r#"
                (element (start_tag) @start) @element
            "#
            }
        }
    }
}

/// A call to a plain identifier, with its arguments resolved to string
/// constants where possible
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMatch {
    pub callee: String,
    /// One slot per argument; `None` when the argument is not a constant string
    pub arguments: Vec<Option<String>>,
    /// True for tagged templates (`` tag`text` ``)
    pub tagged: bool,
    pub line: usize,
}

/// An HTML element with its tag, attribute names and raw inner content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementMatch {
    pub tag: String,
    pub attributes: Vec<String>,
    pub content: String,
    pub line: usize,
}

/// Sitter handles Tree-sitter parsing for script and markup sources
pub struct Sitter {
    parsers: HashMap<SupportedLanguage, Parser>,
    queries: HashMap<SupportedLanguage, Query>,
}

impl Default for Sitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Sitter {
    pub fn new() -> Self {
        Self {
            parsers: HashMap::new(),
            queries: HashMap::new(),
        }
    }

    /// Check if the file at the given path is supported by Tree-sitter
    pub fn is_supported(&self, path: &Path) -> bool {
        SupportedLanguage::from_path(path).is_some()
    }

    /// Get or create a parser for the given language
    fn get_parser(&mut self, lang: SupportedLanguage) -> Result<&mut Parser> {
        match self.parsers.entry(lang) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let mut parser = Parser::new();
                parser
                    .set_language(lang.language())
                    .context("Failed to set parser language")?;
                Ok(e.insert(parser))
            }
        }
    }

    /// Get or create the extraction query for the given language
    fn get_query(&mut self, lang: SupportedLanguage) -> Result<&Query> {
        match self.queries.entry(lang) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let query = Query::new(lang.language(), lang.query_source())
                    .map_err(|e| anyhow::anyhow!("Failed to create query: {:?}", e))?;
                Ok(e.insert(query))
            }
        }
    }

    /// Find every call to a plain identifier in a script file
    pub fn find_calls(&mut self, lang: SupportedLanguage, code: &str) -> Result<Vec<CallMatch>> {
        if lang.is_markup() {
            return Ok(Vec::new());
        }

        let parser = self.get_parser(lang)?;
        let tree = parser.parse(code, None).context("Failed to parse code")?;
        let source = code.as_bytes();

        let query = self.get_query(lang)?;
        let callee_idx = query.capture_index_for_name("callee").unwrap_or(0);
        let call_idx = query.capture_index_for_name("call").unwrap_or(1);

        let mut cursor = QueryCursor::new();
        let mut calls = Vec::new();

        for m in cursor.matches(query, tree.root_node(), source) {
            let callee = m.captures.iter().find(|c| c.index == callee_idx);
            let call = m.captures.iter().find(|c| c.index == call_idx);
            let (Some(callee), Some(call)) = (callee, call) else {
                continue;
            };
            let Some(args) = call.node.child_by_field_name("arguments") else {
                continue;
            };

            let tagged = args.kind() == "template_string";
            let arguments = if tagged {
                vec![resolve_string(args, source)]
            } else {
                let mut walker = args.walk();
                let nodes: Vec<Node> = args
                    .named_children(&mut walker)
                    .filter(|n| n.kind() != "comment")
                    .collect();
                nodes.into_iter().map(|n| resolve_string(n, source)).collect()
            };

            calls.push(CallMatch {
                callee: callee.node.utf8_text(source)?.to_string(),
                arguments,
                tagged,
                line: call.node.start_position().row + 1,
            });
        }

        Ok(calls)
    }

    /// Find every element in an HTML file
    pub fn find_elements(&mut self, lang: SupportedLanguage, code: &str) -> Result<Vec<ElementMatch>> {
        if !lang.is_markup() {
            return Ok(Vec::new());
        }

        let parser = self.get_parser(lang)?;
        let tree = parser.parse(code, None).context("Failed to parse markup")?;
        let source = code.as_bytes();

        let query = self.get_query(lang)?;
        let element_idx = query.capture_index_for_name("element").unwrap_or(1);
        let start_idx = query.capture_index_for_name("start").unwrap_or(0);

        let mut cursor = QueryCursor::new();
        let mut elements = Vec::new();

        for m in cursor.matches(query, tree.root_node(), source) {
            let element = m.captures.iter().find(|c| c.index == element_idx);
            let start = m.captures.iter().find(|c| c.index == start_idx);
            let (Some(element), Some(start)) = (element, start) else {
                continue;
            };

            let mut tag = String::new();
            let mut attributes = Vec::new();
            let mut walker = start.node.walk();
            for child in start.node.named_children(&mut walker) {
                match child.kind() {
                    "tag_name" => tag = child.utf8_text(source)?.to_string(),
                    "attribute" => {
                        if let Some(name) = child.named_child(0) {
                            attributes.push(name.utf8_text(source)?.to_string());
                        }
                    }
                    _ => {}
                }
            }

            let content_start = start.node.end_byte();
            let mut walker = element.node.walk();
            let content_end = element
                .node
                .named_children(&mut walker)
                .find(|n| n.kind() == "end_tag")
                .map(|n| n.start_byte())
                .unwrap_or_else(|| element.node.end_byte());

            let content = code
                .get(content_start..content_end.max(content_start))
                .unwrap_or_default()
                .to_string();

            elements.push(ElementMatch {
                tag,
                attributes,
                content,
                line: element.node.start_position().row + 1,
            });
        }

        Ok(elements)
    }
}

/// Resolve a constant string expression: string literals, substitution-free
/// template literals, parenthesized strings and `+` concatenations of those.
fn resolve_string(node: Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "string" => {
            let raw = node.utf8_text(source).ok()?;
            Some(unescape_js(raw.get(1..raw.len().checked_sub(1)?)?))
        }
        "template_string" => {
            let mut walker = node.walk();
            let has_substitution = node
                .named_children(&mut walker)
                .any(|n| n.kind() == "template_substitution");
            if has_substitution {
                return None;
            }
            let raw = node.utf8_text(source).ok()?;
            Some(unescape_js(raw.get(1..raw.len().checked_sub(1)?)?))
        }
        "binary_expression" => {
            if node.child_by_field_name("operator")?.kind() != "+" {
                return None;
            }
            let left = resolve_string(node.child_by_field_name("left")?, source)?;
            let right = resolve_string(node.child_by_field_name("right")?, source)?;
            Some(left + &right)
        }
        "parenthesized_expression" => resolve_string(node.named_child(0)?, source),
        _ => None,
    }
}

/// Decode JavaScript escape sequences in a literal body
pub fn unescape_js(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let Some(next) = chars.next() else {
            result.push('\\');
            break;
        };

        match next {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            'b' => result.push('\u{8}'),
            'f' => result.push('\u{c}'),
            'v' => result.push('\u{b}'),
            '0' => result.push('\0'),
            // Line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => result.push(c),
                    None => {
                        result.push('x');
                        result.push_str(&hex);
                    }
                }
            }
            'u' => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(c) => result.push(c),
                    None => {
                        result.push('u');
                        result.push_str(&hex);
                    }
                }
            }
            other => result.push(other),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_extension() {
        assert_eq!(
            SupportedLanguage::from_path(Path::new("a/b.js")),
            Some(SupportedLanguage::JavaScript)
        );
        assert_eq!(
            SupportedLanguage::from_path(Path::new("a/b.jsx")),
            Some(SupportedLanguage::JavaScript)
        );
        assert_eq!(
            SupportedLanguage::from_path(Path::new("a/b.ts")),
            Some(SupportedLanguage::TypeScript)
        );
        assert_eq!(
            SupportedLanguage::from_path(Path::new("a/b.tsx")),
            Some(SupportedLanguage::Tsx)
        );
        assert_eq!(
            SupportedLanguage::from_path(Path::new("a/index.html")),
            Some(SupportedLanguage::Html)
        );
        assert_eq!(SupportedLanguage::from_path(Path::new("a/b.vue")), None);
        assert_eq!(SupportedLanguage::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_unescape_js() {
        assert_eq!(unescape_js(r"It\'s"), "It's");
        assert_eq!(unescape_js(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape_js(r"line\nbreak"), "line\nbreak");
        assert_eq!(unescape_js(r"été"), "été");
        assert_eq!(unescape_js(r"\u{1F600}"), "😀");
        assert_eq!(unescape_js(r"\x41"), "A");
        assert_eq!(unescape_js(r"back\\slash"), "back\\slash");
        assert_eq!(unescape_js("con\\\ntinued"), "continued");
    }

    #[test]
    fn test_find_calls_resolves_literals() {
        let mut sitter = Sitter::new();
        let code = r#"
const a = __("Hello");
const b = __n('item', "items", 'cart');
const c = __("Dear " + 'user');
const d = __(name);
"#;
        let calls = sitter.find_calls(SupportedLanguage::JavaScript, code).unwrap();
        assert_eq!(calls.len(), 4);

        assert_eq!(calls[0].callee, "__");
        assert_eq!(calls[0].arguments, vec![Some("Hello".to_string())]);
        assert_eq!(calls[0].line, 2);

        assert_eq!(calls[1].callee, "__n");
        assert_eq!(
            calls[1].arguments,
            vec![
                Some("item".to_string()),
                Some("items".to_string()),
                Some("cart".to_string())
            ]
        );

        assert_eq!(calls[2].arguments, vec![Some("Dear user".to_string())]);
        assert_eq!(calls[3].arguments, vec![None]);
    }

    #[test]
    fn test_find_calls_tagged_template() {
        let mut sitter = Sitter::new();
        let code = "const t = __t`Welcome back`;\nconst u = __t`Hi ${name}`;\n";
        let calls = sitter.find_calls(SupportedLanguage::TypeScript, code).unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].tagged);
        assert_eq!(calls[0].arguments, vec![Some("Welcome back".to_string())]);
        assert_eq!(calls[1].arguments, vec![None]);
    }

    #[test]
    fn test_find_elements() {
        let mut sitter = Sitter::new();
        let code = "<div>\n  <i18n>Sign in</i18n>\n  <span i18n class=\"x\">Log out</span>\n</div>\n";
        let elements = sitter.find_elements(SupportedLanguage::Html, code).unwrap();

        let marked: Vec<&ElementMatch> = elements.iter().filter(|e| e.tag == "i18n").collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].content, "Sign in");
        assert_eq!(marked[0].line, 2);

        let span = elements.iter().find(|e| e.tag == "span").unwrap();
        assert!(span.attributes.contains(&"i18n".to_string()));
        assert!(span.attributes.contains(&"class".to_string()));
        assert_eq!(span.content, "Log out");
    }

    #[test]
    fn test_wrong_kind_yields_nothing() {
        let mut sitter = Sitter::new();
        assert!(sitter
            .find_calls(SupportedLanguage::Html, "<p>__(\"x\")</p>")
            .unwrap()
            .is_empty());
        assert!(sitter
            .find_elements(SupportedLanguage::JavaScript, "__('x')")
            .unwrap()
            .is_empty());
    }
}
