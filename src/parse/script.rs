use crate::config::Keywords;
use std::path::Path;

use super::message::{ExtractedMessage, Location};
use super::sitter::CallMatch;

/// Turn gettext-style calls into messages.
///
/// Argument layout per keyword:
/// - singular `__(text, context?)`
/// - plural `__n(text, textPlural, context?)`
/// - template `__t(text)` or `` __t`text` ``
///
/// A call whose text (or plural text) is not a constant string, or is empty,
/// produces nothing. A non-constant context is treated as absent.
pub fn messages_from_calls(calls: &[CallMatch], keywords: &Keywords, file: &Path) -> Vec<ExtractedMessage> {
    calls
        .iter()
        .filter_map(|call| message_from_call(call, keywords, file))
        .collect()
}

fn message_from_call(call: &CallMatch, keywords: &Keywords, file: &Path) -> Option<ExtractedMessage> {
    let arg = |index: usize| -> Option<String> {
        call.arguments
            .get(index)
            .cloned()
            .flatten()
            .filter(|s| !s.is_empty())
    };

    let message = if call.callee == keywords.template {
        ExtractedMessage::singular(arg(0)?)
    } else if call.tagged {
        return None;
    } else if call.callee == keywords.singular {
        let message = ExtractedMessage::singular(arg(0)?);
        match arg(1) {
            Some(context) => message.with_context(context),
            None => message,
        }
    } else if call.callee == keywords.plural {
        let message = ExtractedMessage::plural(arg(0)?, arg(1)?);
        match arg(2) {
            Some(context) => message.with_context(context),
            None => message,
        }
    } else {
        return None;
    };

    Some(message.with_reference(Location::new(file.to_path_buf(), call.line)))
}
