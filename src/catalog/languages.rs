use super::store::{CATALOG_SUFFIX, OUTDATED_SUFFIX};

/// Sentinel meaning "every language that already has a catalog"
pub const ALL_LANGUAGES: &str = "all";

/// Decide which languages to update.
///
/// An explicit comma-separated list wins, in the given order. When the list
/// is absent, empty or exactly `all`, the languages are derived from the
/// existing `<language>.json` catalog files; outdated files never name a
/// language on their own.
pub fn resolve_languages(explicit: Option<&str>, existing_files: &[String]) -> Vec<String> {
    let requested: Vec<String> = explicit
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
        .collect();

    let wants_all = requested.is_empty() || (requested.len() == 1 && requested[0] == ALL_LANGUAGES);
    if !wants_all {
        return requested;
    }

    let mut languages: Vec<String> = Vec::new();
    for language in existing_files.iter().filter_map(|name| language_from_file(name)) {
        if !languages.iter().any(|l| l == language) {
            languages.push(language.to_string());
        }
    }
    languages
}

/// Language code of a catalog file name, `None` for outdated files and
/// anything that is not `<language>.json`.
pub fn language_from_file(name: &str) -> Option<&str> {
    if name.ends_with(OUTDATED_SUFFIX) {
        return None;
    }
    name.strip_suffix(CATALOG_SUFFIX)
        .filter(|lang| !lang.is_empty() && !lang.starts_with('.'))
}
