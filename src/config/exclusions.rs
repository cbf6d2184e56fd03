use walkdir::DirEntry;

/// Directory names never descended into while scanning source directories
pub fn default_exclusions() -> Vec<&'static str> {
    vec![
        ".git",
        ".svn",
        ".hg",
        ".idea",
        ".vscode",
        "node_modules",
        "bower_components",
        "dist",
        "build",
        "coverage",
        ".next",
        ".nuxt",
        ".cache",
    ]
}

/// Returns true when the entry is a directory whose name is in `exclusions`.
///
/// Files are never excluded by name, so a source file called `build.js`
/// is still scanned.
pub fn is_excluded(entry: &DirEntry, exclusions: &[String]) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    exclusions.iter().any(|excl| name == excl.as_str())
}
