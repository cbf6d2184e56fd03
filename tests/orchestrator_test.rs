use i18n_extractor::{
    run_extract, sync_catalogs, CatalogEntry, CatalogStore, ExtractError, ExtractQuery,
    ExtractedMessage, ExtractorConfig, OutdatedFile,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Copy a fixture project into a fresh temp dir so runs can write to it
fn copy_fixture(name: &str) -> TempDir {
    let source = Path::new("tests/fixtures").join(name);
    let temp = TempDir::new().unwrap();
    for entry in WalkDir::new(&source).into_iter().filter_map(|e| e.ok()) {
        let relative = entry.path().strip_prefix(&source).unwrap();
        let target = temp.path().join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).unwrap();
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
    temp
}

fn read_catalog(path: PathBuf) -> i18n_extractor::Catalog {
    CatalogStore::new(path.parent().unwrap()).read(&path).unwrap()
}

#[test]
fn test_run_extract_updates_existing_languages() {
    let project = copy_fixture("web-app");
    let query = ExtractQuery::new().with_base_dir(project.path().to_path_buf());

    let report = run_extract(query).expect("run should succeed");
    assert!(report.is_success());
    assert_eq!(report.project_root, project.path());
    assert_eq!(report.messages, 8);
    assert_eq!(report.extraction.files, 4);
    assert_eq!(report.extraction.plurals, 1);

    let languages: Vec<&str> = report.updates.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(languages, vec!["de", "fr"]);

    let fr = read_catalog(project.path().join("locales/fr.json"));
    let keys: Vec<&str> = fr.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "Welcome back",
            "%d item in your cart",
            "Open",
            "Hello there",
            "Dear customer",
            "Sign in",
            "Create account",
        ]
    );
    assert_eq!(fr["Welcome back"], CatalogEntry::from("Bon retour"));
    assert_eq!(fr["Sign in"], CatalogEntry::from("Se connecter"));
    assert_eq!(fr["Open"], CatalogEntry::from(""));
    assert_eq!(
        fr["%d item in your cart"],
        CatalogEntry::plural("", "%d items in your cart")
    );

    let fr_outdated = read_catalog(project.path().join("locales/fr.outdated.json"));
    let outdated_keys: Vec<&str> = fr_outdated.keys().map(String::as_str).collect();
    assert_eq!(outdated_keys, vec!["Ancient", "Removed string"]);
}

#[test]
fn test_run_extract_keeps_plural_translations() {
    let project = copy_fixture("web-app");
    let report = run_extract(ExtractQuery::new().with_base_dir(project.path().to_path_buf())).unwrap();

    let de = read_catalog(project.path().join("locales/de.json"));
    assert_eq!(
        de["%d item in your cart"],
        CatalogEntry::plural("%d Artikel im Warenkorb", "%d Artikel im Warenkorb")
    );
    assert!(!project.path().join("locales/de.outdated.json").exists());

    let (_, de_update) = &report.updates[0];
    let de_update = de_update.as_ref().unwrap();
    assert_eq!(de_update.outdated_file, OutdatedFile::Absent);
    assert_eq!(de_update.stats.translated, 1);
    assert_eq!(de_update.stats.total, 7);
}

#[test]
fn test_run_extract_from_nested_directory() {
    let project = copy_fixture("web-app");
    let nested = project.path().join("src/components");

    let report = run_extract(
        ExtractQuery::new()
            .with_base_dir(nested)
            .with_languages("es"),
    )
    .unwrap();

    assert_eq!(report.project_root, project.path());
    let es = read_catalog(project.path().join("locales/es.json"));
    assert_eq!(es.len(), 7);
    assert!(es.values().all(|e| !e.is_translated()));
}

#[test]
fn test_explicit_source_dirs_are_relative_to_base_dir() {
    let project = copy_fixture("web-app");
    let report = run_extract(
        ExtractQuery::new()
            .with_base_dir(project.path().to_path_buf())
            .with_languages("it")
            .with_source_dirs(vec![PathBuf::from("src/views")]),
    )
    .unwrap();

    assert_eq!(report.messages, 2);
    let it = read_catalog(project.path().join("locales/it.json"));
    let keys: Vec<&str> = it.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Sign in", "Create account"]);
}

#[test]
fn test_locales_dir_override() {
    let project = copy_fixture("web-app");
    let report = run_extract(
        ExtractQuery::new()
            .with_base_dir(project.path().to_path_buf())
            .with_languages("pt")
            .with_locales_dir(PathBuf::from("i18n")),
    )
    .unwrap();

    assert_eq!(report.locales_dir, project.path().join("i18n"));
    assert!(project.path().join("i18n/pt.json").exists());
    assert!(!project.path().join("locales/pt.json").exists());
}

#[test]
fn test_missing_project_root_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let work = temp.path().join("work");
    fs::create_dir_all(work.join("src")).unwrap();
    fs::write(work.join("src/app.js"), "__('Hello')").unwrap();

    let result = run_extract(
        ExtractQuery::new()
            .with_base_dir(work.clone())
            .with_languages("fr"),
    );

    // Only meaningful when no ancestor of the temp dir is a project
    if let Err(err) = result {
        assert!(matches!(err, ExtractError::ProjectRootNotFound { .. }));
        assert!(!work.join("locales").exists());
    }
}

#[test]
fn test_malformed_catalog_fails_only_its_language() {
    let project = copy_fixture("web-app");
    fs::write(project.path().join("locales/fr.json"), "{ \"Welcome back\": ").unwrap();

    let report = run_extract(ExtractQuery::new().with_base_dir(project.path().to_path_buf())).unwrap();
    assert!(!report.is_success());

    let failures: Vec<&str> = report.failures().map(|(l, _)| l).collect();
    assert_eq!(failures, vec!["fr"]);
    let (_, err) = report.failures().next().unwrap();
    assert!(matches!(err, ExtractError::CatalogParse { .. }));

    // The broken file is left alone and the other language is still updated
    assert_eq!(
        fs::read_to_string(project.path().join("locales/fr.json")).unwrap(),
        "{ \"Welcome back\": "
    );
    assert_eq!(read_catalog(project.path().join("locales/de.json")).len(), 7);
}

#[test]
fn test_no_languages_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.json"), "{}").unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/app.js"), "__('Hello')").unwrap();

    let report = run_extract(ExtractQuery::new().with_base_dir(temp.path().to_path_buf())).unwrap();
    assert!(report.updates.is_empty());
    assert!(report.is_success());
    assert_eq!(report.messages, 1);
}

#[test]
fn test_sync_catalogs_with_precomputed_messages() {
    let temp = TempDir::new().unwrap();
    let config = ExtractorConfig::for_project(temp.path().to_path_buf());
    let mut messages = vec![
        ExtractedMessage::singular("Hello"),
        ExtractedMessage::plural("item", "items"),
    ];

    let report = sync_catalogs(&config, &mut messages, Some("fr,es")).unwrap();
    assert_eq!(report.updates.len(), 2);
    assert!(report.is_success());

    let written = fs::read_to_string(temp.path().join("locales/es.json")).unwrap();
    assert_eq!(
        written,
        "{\n  \"Hello\": \"\",\n  \"item\": {\n    \"one\": \"\",\n    \"other\": \"items\"\n  }\n}"
    );
}
