//! Integration tests for loading, resolution, and lookup over real
//! directory trees.

use locserver_common::test_utils::LocaleRoot;
use locserver_i18n::{CatalogError, LanguageTag, StringTable};

fn tag(value: &str) -> LanguageTag {
    LanguageTag::parse(value).unwrap()
}

#[test]
fn gotext_tree_loads_with_embedded_tags() {
    let root = LocaleRoot::new();
    root.write_gotext("en-US/out.json", "en-US", &[("foo", "foo2"), ("bar", "bar2")]);
    root.write_gotext("zh-CN/out.json", "zh-CN", &[("foo", "chinese foo")]);

    let table = StringTable::load(root.path(), false).unwrap();
    assert!(table.scan_errors().is_empty());

    let en = table.catalog_for(&tag("en-US")).unwrap();
    assert_eq!(en.get("foo"), Some("foo2"));
    assert_eq!(en.get("bar"), Some("bar2"));

    // Entries from independent payloads stay isolated by tag.
    let zh = table.catalog_for(&tag("zh-CN")).unwrap();
    assert_eq!(zh.get("foo"), Some("chinese foo"));
    assert_eq!(zh.get("bar"), None);
}

#[test]
fn gotext_payload_tag_wins_over_directory_name() {
    let root = LocaleRoot::new();
    // Directory name is not a tag at all; the payload carries the tag.
    root.write_gotext("translations/out.json", "de-DE", &[("k", "v")]);

    let table = StringTable::load(root.path(), false).unwrap();
    assert_eq!(table.catalog_for(&tag("de-DE")).unwrap().get("k"), Some("v"));
}

#[test]
fn po_tree_takes_tag_from_directory_name() {
    let root = LocaleRoot::new();
    root.write_po("en-us/messages.po", &[("foo", "foo2"), ("bar", "bar2")]);

    let table = StringTable::load(root.path(), false).unwrap();
    // The directory name "en-us" canonicalizes to "en-US".
    let catalog = table.catalog_for(&tag("en-US")).unwrap();
    assert_eq!(catalog.get("foo"), Some("foo2"));
    assert_eq!(catalog.get("bar"), Some("bar2"));
}

#[test]
fn po_file_under_non_tag_directory_is_a_scan_error() {
    let root = LocaleRoot::new();
    root.write_po("not a tag!/messages.po", &[("foo", "foo2")]);
    root.write_po("de/messages.po", &[("k", "v")]);

    let table = StringTable::load(root.path(), false).unwrap();
    assert_eq!(table.tags(), vec![tag("de")]);
    assert_eq!(table.scan_errors().len(), 1);
    assert!(matches!(
        table.scan_errors()[0].source,
        CatalogError::InvalidTag(_)
    ));
}

#[test]
fn xliff_tree_loads_with_target_language() {
    let root = LocaleRoot::new();
    root.write_xliff("fr/messages.xlf", "fr-FR", &[("greeting", "Bonjour")]);

    let table = StringTable::load(root.path(), false).unwrap();
    let catalog = table.catalog_for(&tag("fr-FR")).unwrap();
    assert_eq!(catalog.get("greeting"), Some("Bonjour"));
}

#[test]
fn one_malformed_file_does_not_abort_the_scan() {
    let root = LocaleRoot::new();
    root.write_gotext("en/out.json", "en", &[("a", "1")]);
    let bad = root.write_raw("de/out.json", "{ this is not json");
    root.write_gotext("fr/out.json", "fr", &[("b", "2")]);

    let table = StringTable::load(root.path(), false).unwrap();

    assert_eq!(table.tags(), vec![tag("en"), tag("fr")]);
    assert_eq!(table.catalog_for(&tag("en")).unwrap().get("a"), Some("1"));
    assert_eq!(table.catalog_for(&tag("fr")).unwrap().get("b"), Some("2"));

    // The aggregated errors name exactly the bad file.
    assert_eq!(table.scan_errors().len(), 1);
    assert_eq!(table.scan_errors()[0].path, bad);
    assert!(matches!(
        table.scan_errors()[0].source,
        CatalogError::Malformed(_)
    ));
}

#[test]
fn empty_tree_fails_with_no_languages_found() {
    let root = LocaleRoot::new();
    let err = StringTable::load(root.path(), false).unwrap_err();
    assert!(matches!(err, CatalogError::NoLanguagesFound(_)));
}

#[test]
fn unreadable_root_is_fatal() {
    let root = LocaleRoot::new();
    let missing = root.path().join("does-not-exist");
    let err = StringTable::load(&missing, false).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
}

#[test]
fn unrecognized_files_are_skipped() {
    let root = LocaleRoot::new();
    root.write_gotext("en/out.json", "en", &[("a", "1")]);
    root.write_raw("en/README.txt", "not a catalog");

    let table = StringTable::load(root.path(), false).unwrap();
    assert!(table.scan_errors().is_empty());
    assert_eq!(table.tags(), vec![tag("en")]);
}

#[test]
fn multiple_files_merge_into_one_tag_catalog() {
    let root = LocaleRoot::new();
    root.write_po("en/app.po", &[("app.title", "My App")]);
    root.write_po("en/menu.po", &[("menu.file", "File")]);

    let table = StringTable::load(root.path(), false).unwrap();
    let catalog = table.catalog_for(&tag("en")).unwrap();
    assert_eq!(catalog.get("app.title"), Some("My App"));
    assert_eq!(catalog.get("menu.file"), Some("File"));

    let filtered: Vec<_> = catalog.entries_with_prefix("menu.").collect();
    assert_eq!(filtered, vec![("menu.file", "File")]);
}

#[test]
fn resolve_prefers_exact_then_primary_language() {
    let root = LocaleRoot::new();
    root.write_po("en-US/m.po", &[("k", "us")]);
    root.write_po("en/m.po", &[("k", "generic")]);

    let table = StringTable::load(root.path(), false).unwrap();
    assert_eq!(table.resolve(&["en-US"]), tag("en-US"));
    assert_eq!(table.resolve(&["en-GB"]), tag("en"));
}

#[test]
fn resolve_always_returns_a_tag() {
    let root = LocaleRoot::new();
    root.write_po("de/m.po", &[("k", "v")]);
    root.write_po("fr/m.po", &[("k", "v")]);

    let table = StringTable::load(root.path(), false).unwrap();
    assert_eq!(table.resolve(&["ja", "ko"]), table.default_tag());
    assert_eq!(table.resolve(&["garbage!!", "fr"]), tag("fr"));
    assert_eq!(table.resolve::<&str>(&[]), table.default_tag());
}

#[test]
fn catalog_for_unknown_tag_is_not_found() {
    let root = LocaleRoot::new();
    root.write_po("de/m.po", &[("k", "v")]);

    let table = StringTable::load(root.path(), false).unwrap();
    let err = table.catalog_for(&tag("ja")).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[test]
fn nested_directories_are_scanned() {
    let root = LocaleRoot::new();
    root.write_po("en/base.po", &[("base", "b")]);
    // Self-describing formats resolve their tag at any depth.
    root.write_gotext("en/_app/_nested/more.json", "en", &[("k", "v")]);
    // PO tag comes from the immediate parent directory, which is not a tag
    // here, so this file is a scan error rather than a contribution.
    root.write_po("en/_app/_nested/extra.po", &[("deep.key", "deep value")]);

    let table = StringTable::load(root.path(), false).unwrap();
    assert_eq!(table.scan_errors().len(), 1);
    let catalog = table.catalog_for(&tag("en")).unwrap();
    assert_eq!(catalog.get("base"), Some("b"));
    assert_eq!(catalog.get("k"), Some("v"));
    assert_eq!(catalog.get("deep.key"), None);
}

#[test]
fn independent_tables_do_not_interfere() {
    let root_a = LocaleRoot::new();
    root_a.write_po("en/m.po", &[("k", "from a")]);
    let root_b = LocaleRoot::new();
    root_b.write_po("en/m.po", &[("k", "from b")]);

    let table_a = StringTable::load(root_a.path(), false).unwrap();
    let table_b = StringTable::load(root_b.path(), false).unwrap();

    assert_eq!(table_a.catalog_for(&tag("en")).unwrap().get("k"), Some("from a"));
    assert_eq!(table_b.catalog_for(&tag("en")).unwrap().get("k"), Some("from b"));
}
