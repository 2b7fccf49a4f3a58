//! Integration tests for the translation registry
//!
//! These tests drive the public API end to end: loading a table from disk,
//! registering it, translating, and switching languages.

use serial_test::serial;
use std::sync::Arc;
use tempfile::TempDir;
use translation_registry::i18n::{
    Arg, PathMap, Registry, TableValidator, TranslationContext, TranslationError, TranslationTable,
};
use translation_registry::t;

// ==================== Test Helpers ====================

const TABLE_JSON: &str = r#"{
    "en": {
        "greet": "Hello {0}",
        "pair": "{0} and {1}",
        "twice": "{0} {0}",
        "menu": { "file": { "open": "Open", "save": "Save {0}" } }
    },
    "fr": {
        "greet": "Bonjour {0}",
        "pair": "{0} et {1}",
        "twice": "{0} {0}",
        "menu": { "file": { "open": "Ouvrir", "save": "Enregistrer {0}" } }
    }
}"#;

fn table() -> TranslationTable {
    TranslationTable::from_json_str(TABLE_JSON).expect("valid table")
}

fn registry() -> Registry {
    Registry::new("en", table()).expect("registry")
}

/// Write the table to a temp file and return its path
fn write_table(temp_dir: &TempDir) -> std::path::PathBuf {
    let path = temp_dir.path().join("translations.json");
    std::fs::write(&path, TABLE_JSON).expect("Failed to write translations");
    path
}

// ==================== Path Map Tests ====================

#[test]
fn test_path_map_generated_twice_is_identical() {
    let table = table();
    let first = table.first_language().map(|(_, v)| v).unwrap();
    assert_eq!(PathMap::generate(first), PathMap::generate(first));
}

#[test]
fn test_registry_path_map_leaves_equal_paths() {
    let registry = registry();
    let paths = registry.path_map().paths();
    assert_eq!(paths, vec!["greet", "pair", "twice", "menu.file.open", "menu.file.save"]);
    for path in &paths {
        assert_eq!(registry.path_map().get(path), Some(path.as_str()));
    }
}

// ==================== Cache Identity Tests ====================

#[test]
fn test_cache_identity() {
    let registry = registry();
    let a = t!(registry, "pair", 1).unwrap();
    let b = t!(registry, "pair", 1).unwrap();
    let c = t!(registry, "pair", 2).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
}

#[test]
fn test_cache_never_shrinks() {
    let registry = registry();
    for i in 0..5 {
        t!(registry, "greet", i).unwrap();
    }
    registry.change_language("fr").unwrap();
    registry.change_language("en").unwrap();
    assert_eq!(registry.cached_len(), 5);
}

// ==================== Substitution Tests ====================

#[test]
fn test_substitution_order() {
    let registry = registry();
    assert_eq!(t!(registry, "pair", "x", "y").unwrap().value(), "x and y");
    assert_eq!(t!(registry, "twice", "x").unwrap().value(), "x {0}");
}

#[test]
fn test_argument_array_flattening() {
    let registry = registry();
    let variadic = t!(registry, "greet", "Sam").unwrap();
    let array = registry.translate("greet", &[Arg::from(vec!["Sam"])]).unwrap();
    assert!(Arc::ptr_eq(&variadic, &array));
    assert_eq!(array.value(), "Hello Sam");

    let pair = registry.translate("pair", &[Arg::from(["x", "y"])]).unwrap();
    assert_eq!(pair.value(), "x and y");
}

#[test]
fn test_malformed_path_degrades_instead_of_failing() {
    let registry = registry();
    let value = registry
        .translate_from_language("en", "menu.nothing", &[])
        .unwrap();
    assert_eq!(value, r#"{"file":{"open":"Open","save":"Save {0}"}}"#);
    assert_eq!(registry.metrics().missing_segments(), 1);
}

// ==================== Language Switch Tests ====================

#[test]
fn test_language_switch_propagates() {
    let table = TranslationTable::from_json_str(
        r#"{ "en": { "greet": "Hello {0}" }, "fr": { "greet": "Bonjour {0}" } }"#,
    )
    .unwrap();
    let registry = Registry::new("en", table).unwrap();

    let state = t!(registry, "greet", "Sam").unwrap();
    assert_eq!(state.value(), "Hello Sam");

    registry.change_language("fr").unwrap();
    assert_eq!(state.value(), "Bonjour Sam");
    assert_eq!(registry.language(), "fr");
}

#[test]
fn test_same_language_switch_is_noop() {
    let registry = registry();
    let state = t!(registry, "greet", "Sam").unwrap();

    registry.change_language("en").unwrap();

    assert_eq!(state.value(), "Hello Sam");
    assert_eq!(registry.metrics().states_reresolved(), 0);
}

#[test]
fn test_unknown_language_rejected() {
    let registry = registry();
    let err = registry
        .translate_from_language("de", "greet", &[])
        .unwrap_err();
    assert!(matches!(err, TranslationError::UnknownLanguage(ref lang) if lang == "de"));
}

#[test]
fn test_switch_round_trip_restores_values() {
    let registry = registry();
    let save = t!(registry, "menu.file.save", "notes.txt").unwrap();

    registry.change_language("fr").unwrap();
    assert_eq!(save.value(), "Enregistrer notes.txt");

    registry.change_language("en").unwrap();
    assert_eq!(save.value(), "Save notes.txt");
    assert_eq!(save.args(), ["notes.txt"]);
    assert_eq!(save.path(), "menu.file.save");
}

// ==================== Loading Tests ====================

#[test]
fn test_load_from_file_and_register() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_table(&temp_dir);

    let table = TranslationTable::from_file(&path).unwrap();
    assert!(TableValidator::validate(&table).is_clean());

    let context = TranslationContext::new();
    let registry = context.install("fr", table).unwrap();
    assert_eq!(registry.languages(), ["en", "fr"]);
    assert_eq!(t!(registry, "menu.file.open").unwrap().value(), "Ouvrir");
}

#[test]
fn test_register_empty_table_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("empty.json");
    std::fs::write(&path, "{}").unwrap();

    let table = TranslationTable::from_file(&path).unwrap();
    let err = TranslationContext::new().install("en", table).unwrap_err();
    assert!(matches!(err, TranslationError::NoLanguagesProvided));
}

// ==================== Global Context Tests ====================

#[test]
#[serial]
fn test_global_context_lifecycle() {
    let context = TranslationContext::global();

    // Other tests in this binary never touch the global context, so the only
    // state it can be in here is the one this test leaves behind.
    if !context.is_registered() {
        assert!(matches!(context.get(), Err(TranslationError::NotRegistered)));
        context.install("en", table()).unwrap();
    }

    let registry = context.get().unwrap();
    assert!(Arc::ptr_eq(&registry, &TranslationContext::global().get().unwrap()));
    assert!(matches!(
        context.install("fr", table()),
        Err(TranslationError::AlreadyRegistered)
    ));
}
