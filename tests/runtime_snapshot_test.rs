//! Integration tests for snapshot-backed runtime context and config discovery

use scopehint_core::{
    CompletionEngine, CompletionRequest, Config, ContextBinding, Error, MergeStrategy, Origin,
    RuntimeSnapshot,
};
use std::fs;
use tempfile::TempDir;

fn write_snapshot(dir: &TempDir) -> std::path::PathBuf {
    let snapshot = serde_json::json!({
        "root": "window",
        "binding": "Global",
        "objects": {
            "window": {
                "prototype": "objproto",
                "properties": [
                    { "name": "document", "value": { "$ref": "document" } },
                    { "name": "devicePixelRatio", "value": 2 },
                    { "name": "__secret", "value": true, "enumerable": false }
                ]
            },
            "document": {
                "prototype": "objproto",
                "properties": [ { "name": "title", "value": "home" } ]
            },
            "objproto": {
                "properties": [
                    { "name": "toString", "value": { "$ref": "fn" } },
                    { "name": "hasOwnProperty", "value": { "$ref": "fn" } }
                ]
            },
            "fn": { "callable": true }
        }
    });
    let path = dir.path().join("runtime.json");
    fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    path
}

#[test]
fn test_snapshot_drives_member_completion() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_snapshot(&temp_dir);

    let snapshot = RuntimeSnapshot::load_from_file(&path).unwrap();
    assert_eq!(snapshot.binding, ContextBinding::Global);
    let runtime = snapshot.build().unwrap();

    let engine = CompletionEngine::for_host(true);
    let request = CompletionRequest::at_end("document.").with_runtime(runtime.context());
    let result = engine.rank(&request);

    // own property first, inherited ones at half the score
    assert_eq!(result.names(), vec!["title", "toString", "hasOwnProperty"]);
    assert_eq!(result.get("title").unwrap().score, 10.0);
    assert_eq!(result.get("toString").unwrap().score, 5.0);
}

#[test]
fn test_snapshot_globals_mix_with_static_bindings() {
    let temp_dir = TempDir::new().unwrap();
    let runtime = RuntimeSnapshot::load_from_file(&write_snapshot(&temp_dir))
        .unwrap()
        .build()
        .unwrap();

    let source = "const dx = 1;\nd";
    let request = CompletionRequest::at_end(source).with_runtime(runtime.context());
    let result = CompletionEngine::script().rank(&request);

    assert_eq!(
        result.names(),
        vec!["dx", "document", "devicePixelRatio", "delete", "default", "do"]
    );
    assert_eq!(result.get("dx").unwrap().origin, Origin::Static);
    assert_eq!(result.get("document").unwrap().origin, Origin::Dynamic);
    assert!(result.get("__secret").is_none());
}

#[test]
fn test_non_enumerable_properties_are_opt_in() {
    let temp_dir = TempDir::new().unwrap();
    let runtime = RuntimeSnapshot::load_from_file(&write_snapshot(&temp_dir))
        .unwrap()
        .build()
        .unwrap();

    let mut config = Config::default();
    config.runtime.include_non_enumerable = true;
    let engine = CompletionEngine::with_config(config);

    let request = CompletionRequest::at_end("__").with_runtime(runtime.context());
    assert_eq!(engine.rank(&request).names(), vec!["__secret"]);
}

#[test]
fn test_dangling_snapshot_reference_is_rejected() {
    let json = r#"{ "root": "window", "objects": { "window": {
        "properties": [ { "name": "x", "value": { "$ref": "gone" } } ] } } }"#;
    let err = RuntimeSnapshot::from_json_str(json)
        .unwrap()
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::SnapshotError(_)));
}

#[test]
fn test_config_discovered_from_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("web").join("src");
    fs::create_dir_all(&nested).unwrap();

    let config = serde_json::json!({
        "ranking": { "static_weight": 4.0, "merge": "SUM" },
        "runtime": { "max_prototype_depth": 2 }
    });
    fs::write(
        temp_dir.path().join(".scopehint.json"),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    assert_eq!(
        Config::find_config_file(&nested),
        Some(temp_dir.path().join(".scopehint.json"))
    );

    let config = Config::discover(&nested).unwrap();
    assert_eq!(config.ranking.static_weight, 4.0);
    assert_eq!(config.ranking.dynamic_weight, 10.0);
    assert_eq!(config.ranking.merge, MergeStrategy::Sum);
    assert_eq!(config.runtime.max_prototype_depth, 2);
    assert!(!config.parser.strict);

    let engine = CompletionEngine::with_config(config);
    let result = engine.rank(&CompletionRequest::at_end("let gamma;\ng"));
    assert_eq!(result.get("gamma").unwrap().score, 4.0);
}

#[test]
fn test_saved_config_round_trips_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("scopehint.json");

    let mut config = Config::default();
    config.parser.strict = true;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert!(loaded.parser.strict);
    assert_eq!(loaded.ranking.merge, MergeStrategy::Max);
}
