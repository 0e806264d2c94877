//! JSON output of the fixture library.

use std::collections::HashSet;

use serde_json::{Value, json};

use docgraph::config::Options;
use docgraph::converter::Converter;
use docgraph::serialization::{project_to_json, write_json};

use super::json_child;
use crate::helpers::program_fixtures::*;

// =============================================================================
// HELPERS
// =============================================================================

fn render_library(options: Options) -> String {
    let program = library_program();
    let converter = Converter::new(options);
    let (_, json) = docgraph::render(&converter, &program, &program, program.entry_points())
        .unwrap_or_else(|e| panic!("render failed: {}", e));
    json
}

fn library_value() -> Value {
    serde_json::from_str(&render_library(repo_options())).unwrap()
}

/// Ids of every serialized reflection (objects carrying `kindString`).
fn collect_ids(value: &Value, ids: &mut Vec<u64>) {
    match value {
        Value::Object(object) => {
            if object.contains_key("kindString") {
                if let Some(id) = object.get("id").and_then(Value::as_u64) {
                    ids.push(id);
                }
            }
            for nested in object.values() {
                collect_ids(nested, ids);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_ids(item, ids);
            }
        }
        _ => {}
    }
}

// =============================================================================
// SHAPE
// =============================================================================

#[test]
fn test_root_and_module() {
    let value = library_value();
    assert_eq!(value["id"], 0);
    assert_eq!(value["name"], "library");
    assert_eq!(value["kindString"], "project");

    let index = json_child(&value, &["index"]);
    assert_eq!(index["id"], 1);
    assert_eq!(index["kindString"], "module");
    assert_eq!(
        index["sources"],
        json!([{"fileName": "src/index.ts", "line": 1, "character": 0}])
    );
    assert_eq!(index["groups"][0]["title"], "Namespaces");
    assert!(json_child(&value, &["index", "internal"]).is_null());
}

#[test]
fn test_class_output() {
    let value = library_value();
    let named_id = json_child(&value, &["index", "Named"])["id"].clone();
    let dog_id = json_child(&value, &["index", "Dog"])["id"].clone();
    let animal = json_child(&value, &["index", "Animal"]);

    assert_eq!(animal["kindString"], "class");
    assert_eq!(animal["flags"], json!({"isExported": true, "isAbstract": true}));
    assert_eq!(animal["comment"], json!({"shortText": "Base class for animals."}));
    assert_eq!(
        animal["implementedTypes"],
        json!([{"type": "reference", "name": "Named", "id": named_id}])
    );
    assert_eq!(
        animal["extendedBy"],
        json!([{"type": "reference", "name": "Dog", "id": dog_id}])
    );
}

#[test]
fn test_signature_output() {
    let value = library_value();
    let speak = json_child(&value, &["index", "Animal", "speak"]);
    assert!(speak.get("comment").is_none());
    let signature = &speak["signatures"][0];
    assert_eq!(signature["kindString"], "callSignature");
    assert_eq!(signature["comment"]["shortText"], "Make a sound.");
    assert_eq!(signature["type"], json!({"type": "intrinsic", "name": "string"}));

    let parse = json_child(&value, &["index", "parse"]);
    let parameter = &parse["signatures"][0]["parameters"][0];
    assert_eq!(parameter["name"], "input");
    assert_eq!(parameter["kindString"], "parameter");
    assert_eq!(parameter["comment"]["shortText"], "The raw input.");
    assert_eq!(parse["signatures"][0]["sources"][0]["line"], 60);
}

#[test]
fn test_accessor_output() {
    let value = library_value();
    let age = json_child(&value, &["index", "Animal", "age"]);
    assert_eq!(age["hasGetter"], true);
    assert_eq!(age["hasSetter"], true);
    assert_eq!(age["getSignature"]["kindString"], "getSignature");
    assert_eq!(
        age["setSignature"]["parameters"][0]["type"],
        json!({"type": "intrinsic", "name": "number"})
    );
}

#[test]
fn test_reference_output() {
    let value = library_value();
    let puppy = json_child(&value, &["index", "Puppy"]);
    assert_eq!(puppy["kindString"], "reference");
    assert_eq!(puppy["target"], json_child(&value, &["index", "Dog"])["id"]);
}

#[test]
fn test_type_alias_output() {
    let value = library_value();
    let maybe = json_child(&value, &["index", "Maybe"]);
    assert_eq!(maybe["typeParameters"][0]["name"], "T");
    assert_eq!(
        maybe["type"],
        json!({
            "type": "union",
            "types": [
                {"type": "typeParameter", "name": "T"},
                {"type": "literal", "value": null},
            ],
        })
    );
}

#[test]
fn test_enum_member_values_are_integers() {
    let value = library_value();
    let large = json_child(&value, &["index", "Size", "Large"]);
    assert_eq!(large["type"], json!({"type": "literal", "value": 1}));
    assert!(large["type"]["value"].is_i64());
    let output = serde_json::to_string(&large["type"]).unwrap();
    assert!(!output.contains("1.0"), "{}", output);
}

#[test]
fn test_reflection_ids_are_unique() {
    let mut ids = Vec::new();
    collect_ids(&library_value(), &mut ids);
    let distinct: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(distinct.len(), ids.len(), "duplicate ids in {:?}", ids);
    assert!(ids.contains(&0));
}

// =============================================================================
// OUTPUT
// =============================================================================

#[test]
fn test_output_is_deterministic() {
    assert_eq!(render_library(repo_options()), render_library(repo_options()));
}

#[test]
fn test_pretty_option() {
    let compact = render_library(Options {
        pretty: false,
        ..repo_options()
    });
    assert!(!compact.contains('\n'));
    assert!(render_library(repo_options()).contains('\n'));
}

#[test]
fn test_write_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docs").join("api.json");
    let conversion = convert_with(&library_program(), repo_options());

    write_json(&conversion.project, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, project_to_json(&conversion.project, true).unwrap());
    let value: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["name"], "library");
}
