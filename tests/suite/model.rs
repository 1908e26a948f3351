//! Tracked model tests

use std::sync::Arc;

use graft::{
    Graft, GraftConfig, Model, ModelClass, ModelError, ModelRegistry, RegistryScope, Tracked,
    tracked_model,
};
use serde_json::json;

use crate::common::{attrs, init_test_tracing};

tracked_model! {
    pub struct Item { name, desc }
}

fn item_class() -> Arc<ModelClass> {
    ModelClass::builder("Item")
        .attr_accessor(["name", "desc"])
        .unwrap()
        .build()
}

#[test]
fn fresh_model_is_unchanged() {
    let item = Item::new(attrs(json!({"name": "a"})));
    assert!(!item.changed());
    assert!(!item.name_changed());
    assert!(!item.desc_changed());
}

#[test]
fn one_write_marks_only_that_attribute() {
    let mut item = Item::new(attrs(json!({"name": "a"})));
    item.set_name("b");

    assert!(item.name_changed());
    assert!(!item.desc_changed());
    assert!(item.changed());
}

#[test]
fn writing_back_initial_value_reports_unchanged() {
    let mut item = Item::new(attrs(json!({"name": "a", "desc": "d"})));
    item.set_name("b");
    item.set_desc("e");
    item.set_name("a");

    assert!(!item.name_changed());
    assert!(item.desc_changed());
    let changed: Vec<String> = item
        .changed_attributes()
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(changed, vec!["desc"]);
    // history is non-empty, so the object as a whole still counts as written
    assert!(item.changed());
}

#[test]
fn restore_resets_values_and_is_idempotent() {
    init_test_tracing();
    let mut item = Item::new(attrs(json!({"name": "a", "desc": "d"})));
    item.set_name("b");
    item.set_name("c");

    item.restore();
    assert_eq!(item.name(), Some(&json!("a")));
    assert_eq!(item.desc(), Some(&json!("d")));
    assert!(!item.changed());
    assert!(item.model().history("name").unwrap().is_empty());

    item.restore();
    assert_eq!(item.name(), Some(&json!("a")));
    assert!(!item.changed());
}

#[test]
fn restore_on_fresh_model_is_noop() {
    let mut model = Model::new(item_class(), attrs(json!({"name": "a"})));
    model.restore();
    assert_eq!(model.get("name").unwrap(), Some(&json!("a")));
    assert_eq!(model.get("desc").unwrap(), None);
    assert!(!model.changed());
}

#[test]
fn restore_leaves_unwritten_attributes_alone() {
    let mut model = Model::new(item_class(), attrs(json!({"name": "a", "desc": "d"})));
    model.set("name", "b").unwrap();
    model.restore();
    assert_eq!(model.get("desc").unwrap(), Some(&json!("d")));
    assert_eq!(model.initial_value("desc").unwrap(), Some(&json!("d")));
}

#[test]
fn dynamic_accessors_match_generated_ones() {
    let mut model = Model::new(item_class(), attrs(json!({"name": "a"})));
    model.set("name", "b").unwrap();
    assert_eq!(model.get("name").unwrap(), Some(&json!("b")));
    assert!(model.attr_changed("name").unwrap());
    assert!(!model.attr_changed("desc").unwrap());
    assert!(model.changed());
    assert_eq!(model.history("name").unwrap(), &[json!("b")]);
}

#[test]
fn initial_value_is_fixed_after_construction() {
    let mut model = Model::new(item_class(), attrs(json!({"name": "a"})));
    model.set("name", "b").unwrap();
    model.set("name", "c").unwrap();
    assert_eq!(model.initial_value("name").unwrap(), Some(&json!("a")));
    assert_eq!(model.history("name").unwrap(), &[json!("b"), json!("c")]);
}

#[test]
fn undeclared_accessor_is_an_error() {
    let model = Model::new(item_class(), attrs(json!({"color": "red"})));
    assert_eq!(
        model.attr_changed("color").unwrap_err(),
        ModelError::UnknownAttribute {
            class: "Item".to_string(),
            attribute: "color".to_string(),
        }
    );
    assert!(!model.changed());
}

#[test]
fn per_class_scope_keeps_unrelated_classes_apart() {
    let graft = Graft::default();
    let item = graft.model_class("Item").attr_accessor(["name"]).unwrap().build();
    let user = graft.model_class("User").attr_accessor(["email"]).unwrap().build();

    let model = Model::new(item, attrs(json!({"name": "a", "email": "x@y"})));
    assert_eq!(model.attribute_names().len(), 1);
    assert_eq!(user.attribute_names().len(), 1);
}

#[test]
fn shared_scope_bleeds_declared_names_between_classes() {
    let config = GraftConfig::from_toml_str("[model]\nregistry_scope = \"shared\"\n").unwrap();
    let graft = Graft::new(&config);
    let item = graft.model_class("Item").attr_accessor(["name"]).unwrap().build();
    let _user = graft.model_class("User").attr_accessor(["email"]).unwrap().build();

    // construction walks the shared list, accessors stay per class
    let model = Model::new(item, attrs(json!({"name": "a", "email": "x@y"})));
    let names: Vec<String> = model
        .attribute_names()
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(names, vec!["name", "email"]);
    assert!(model.get("email").is_err());
    assert!(!model.changed());
}

#[test]
fn separate_shared_registries_do_not_mix() {
    let first = ModelRegistry::new(RegistryScope::Shared);
    let second = ModelRegistry::new(RegistryScope::Shared);
    let a = first.class("A").attr_accessor(["x"]).unwrap().build();
    let _b = second.class("B").attr_accessor(["y"]).unwrap().build();
    assert_eq!(a.attribute_names().len(), 1);
}
