//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use graft::{Attributes, Class, Object, Value};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Route `graft` events to the test writer so they show up on failure.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("graft=trace"))
        .try_init();
}

/// A class with one real method, `greet`, returning `"hi"`.
pub fn greeter_class() -> Arc<Class> {
    Class::builder("Greeter")
        .method("greet", |_, _| Value::from("hi"))
        .expect("valid method name")
        .method("echo", |_, args| args.first().cloned().unwrap_or(Value::Null))
        .expect("valid method name")
        .build()
}

pub fn greeter() -> Object {
    Object::new(greeter_class())
}

/// Build constructor input from a JSON object literal.
pub fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
