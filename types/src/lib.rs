//! Core domain types for Graft.
//!
//! This crate contains pure domain types with no IO and minimal dependencies.
//! Both the double engine and the tracked-model engine build on them.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod settings;
pub use settings::{DispatchTracing, RegistryScope};

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Dynamic value passed to and returned from doubles and tracked attributes.
///
/// `Value::Null` plays the role of "nil": an explicitly empty value.
pub use serde_json::Value;

/// Key-value map handed to a tracked model at construction.
pub type Attributes = serde_json::Map<String, Value>;

// ============================================================================
// Names
// ============================================================================

/// A method or attribute name.
///
/// Guaranteed non-empty and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name must not be empty")]
    Empty,
    #[error("name {name:?} must not contain whitespace")]
    Whitespace { name: String },
}

impl Name {
    pub fn new(value: impl Into<String>) -> Result<Self, NameError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(NameError::Empty);
        }
        if value.chars().any(char::is_whitespace) {
            return Err(NameError::Whitespace { name: value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0
    }
}

impl From<StaticName> for Name {
    fn from(value: StaticName) -> Self {
        Self(value.0.to_owned())
    }
}

impl std::ops::Deref for Name {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A compile-time checked static name.
///
/// Holds the same invariant as [`Name`] for ASCII input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaticName(&'static str);

impl StaticName {
    #[must_use]
    pub const fn new(value: &'static str) -> Self {
        assert!(!value.is_empty(), "StaticName must not be empty");
        let bytes = value.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            assert!(
                !bytes[i].is_ascii_whitespace(),
                "StaticName must not contain whitespace"
            );
            i += 1;
        }
        Self(value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StaticName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// ============================================================================
// Value helpers
// ============================================================================

/// Whether a value counts as "recorded" for change comparison.
///
/// `Null` is the empty value and is treated the same as a missing one.
#[must_use]
pub fn is_recorded(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}
