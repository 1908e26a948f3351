//! Tracked model instances.

use std::collections::HashMap;
use std::sync::Arc;

use graft_types::{Attributes, Name, Value, is_recorded};

use crate::class::ModelClass;
use crate::error::ModelError;

/// State of one attribute on one instance.
#[derive(Debug, Clone, Default, PartialEq)]
struct Slot {
    initial: Option<Value>,
    current: Option<Value>,
    history: Vec<Value>,
}

impl Slot {
    fn initialized(value: Value) -> Self {
        Self {
            initial: Some(value.clone()),
            current: Some(value),
            history: Vec::new(),
        }
    }

    fn is_written(&self) -> bool {
        !self.history.is_empty()
    }

    /// Compares the initial value with the last write only.
    fn is_changed(&self) -> bool {
        match self.history.last() {
            Some(last) if is_recorded(self.initial.as_ref()) => {
                self.initial.as_ref() != Some(last)
            }
            _ => false,
        }
    }
}

/// An instance of a [`ModelClass`].
///
/// Every write through [`Model::set`] is recorded. Values given at
/// construction are the baseline and never show up in history.
#[derive(Debug, Clone)]
pub struct Model {
    class: Arc<ModelClass>,
    slots: HashMap<Name, Slot>,
}

impl Model {
    /// Initialize every declared attribute present in `attributes`.
    ///
    /// Keys that match no declared attribute are ignored.
    #[must_use]
    pub fn new(class: Arc<ModelClass>, attributes: Attributes) -> Self {
        let declared = class.attribute_names();
        let mut slots = HashMap::with_capacity(declared.len());
        let mut ignored = Vec::new();

        for (key, value) in attributes {
            match declared.iter().find(|name| **name == *key) {
                Some(name) => {
                    slots.insert(name.clone(), Slot::initialized(value));
                }
                None => ignored.push(key),
            }
        }

        if !ignored.is_empty() {
            tracing::debug!(
                class = class.name(),
                ?ignored,
                "ignored undeclared attributes at construction"
            );
        }

        Self { class, slots }
    }

    #[must_use]
    pub fn class(&self) -> &Arc<ModelClass> {
        &self.class
    }

    /// Reader. `None` means the attribute was never initialized or written.
    pub fn get(&self, attribute: &str) -> Result<Option<&Value>, ModelError> {
        self.class.require(attribute)?;
        Ok(self.slots.get(attribute).and_then(|slot| slot.current.as_ref()))
    }

    /// Writer. Appends to history even if `value` equals the current value.
    pub fn set(&mut self, attribute: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        self.class.require(attribute)?;
        let value = value.into();
        let slot = self.slots.entry(Name::new(attribute)?).or_default();
        slot.history.push(value.clone());
        slot.current = Some(value);
        Ok(())
    }

    /// Whether the last write differs from the construction-time value.
    ///
    /// `false` when nothing was written or no initial value was recorded.
    pub fn attr_changed(&self, attribute: &str) -> Result<bool, ModelError> {
        self.class.require(attribute)?;
        Ok(self.slots.get(attribute).is_some_and(Slot::is_changed))
    }

    pub fn history(&self, attribute: &str) -> Result<&[Value], ModelError> {
        self.class.require(attribute)?;
        Ok(self
            .slots
            .get(attribute)
            .map_or(&[][..], |slot| slot.history.as_slice()))
    }

    pub fn initial_value(&self, attribute: &str) -> Result<Option<&Value>, ModelError> {
        self.class.require(attribute)?;
        Ok(self.slots.get(attribute).and_then(|slot| slot.initial.as_ref()))
    }

    #[must_use]
    pub fn attribute_names(&self) -> Vec<Name> {
        self.class.attribute_names()
    }

    /// `true` iff any attribute has been written since construction.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.class
            .attribute_names()
            .iter()
            .any(|name| self.slots.get(name).is_some_and(Slot::is_written))
    }

    /// Attributes whose change query reports `true`, in declaration order.
    #[must_use]
    pub fn changed_attributes(&self) -> Vec<Name> {
        self.class
            .attribute_names()
            .into_iter()
            .filter(|name| self.slots.get(name).is_some_and(Slot::is_changed))
            .collect()
    }

    /// Drop all history and put written attributes back to their initial value.
    ///
    /// Does nothing when [`Model::changed`] is `false`.
    pub fn restore(&mut self) {
        if !self.changed() {
            return;
        }

        let mut restored = 0usize;
        for name in self.class.attribute_names() {
            if let Some(slot) = self.slots.get_mut(&name)
                && slot.is_written()
            {
                slot.history.clear();
                slot.current = slot.initial.clone();
                restored += 1;
            }
        }
        tracing::debug!(class = self.class.name(), restored, "model restored");
    }
}
