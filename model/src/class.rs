//! Model classes and their attribute registries.
//!
//! A class owns the accessors it declared. Which names construction, `changed`
//! and `restore` walk over depends on the registry scope:
//!
//! - `PerClass`: exactly the class's own declarations.
//! - `Shared`: the union of every class built from the same [`ModelRegistry`].

use std::sync::{Arc, PoisonError, RwLock};

use graft_types::{Name, RegistryScope, StaticName};

use crate::error::ModelError;

/// Ordered, duplicate-free name list shared between classes.
#[derive(Debug, Clone, Default)]
struct SharedNames(Arc<RwLock<Vec<Name>>>);

impl SharedNames {
    fn snapshot(&self) -> Vec<Name> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn union(&self, names: &[Name]) {
        let mut shared = self.0.write().unwrap_or_else(PoisonError::into_inner);
        for name in names {
            if !shared.contains(name) {
                shared.push(name.clone());
            }
        }
    }
}

/// Factory for model classes under one registry scope.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    scope: RegistryScope,
    shared: SharedNames,
}

impl ModelRegistry {
    #[must_use]
    pub fn new(scope: RegistryScope) -> Self {
        Self {
            scope,
            shared: SharedNames::default(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> RegistryScope {
        self.scope
    }

    #[must_use]
    pub fn class(&self, name: impl Into<String>) -> ModelClassBuilder {
        let builder = ModelClass::builder(name);
        match self.scope {
            RegistryScope::PerClass => builder,
            RegistryScope::Shared => ModelClassBuilder {
                shared: Some(self.shared.clone()),
                ..builder
            },
        }
    }
}

#[derive(Debug)]
pub struct ModelClass {
    name: String,
    declared: Vec<Name>,
    shared: Option<SharedNames>,
}

impl ModelClass {
    /// Builder for a class with its own attribute registry.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ModelClassBuilder {
        ModelClassBuilder {
            name: name.into(),
            declared: Vec::new(),
            shared: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn scope(&self) -> RegistryScope {
        if self.shared.is_some() {
            RegistryScope::Shared
        } else {
            RegistryScope::PerClass
        }
    }

    /// Names this class generated accessors for, in declaration order.
    #[must_use]
    pub fn accessors(&self) -> &[Name] {
        &self.declared
    }

    #[must_use]
    pub fn declares(&self, attribute: &str) -> bool {
        self.declared.iter().any(|name| name == attribute)
    }

    /// Names that construction, `changed` and `restore` operate on.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<Name> {
        match &self.shared {
            Some(shared) => shared.snapshot(),
            None => self.declared.clone(),
        }
    }

    pub(crate) fn require(&self, attribute: &str) -> Result<(), ModelError> {
        if self.declares(attribute) {
            Ok(())
        } else {
            Err(ModelError::UnknownAttribute {
                class: self.name.clone(),
                attribute: attribute.to_owned(),
            })
        }
    }
}

#[derive(Debug)]
pub struct ModelClassBuilder {
    name: String,
    declared: Vec<Name>,
    shared: Option<SharedNames>,
}

impl ModelClassBuilder {
    /// Declare tracked attributes. Repeat declarations are merged in first-seen order.
    pub fn attr_accessor<I, S>(mut self, names: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = Name::new(name.as_ref())?;
            self.push(name);
        }
        Ok(self)
    }

    /// Infallible form for compile-time names.
    pub fn declare_static(mut self, names: &[StaticName]) -> Self {
        for name in names {
            self.push(Name::from(*name));
        }
        self
    }

    fn push(&mut self, name: Name) {
        if !self.declared.contains(&name) {
            self.declared.push(name);
        }
    }

    #[must_use]
    pub fn build(self) -> Arc<ModelClass> {
        if let Some(shared) = &self.shared {
            shared.union(&self.declared);
        }
        let class = ModelClass {
            name: self.name,
            declared: self.declared,
            shared: self.shared,
        };
        tracing::debug!(
            class = %class.name,
            attributes = class.declared.len(),
            scope = class.scope().as_str(),
            "model class declared"
        );
        Arc::new(class)
    }
}
