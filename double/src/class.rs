//! Classes: named method tables shared by every instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use graft_types::{Name, NameError, Value};

/// Instance variables of one object.
pub type Ivars = HashMap<Name, Value>;

/// A real (class-level) method.
///
/// Receives the receiver's instance variables and the call arguments.
pub type RealMethod = Arc<dyn Fn(&mut Ivars, &[Value]) -> Value + Send + Sync>;

const ANONYMOUS_CLASS: &str = "#<Class:double>";

pub struct Class {
    name: String,
    methods: HashMap<Name, RealMethod>,
    mockable: AtomicBool,
}

impl Class {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            methods: HashMap::new(),
        }
    }

    /// Fresh class with no methods that already carries the double capability.
    pub(crate) fn anonymous_double() -> Arc<Self> {
        Arc::new(Self {
            name: ANONYMOUS_CLASS.to_owned(),
            methods: HashMap::new(),
            mockable: AtomicBool::new(true),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_mockable(&self) -> bool {
        self.mockable.load(Ordering::Acquire)
    }

    /// Grant the double capability. Returns `true` if it was not already present.
    pub(crate) fn grant_mockable(&self) -> bool {
        !self.mockable.swap(true, Ordering::AcqRel)
    }

    #[must_use]
    pub fn defines(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    #[must_use]
    pub fn method(&self, method: &str) -> Option<&RealMethod> {
        self.methods.get(method)
    }

    /// Defined method names, sorted.
    #[must_use]
    pub fn method_names(&self) -> Vec<&Name> {
        let mut names: Vec<&Name> = self.methods.keys().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("methods", &self.method_names())
            .field("mockable", &self.is_mockable())
            .finish()
    }
}

pub struct ClassBuilder {
    name: String,
    methods: HashMap<Name, RealMethod>,
}

impl ClassBuilder {
    /// Define a real method. Redefining a name replaces the earlier body.
    pub fn method<F>(mut self, name: &str, body: F) -> Result<Self, NameError>
    where
        F: Fn(&mut Ivars, &[Value]) -> Value + Send + Sync + 'static,
    {
        let name = Name::new(name)?;
        self.methods.insert(name, Arc::new(body));
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> Arc<Class> {
        Arc::new(Class {
            name: self.name,
            methods: self.methods,
            mockable: AtomicBool::new(false),
        })
    }
}
