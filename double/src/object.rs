//! Objects and the generic invocation entry point.

use std::collections::BTreeMap;
use std::sync::Arc;

use graft_types::{DispatchTracing, Name, StaticName, Value};

use crate::class::{Class, Ivars};
use crate::dispatch::{Dispatch, DispatchTable};
use crate::error::DoubleError;

const STUB: StaticName = StaticName::new("stub");
const WATCH: StaticName = StaticName::new("watch");
const CALLED_TIMES: StaticName = StaticName::new("called_times");
const CALL_COUNTS: StaticName = StaticName::new("call_counts");

/// Capability methods every double answers to.
pub const CAPABILITY_METHODS: [StaticName; 4] = [STUB, WATCH, CALLED_TIMES, CALL_COUNTS];

/// An instance of a [`Class`].
///
/// Stubs and watches installed here belong to this instance only. Siblings of
/// the same class never see them, even after the class is augmented.
#[derive(Debug)]
pub struct Object {
    class: Arc<Class>,
    ivars: Ivars,
    table: DispatchTable,
    tracing: DispatchTracing,
}

impl Object {
    #[must_use]
    pub fn new(class: Arc<Class>) -> Self {
        Self {
            class,
            ivars: Ivars::new(),
            table: DispatchTable::default(),
            tracing: DispatchTracing::default(),
        }
    }

    #[must_use]
    pub fn with_ivars(class: Arc<Class>, ivars: Ivars) -> Self {
        Self {
            ivars,
            ..Self::new(class)
        }
    }

    #[must_use]
    pub fn with_dispatch_tracing(mut self, tracing: DispatchTracing) -> Self {
        self.tracing = tracing;
        self
    }

    pub fn set_dispatch_tracing(&mut self, tracing: DispatchTracing) {
        self.tracing = tracing;
    }

    #[must_use]
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// Whether this object's class carries the double capability.
    #[must_use]
    pub fn is_double(&self) -> bool {
        self.class.is_mockable()
    }

    /// Whether `invoke(name, ..)` would dispatch instead of failing.
    #[must_use]
    pub fn responds_to(&self, name: &str) -> bool {
        if self.table.binding(name).is_some() || self.class.defines(name) {
            return true;
        }
        self.is_double() && CAPABILITY_METHODS.iter().any(|m| m.as_str() == name)
    }

    #[must_use]
    pub fn ivar(&self, name: &str) -> Option<&Value> {
        self.ivars.get(name)
    }

    /// Returns the previous value, if any.
    pub fn set_ivar(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, DoubleError> {
        let name = Name::new(name)?;
        Ok(self.ivars.insert(name, value.into()))
    }

    /// Call `name` with `args`.
    ///
    /// Instance bindings win over the class, and the class wins over the
    /// capability methods of a double. A name nobody answers to fails with
    /// [`DoubleError::MethodNotFound`].
    pub fn invoke(&mut self, name: &str, args: &[Value]) -> Result<Value, DoubleError> {
        let Some(dispatch) = self.table.resolve(name, &self.class) else {
            if self.is_double()
                && let Some(method) = CAPABILITY_METHODS.into_iter().find(|m| m.as_str() == name)
            {
                return self.invoke_capability(method, args);
            }
            return Err(DoubleError::method_not_found(self.class.name(), name));
        };

        let count = if dispatch.is_watched() {
            self.table.bump(name)
        } else {
            None
        };
        if self.tracing.is_enabled() {
            tracing::trace!(
                class = self.class.name(),
                method = name,
                kind = dispatch.kind(),
                count,
                "dispatch"
            );
        }

        match dispatch {
            Dispatch::Stub(value) | Dispatch::WatchedStub(value) => Ok(value),
            Dispatch::Real(method) | Dispatch::WatchedReal(method) => {
                Ok(method(&mut self.ivars, args))
            }
        }
    }

    /// Make `name` return `value` on this instance, for any arguments.
    pub fn stub(&mut self, name: &str, value: impl Into<Value>) -> Result<(), DoubleError> {
        self.require_capability(STUB)?;
        let name = Name::new(name)?;
        tracing::debug!(class = self.class.name(), method = %name, "stub installed");
        self.table.stub(name, value.into());
        Ok(())
    }

    /// Start counting calls to `name`. Returns the current count.
    ///
    /// Repeat calls keep the count. A name the class implements is wrapped so
    /// calls still reach the real method; otherwise only a stub can count it.
    pub fn watch(&mut self, name: &str) -> Result<u64, DoubleError> {
        self.require_capability(WATCH)?;
        let name = Name::new(name)?;
        tracing::debug!(
            class = self.class.name(),
            method = %name,
            wraps_real = self.class.defines(&name),
            "watch installed"
        );
        Ok(self.table.watch(name, &self.class))
    }

    /// `None` means `name` was never watched.
    pub fn called_times(&self, name: &str) -> Result<Option<u64>, DoubleError> {
        self.require_capability(CALLED_TIMES)?;
        Ok(self.table.called_times(name))
    }

    /// Every watched name with its current count.
    pub fn call_counts(&self) -> Result<&BTreeMap<Name, u64>, DoubleError> {
        self.require_capability(CALL_COUNTS)?;
        Ok(self.table.counters())
    }

    /// `stub(name, value)`, `watch(name)`, `called_times(name)` and
    /// `call_counts()` through the generic entry point.
    fn invoke_capability(
        &mut self,
        method: StaticName,
        args: &[Value],
    ) -> Result<Value, DoubleError> {
        if method == CALL_COUNTS {
            let counts = self
                .call_counts()?
                .iter()
                .map(|(name, count)| (name.to_string(), Value::from(*count)))
                .collect();
            return Ok(Value::Object(counts));
        }

        let target = args
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| DoubleError::MissingNameArgument {
                method: method.to_string(),
            })?;
        if method == STUB {
            let value = args.get(1).cloned().unwrap_or(Value::Null);
            self.stub(target, value)?;
            Ok(Value::Null)
        } else if method == WATCH {
            self.watch(target).map(Value::from)
        } else {
            Ok(self.called_times(target)?.map_or(Value::Null, Value::from))
        }
    }

    fn require_capability(&self, method: StaticName) -> Result<(), DoubleError> {
        if self.is_double() {
            Ok(())
        } else {
            Err(DoubleError::method_not_found(self.class.name(), method.as_str()))
        }
    }
}
