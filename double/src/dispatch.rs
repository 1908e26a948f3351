//! Per-instance dispatch table.
//!
//! Holds what a double adds on top of its class: stub bindings, watch-wrapped
//! real methods and the call counters that go with them.

use std::collections::{BTreeMap, HashMap};

use graft_types::{Name, Value};

use crate::class::{Class, RealMethod};

/// What an instance installed for a name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Binding {
    Stub(Value),
    /// Counts, then delegates to the class's real method.
    WatchedReal,
}

/// How a single call resolves, after combining the instance table with the class.
pub(crate) enum Dispatch {
    Real(RealMethod),
    Stub(Value),
    WatchedReal(RealMethod),
    WatchedStub(Value),
}

impl Dispatch {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Real(_) => "real",
            Self::Stub(_) => "stub",
            Self::WatchedReal(_) => "watched_real",
            Self::WatchedStub(_) => "watched_stub",
        }
    }

    pub(crate) fn is_watched(&self) -> bool {
        matches!(self, Self::WatchedReal(_) | Self::WatchedStub(_))
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct DispatchTable {
    bindings: HashMap<Name, Binding>,
    counters: BTreeMap<Name, u64>,
}

impl DispatchTable {
    /// Install or replace a stub. The counter, if any, is left alone.
    pub(crate) fn stub(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, Binding::Stub(value));
    }

    /// Ensure a counter exists and wrap the real method when the class has one.
    pub(crate) fn watch(&mut self, name: Name, class: &Class) -> u64 {
        if class.defines(&name) {
            self.bindings.insert(name.clone(), Binding::WatchedReal);
        }
        *self.counters.entry(name).or_insert(0)
    }

    pub(crate) fn called_times(&self, name: &str) -> Option<u64> {
        self.counters.get(name).copied()
    }

    pub(crate) fn counters(&self) -> &BTreeMap<Name, u64> {
        &self.counters
    }

    pub(crate) fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Increment the counter only if the name is already watched.
    pub(crate) fn bump(&mut self, name: &str) -> Option<u64> {
        let count = self.counters.get_mut(name)?;
        *count += 1;
        Some(*count)
    }

    pub(crate) fn resolve(&self, name: &str, class: &Class) -> Option<Dispatch> {
        let watched = self.counters.contains_key(name);
        match self.bindings.get(name) {
            Some(Binding::Stub(value)) if watched => Some(Dispatch::WatchedStub(value.clone())),
            Some(Binding::Stub(value)) => Some(Dispatch::Stub(value.clone())),
            Some(Binding::WatchedReal) | None => {
                let method = class.method(name)?.clone();
                if watched {
                    Some(Dispatch::WatchedReal(method))
                } else {
                    Some(Dispatch::Real(method))
                }
            }
        }
    }
}
