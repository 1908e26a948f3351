//! Test doubles for Graft.
//!
//! A double is an [`Object`] whose class carries the double capability. It can
//! be created fresh with [`create_double`], or an existing object can be given
//! the capability with [`augment`] without losing any of its real methods.
//!
//! ```text
//! invoke(name) -> instance binding (Stub | WatchedReal)
//!              -> class real method
//!              -> DoubleError::MethodNotFound
//! ```
//!
//! Watch counters only move for names that were watched before the call.

mod class;
mod dispatch;
mod error;
mod object;

pub use class::{Class, ClassBuilder, Ivars, RealMethod};
pub use error::DoubleError;
pub use object::{CAPABILITY_METHODS, Object};

/// A new double with no methods beyond the double capability.
#[must_use]
pub fn create_double() -> Object {
    Object::new(Class::anonymous_double())
}

/// Give `object`'s class the double capability, in place.
///
/// Idempotent. Every method the class already had keeps working. Other live
/// instances of the class gain the capability too, but none of this object's
/// stubs or watches.
pub fn augment(object: &mut Object) -> &mut Object {
    if object.class().grant_mockable() {
        tracing::debug!(
            class = object.class().name(),
            "class augmented with double capability"
        );
    }
    object
}
