//! Tracked attributes for Graft.
//!
//! A [`ModelClass`] declares attribute names. Each [`Model`] built from it
//! records every write in a per-attribute history, can say whether it changed
//! since construction, and can roll every write back with [`Model::restore`].
//!
//! ```text
//! ModelClass (declared names, per class or shared)
//! └── Model
//!     └── name -> Slot { initial, current, history }
//! ```
//!
//! [`tracked_model!`] generates a named struct with typed accessors on top.

mod class;
mod error;
mod model;

pub use class::{ModelClass, ModelClassBuilder, ModelRegistry};
pub use error::ModelError;
pub use graft_types::{Attributes, Name, RegistryScope, StaticName, Value};
pub use model::Model;

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}

/// Change tracking for any type that wraps a [`Model`].
pub trait Tracked {
    fn model(&self) -> &Model;

    fn model_mut(&mut self) -> &mut Model;

    fn changed(&self) -> bool {
        self.model().changed()
    }

    fn changed_attributes(&self) -> Vec<Name> {
        self.model().changed_attributes()
    }

    fn restore(&mut self) {
        self.model_mut().restore();
    }
}

impl Tracked for Model {
    fn model(&self) -> &Model {
        self
    }

    fn model_mut(&mut self) -> &mut Model {
        self
    }
}

/// Declare a struct whose fields are tracked attributes.
///
/// For every attribute `x` this generates `x()`, `set_x(value)` and
/// `x_changed()`. The class is built once per generated type, so its
/// attribute list is never shared with another type.
///
/// ```
/// use graft_model::{Tracked, tracked_model};
///
/// tracked_model! {
///     pub struct Item { name, desc }
/// }
///
/// let mut item = Item::new(serde_json::json!({"name": "a"}).as_object().cloned().unwrap_or_default());
/// item.set_name("b");
/// assert!(item.name_changed());
/// assert!(!item.desc_changed());
/// assert!(item.changed());
/// ```
#[macro_export]
macro_rules! tracked_model {
    ($(#[$meta:meta])* $vis:vis struct $ty:ident { $($attr:ident),* $(,)? }) => {
        $crate::__private::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone)]
            $vis struct $ty {
                model: $crate::Model,
            }

            impl $ty {
                /// The shared class every instance of this type is built from.
                pub fn model_class() -> ::std::sync::Arc<$crate::ModelClass> {
                    static CLASS: ::std::sync::OnceLock<::std::sync::Arc<$crate::ModelClass>> =
                        ::std::sync::OnceLock::new();
                    CLASS
                        .get_or_init(|| {
                            $crate::ModelClass::builder(stringify!($ty))
                                .declare_static(&[$($crate::StaticName::new(stringify!($attr))),*])
                                .build()
                        })
                        .clone()
                }

                pub fn new(attributes: $crate::Attributes) -> Self {
                    Self {
                        model: $crate::Model::new(Self::model_class(), attributes),
                    }
                }

                $(
                    pub fn $attr(&self) -> Option<&$crate::Value> {
                        self.model.get(stringify!($attr)).ok().flatten()
                    }

                    pub fn [<set_ $attr>](&mut self, value: impl Into<$crate::Value>) {
                        let written = self.model.set(stringify!($attr), value);
                        debug_assert!(written.is_ok(), "`{}` is declared", stringify!($attr));
                    }

                    pub fn [<$attr _changed>](&self) -> bool {
                        self.model.attr_changed(stringify!($attr)).unwrap_or(false)
                    }
                )*
            }

            impl $crate::Tracked for $ty {
                fn model(&self) -> &$crate::Model {
                    &self.model
                }

                fn model_mut(&mut self) -> &mut $crate::Model {
                    &mut self.model
                }
            }
        }
    };
}
