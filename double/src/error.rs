use graft_types::NameError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DoubleError {
    /// Neither an instance binding nor the class answers to `method`.
    ///
    /// Also returned when a capability method (`stub`, `watch`, ...) is used on
    /// an object whose class was never turned into a double.
    #[error("undefined method `{method}` for an instance of {class}")]
    MethodNotFound { class: String, method: String },
    /// A capability method called through `invoke` without a method name.
    #[error("`{method}` expects a method name as its first argument")]
    MissingNameArgument { method: String },
    #[error(transparent)]
    InvalidName(#[from] NameError),
}

impl DoubleError {
    pub(crate) fn method_not_found(class: &str, method: &str) -> Self {
        Self::MethodNotFound {
            class: class.to_owned(),
            method: method.to_owned(),
        }
    }

    /// The name that failed to resolve, if this is a dispatch failure.
    #[must_use]
    pub fn missing_method(&self) -> Option<&str> {
        match self {
            Self::MethodNotFound { method, .. } => Some(method),
            Self::MissingNameArgument { .. } | Self::InvalidName(_) => None,
        }
    }
}
