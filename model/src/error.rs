use graft_types::NameError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No accessor was declared for `attribute` on `class`.
    #[error("undefined attribute `{attribute}` for {class}")]
    UnknownAttribute { class: String, attribute: String },
    #[error(transparent)]
    InvalidName(#[from] NameError),
}
