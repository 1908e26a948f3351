//! Resolved configuration types shared across crates.
//!
//! Raw TOML deserialization structs stay private in `graft-config`. The config
//! loader resolves them into these types at the parse boundary, so engines never
//! see an `Option` or a loose `bool`.

use serde::Deserialize;

/// Where a tracked model class keeps its declared attribute names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryScope {
    /// Each class owns its own list. Unrelated classes never see each other's names.
    #[default]
    PerClass,
    /// Every class built from the same shared registry unions its names into one list.
    Shared,
}

impl RegistryScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerClass => "per_class",
            Self::Shared => "shared",
        }
    }
}

/// Whether doubles emit a `trace` event for every dispatched call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DispatchTracing {
    #[default]
    Disabled,
    Enabled,
}

impl DispatchTracing {
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<bool> for DispatchTracing {
    fn from(value: bool) -> Self {
        if value { Self::Enabled } else { Self::Disabled }
    }
}
