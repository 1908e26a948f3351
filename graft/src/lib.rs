//! Graft: attach test doubles and tracked attributes to objects.
//!
//! # Architecture
//!
//! ```text
//! GraftConfig (graft.toml) -> Graft
//!                               ├── create_double() / augment()  -> graft_double::Object
//!                               └── model_class()                -> graft_model::ModelClass
//! ```
//!
//! The two engines are independent. [`Graft`] only carries the resolved
//! settings into them; both can also be used directly.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub use graft_config::{ConfigError, GraftConfig};
pub use graft_double::{
    CAPABILITY_METHODS, Class, ClassBuilder, DoubleError, Ivars, Object, RealMethod, augment,
    create_double,
};
pub use graft_model::{
    Model, ModelClass, ModelClassBuilder, ModelError, ModelRegistry, Tracked, tracked_model,
};
pub use graft_types::{
    Attributes, DispatchTracing, Name, NameError, RegistryScope, StaticName, Value,
};

const FALLBACK_FILTER: &str = "warn";

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins over the configured filter, which wins over `warn`.
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &GraftConfig) -> Result<(), TryInitError> {
    let configured = config.log_filter();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.as_deref().unwrap_or(FALLBACK_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init()?;

    tracing::debug!(filter = configured.as_deref(), "Logging initialized");
    Ok(())
}

/// Entry point carrying resolved settings into both engines.
#[derive(Debug, Clone, Default)]
pub struct Graft {
    dispatch_tracing: DispatchTracing,
    registry: ModelRegistry,
}

impl Graft {
    #[must_use]
    pub fn new(config: &GraftConfig) -> Self {
        Self {
            dispatch_tracing: config.dispatch_tracing(),
            registry: ModelRegistry::new(config.registry_scope()),
        }
    }

    /// Load `graft.toml` (or `GRAFT_CONFIG`), falling back to defaults when absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = GraftConfig::load()?.unwrap_or_default();
        Ok(Self::new(&config))
    }

    #[must_use]
    pub fn dispatch_tracing(&self) -> DispatchTracing {
        self.dispatch_tracing
    }

    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    #[must_use]
    pub fn create_double(&self) -> Object {
        create_double().with_dispatch_tracing(self.dispatch_tracing)
    }

    pub fn augment<'a>(&self, object: &'a mut Object) -> &'a mut Object {
        let object = augment(object);
        object.set_dispatch_tracing(self.dispatch_tracing);
        object
    }

    /// Start declaring a tracked model class under the configured registry scope.
    #[must_use]
    pub fn model_class(&self, name: impl Into<String>) -> ModelClassBuilder {
        self.registry.class(name)
    }
}
