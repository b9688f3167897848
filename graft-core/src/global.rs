//! The process-wide registry and its access point.

use crate::config::RegistryConfig;
use crate::logging::warn;
use crate::registry::Registry;
use once_cell::sync::Lazy;

// Created on first access, configured from the environment.
static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let config = RegistryConfig::from_env().unwrap_or_else(|e| {
        warn!(error = %e, "Invalid registry configuration in environment, using defaults");
        RegistryConfig::default()
    });
    Registry::with_config(config)
});

/// The process-wide registry.
///
/// Used by [`Inject::new`](crate::Inject::new), [`Injectable::release`](crate::Injectable::release)
/// and the default [`RegisterDependencies::registry`](crate::RegisterDependencies::registry).
/// Code that can take a `&Registry` explicitly should prefer that.
pub fn global() -> &'static Registry {
    &GLOBAL_REGISTRY
}
