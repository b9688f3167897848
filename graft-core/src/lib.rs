// Core library for the graft dependency registry
// Resolution, registration, preloading and the injection accessor

pub mod config;
pub mod error;
pub mod global;
pub mod inject;
pub mod injectable;
pub mod key;
pub mod logging;
pub mod provider;
pub mod register;
pub mod registry;

// Re-export commonly used types
pub use config::{ConfigError, ConfigResult, RegistryConfig};
pub use error::*;
pub use global::global;
pub use inject::Inject;
pub use injectable::{Dependency, Implements, Injectable};
pub use key::Key;
pub use provider::{ProviderDelegate, ProviderFn};
pub use register::RegisterDependencies;
pub use registry::Registry;
