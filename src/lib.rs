// Graft - a lazy singleton dependency registry for Rust
//
// Types are registered once at startup and resolved anywhere afterwards.
// Each key is built on first use and the same instance is handed out until
// it is released.

// Lets `#[injectable]` and friends expand inside this crate too
extern crate self as graft;

// Re-export core functionality
pub use graft_core::*;

// Re-export procedural macros
pub use graft_macro::{injectable, interface, provider};

// Re-export optional crates
#[cfg(feature = "testing")]
pub use graft_testing;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Dependency,
        Error,
        Implements,
        Inject,
        Injectable,
        Key,
        ProviderDelegate,
        ProviderFn,
        RegisterDependencies,
        Registry,
        RegistryConfig,
        dependency,
        global,
        implements,
        injectable,
        interface,
        preload,
        provider,
    };
}
