//! Registration façade for application setup code.
//!
//! Implement [`RegisterDependencies`] on a setup type and call its methods
//! at startup. Every method forwards to [`RegisterDependencies::registry`],
//! which is the global registry unless overridden.
//!
//! ```
//! use graft_core::{dependency, implements, Injectable, Key, RegisterDependencies, Registry};
//!
//! trait Storage: Send + Sync {}
//! dependency!(dyn Storage);
//!
//! #[derive(Default)]
//! struct DiskStorage;
//! impl Storage for DiskStorage {}
//! impl Injectable for DiskStorage {}
//! implements!(DiskStorage => dyn Storage);
//!
//! struct AppDependencies {
//!     registry: Registry,
//! }
//!
//! impl RegisterDependencies for AppDependencies {
//!     fn registry(&self) -> &Registry {
//!         &self.registry
//!     }
//! }
//!
//! let setup = AppDependencies { registry: Registry::new() };
//! setup.register_type_mapping::<dyn Storage, DiskStorage>();
//! setup.preload_dependencies(&[Key::of::<dyn Storage>()]).unwrap();
//! ```

use crate::provider::ProviderDelegate;
use crate::registry::Registry;
use crate::{Dependency, Implements, Injectable, Key, Result, global};
use std::sync::Arc;

pub trait RegisterDependencies {
    /// Registry the façade writes to.
    fn registry(&self) -> &Registry {
        global()
    }

    /// Map `I` to the injectable `T`, built through `T::provide`.
    fn register_type_mapping<I, T>(&self)
    where
        I: ?Sized + Dependency,
        T: Injectable + Implements<I>,
    {
        self.registry().register_mapping::<I, T>();
    }

    /// Build `I` with an ad-hoc factory.
    fn register_provider_function<I, F>(&self, provider: F)
    where
        I: ?Sized + Dependency,
        F: Fn() -> Arc<I> + Send + Sync + 'static,
    {
        self.registry().register_factory::<I, F>(provider);
    }

    /// Build `P::Target` with the delegate `P`.
    fn register_provider_delegate<P: ProviderDelegate>(&self) {
        self.registry().register_delegate::<P>();
    }

    /// Build `I` with the delegate `P`.
    fn register_provider_delegate_as<I, P>(&self)
    where
        I: ?Sized + Dependency,
        P: ProviderDelegate,
        P::Target: Implements<I>,
    {
        self.registry().register_delegate_as::<I, P>();
    }

    /// Build and cache the given keys now, in order, stopping at the first
    /// unregistered key.
    fn preload_dependencies(&self, keys: &[Key]) -> Result<()> {
        self.registry().preload(keys)
    }

    /// Forget every cached instance and every registration.
    fn clear_dependencies(&self) {
        self.registry().clear_all();
    }
}
