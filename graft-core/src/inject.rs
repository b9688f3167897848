//! Field-level injection.
//!
//! An [`Inject<T>`] field resolves `T` the first time it is read and keeps the
//! resolved `Arc` afterwards. A missing registration is treated as a
//! programming error: reading the field panics with the registry's
//! diagnostic. Use [`Inject::try_get`] where a failure should be handled.
//!
//! ```
//! use graft_core::{Inject, Injectable, Registry};
//!
//! #[derive(Default)]
//! struct Clock;
//! impl Injectable for Clock {}
//!
//! struct Scheduler {
//!     clock: Inject<Clock>,
//! }
//!
//! let registry = Registry::new();
//! let scheduler = Scheduler { clock: Inject::from_registry(&registry) };
//! let _clock: &Clock = &scheduler.clock;
//! assert!(registry.is_cached::<Clock>());
//! ```

use crate::logging::error;
use crate::registry::Registry;
use crate::{Dependency, Result, global};
use once_cell::sync::OnceCell;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Lazily resolved dependency.
pub struct Inject<T: ?Sized + Dependency> {
    registry: Option<Registry>,
    resolved: OnceCell<Arc<T>>,
}

impl<T: ?Sized + Dependency> Inject<T> {
    /// Resolve from the global registry on first read.
    pub const fn new() -> Self {
        Self {
            registry: None,
            resolved: OnceCell::new(),
        }
    }

    /// Resolve from `registry` on first read.
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            registry: Some(registry.clone()),
            resolved: OnceCell::new(),
        }
    }

    fn registry(&self) -> &Registry {
        self.registry.as_ref().unwrap_or_else(|| global())
    }

    /// Resolve on first call, then return the same instance.
    pub fn try_get(&self) -> Result<&Arc<T>> {
        self.resolved
            .get_or_try_init(|| self.registry().resolve::<T>())
    }

    /// Like [`try_get`](Self::try_get), but a resolution failure is fatal.
    ///
    /// # Panics
    ///
    /// Panics with the `UnregisteredKey` message when `T` cannot be resolved.
    pub fn get(&self) -> &Arc<T> {
        match self.try_get() {
            Ok(instance) => instance,
            Err(e) => {
                error!(
                    registry = %self.registry().config().name,
                    key = e.key(),
                    "Injected dependency could not be resolved"
                );
                panic!("{}", e)
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

impl<T: ?Sized + Dependency> Deref for Inject<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: ?Sized + Dependency> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + Dependency> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("type", &std::any::type_name::<T>())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
