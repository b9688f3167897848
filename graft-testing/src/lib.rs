//! Testing utilities for graft.
//!
//! - [`GlobalRegistryGuard`] - exclusive, reset access to the global registry
//! - [`BuildCounter`] - counts how often a builder runs
//!
//! ## Isolating the global registry
//!
//! ```
//! use graft_testing::GlobalRegistryGuard;
//! use std::sync::Arc;
//!
//! struct Port(u16);
//! graft_core::dependency!(Port);
//!
//! let guard = GlobalRegistryGuard::acquire();
//! guard.registry().register_factory(|| Arc::new(Port(8080)));
//! assert_eq!(guard.registry().resolve::<Port>().unwrap().0, 8080);
//!
//! // Cleared again on drop
//! drop(guard);
//! ```
//!
//! ## Counting builds
//!
//! ```
//! use graft_core::Registry;
//! use graft_testing::BuildCounter;
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct Connection;
//! graft_core::dependency!(Connection);
//!
//! let registry = Registry::new();
//! let counter = BuildCounter::new();
//! registry.register_factory(counter.wrap(|| Arc::new(Connection)));
//!
//! assert_eq!(counter.count(), 0);
//! registry.resolve::<Connection>().unwrap();
//! registry.resolve::<Connection>().unwrap();
//! assert_eq!(counter.count(), 1);
//! ```

pub mod counter;
pub mod guard;

pub use counter::BuildCounter;
pub use guard::GlobalRegistryGuard;
