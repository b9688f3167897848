// Builder invocation counting

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared counter for builder invocations.
///
/// Clones share the same count.
#[derive(Clone, Debug, Default)]
pub struct BuildCounter {
    count: Arc<AtomicUsize>,
}

impl BuildCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a factory so every call is counted.
    pub fn wrap<T, F>(&self, factory: F) -> impl Fn() -> T + Send + Sync + 'static
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let count = self.count.clone();
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            factory()
        }
    }

    /// Record one build by hand, for use inside custom `provide` impls.
    pub fn record(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}
