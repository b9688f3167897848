// Exclusive access to the global registry for tests

use graft_core::{Registry, global};
use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};

static GLOBAL_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Holds the global registry for one test.
///
/// Tests in the same binary run on parallel threads and would otherwise see
/// each other's registrations. Acquiring the guard waits for any other
/// holder, then clears the global registry. Dropping it clears it again.
pub struct GlobalRegistryGuard {
    _lock: MutexGuard<'static, ()>,
}

impl GlobalRegistryGuard {
    pub fn acquire() -> Self {
        let lock = GLOBAL_LOCK.lock();
        global().clear_all();
        Self { _lock: lock }
    }

    /// The global registry.
    pub fn registry(&self) -> &'static Registry {
        global()
    }
}

impl Drop for GlobalRegistryGuard {
    fn drop(&mut self) {
        global().clear_all();
    }
}
