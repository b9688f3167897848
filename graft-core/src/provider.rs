//! Provider contracts used when registering builders.

use crate::Injectable;
use std::sync::Arc;

/// A no-argument builder for instances of `I`.
pub type ProviderFn<I> = Arc<dyn Fn() -> Arc<I> + Send + Sync>;

/// A named type whose only job is building one injectable type.
///
/// Handy when construction needs setup that does not belong in the type's
/// own `Injectable::provide`.
///
/// # Examples
///
/// ```
/// use graft_core::{Injectable, ProviderDelegate, Registry};
///
/// #[derive(Default)]
/// struct Pool {
///     size: usize,
/// }
///
/// impl Injectable for Pool {}
///
/// struct LargePool;
///
/// impl ProviderDelegate for LargePool {
///     type Target = Pool;
///
///     fn provide() -> Pool {
///         Pool { size: 64 }
///     }
/// }
///
/// let registry = Registry::new();
/// registry.register_delegate::<LargePool>();
/// assert_eq!(registry.resolve::<Pool>().unwrap().size, 64);
/// ```
pub trait ProviderDelegate: 'static {
    /// The type this delegate builds. Also the default registration key.
    type Target: Injectable;

    /// Build an instance. Defaults to the target's own `provide`.
    fn provide() -> Self::Target {
        <Self::Target as Injectable>::provide()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Settings {
        retries: u32,
    }

    impl Injectable for Settings {
        fn provide() -> Self {
            Settings { retries: 3 }
        }
    }

    struct PlainSettings;

    impl ProviderDelegate for PlainSettings {
        type Target = Settings;
    }

    struct AggressiveSettings;

    impl ProviderDelegate for AggressiveSettings {
        type Target = Settings;

        fn provide() -> Settings {
            Settings { retries: 10 }
        }
    }

    #[test]
    fn test_delegate_defaults_to_target_provide() {
        assert_eq!(PlainSettings::provide().retries, 3);
    }

    #[test]
    fn test_delegate_override() {
        assert_eq!(AggressiveSettings::provide().retries, 10);
    }

    #[test]
    fn test_provider_fn_shape() {
        let provider: ProviderFn<Settings> = Arc::new(|| Arc::new(Settings { retries: 1 }));
        assert_eq!(provider().retries, 1);
    }
}
