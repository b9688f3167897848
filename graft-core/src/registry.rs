// Dependency registry: lazy singleton resolution with registered builders

use crate::config::RegistryConfig;
use crate::injectable::{AnyInstance, DefaultProvider, Dependency, Implements, Injectable};
use crate::logging::{debug, trace, warn};
use crate::provider::{ProviderDelegate, ProviderFn};
use crate::{Error, Key, Result};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Erased builder stored in the builder table.
type Builder = Arc<dyn Fn() -> AnyInstance + Send + Sync>;

/// Instance-table entry. Empty while the first build for the key is running.
type Slot = Arc<OnceCell<AnyInstance>>;

#[derive(Default)]
struct Tables {
    instances: HashMap<Key, Slot>,
    builders: HashMap<Key, Builder>,
}

struct Inner {
    config: RegistryConfig,
    tables: RwLock<Tables>,
}

/// How an instance is about to be built.
enum Build {
    Registered(Builder),
    Default(DefaultProvider),
}

impl Build {
    fn source(&self) -> &'static str {
        match self {
            Build::Registered(_) => "builder",
            Build::Default(_) => "default",
        }
    }

    fn run(&self) -> AnyInstance {
        match self {
            Build::Registered(builder) => builder(),
            Build::Default(provide) => provide(),
        }
    }
}

/// The dependency registry.
///
/// Holds at most one cached instance per requested type, plus the builders
/// used to create them. Cloning is cheap and clones share the same tables.
///
/// Resolution order for a requested type:
///
/// 1. the cached instance, if any
/// 2. the registered builder, if any
/// 3. the type's own [`Injectable::provide`], if it is injectable
/// 4. otherwise [`Error::UnregisteredKey`]
///
/// Each key is built at most once, even when many threads resolve it at the
/// same time. Builders run without the table lock held, so a builder may
/// resolve its own dependencies from the same registry.
///
/// # Examples
///
/// ```
/// use graft_core::{dependency, implements, Injectable, Registry};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
/// dependency!(dyn Greeter);
///
/// #[derive(Default)]
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".into()
///     }
/// }
/// impl Injectable for English {}
/// implements!(English => dyn Greeter);
///
/// let registry = Registry::new();
/// registry.register_mapping::<dyn Greeter, English>();
///
/// let first = registry.resolve::<dyn Greeter>().unwrap();
/// let second = registry.resolve::<dyn Greeter>().unwrap();
/// assert_eq!(first.greet(), "hello");
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
#[derive(Clone)]
pub struct Registry {
    inner: Arc<Inner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        debug!(registry = %config.name, "Creating dependency registry");
        Self {
            inner: Arc::new(Inner {
                config,
                tables: RwLock::new(Tables::default()),
            }),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    fn name(&self) -> &str {
        &self.inner.config.name
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolve the instance for the requested type, building and caching it
    /// on first use.
    pub fn resolve<I: ?Sized + Dependency>(&self) -> Result<Arc<I>> {
        let key = Key::of::<I>();
        trace!(registry = self.name(), key = %key, "Resolving dependency");

        if let Some(instance) = self.cached_instance(&key) {
            trace!(registry = self.name(), key = %key, source = "cache", "Dependency resolved");
            return downcast::<I>(&key, &instance);
        }

        let (slot, build) = {
            let mut tables = self.inner.tables.write();

            // Another caller may have finished building between the locks.
            if let Some(instance) = tables.instances.get(&key).and_then(|slot| slot.get()) {
                let instance = instance.clone();
                drop(tables);
                trace!(registry = self.name(), key = %key, source = "cache", "Dependency resolved");
                return downcast::<I>(&key, &instance);
            }

            let Some(build) = select_build(&tables, &key) else {
                drop(tables);
                debug!(registry = self.name(), key = %key, "No builder or default provider for key");
                return Err(Error::UnregisteredKey(key.name().to_string()));
            };

            let slot = tables.instances.entry(key).or_default().clone();
            (slot, build)
        };

        let source = build.source();
        let instance = slot.get_or_init(|| {
            debug!(registry = self.name(), key = %key, source, "Building instance");
            build.run()
        });

        debug!(registry = self.name(), key = %key, "Dependency resolved and cached");
        downcast::<I>(&key, instance)
    }

    fn cached_instance(&self, key: &Key) -> Option<AnyInstance> {
        let tables = self.inner.tables.read();
        tables.instances.get(key).and_then(|slot| slot.get()).cloned()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Map the requested type `I` to the injectable type `T`.
    ///
    /// Resolving `I` builds `T` through [`Injectable::provide`].
    pub fn register_mapping<I, T>(&self)
    where
        I: ?Sized + Dependency,
        T: Injectable + Implements<I>,
    {
        let builder: Builder =
            Arc::new(|| Arc::new(<T as Implements<I>>::upcast(Arc::new(T::provide()))) as AnyInstance);
        self.insert_builder(Key::of::<I>(), builder, std::any::type_name::<T>());
    }

    /// Register an ad-hoc factory for the requested type `I`.
    ///
    /// ```
    /// use graft_core::Registry;
    /// use std::sync::Arc;
    ///
    /// struct Endpoint(String);
    /// graft_core::dependency!(Endpoint);
    ///
    /// let registry = Registry::new();
    /// registry.register_factory(|| Arc::new(Endpoint("https://example.com".into())));
    /// assert_eq!(registry.resolve::<Endpoint>().unwrap().0, "https://example.com");
    /// ```
    pub fn register_factory<I, F>(&self, factory: F)
    where
        I: ?Sized + Dependency,
        F: Fn() -> Arc<I> + Send + Sync + 'static,
    {
        self.register_provider::<I>(Arc::new(factory));
    }

    /// Register a shared [`ProviderFn`] for the requested type `I`.
    pub fn register_provider<I: ?Sized + Dependency>(&self, provider: ProviderFn<I>) {
        let builder: Builder = Arc::new(move || Arc::new(provider()) as AnyInstance);
        self.insert_builder(Key::of::<I>(), builder, "provider function");
    }

    /// Register a [`ProviderDelegate`] under its own target type.
    pub fn register_delegate<P: ProviderDelegate>(&self) {
        self.register_delegate_as::<P::Target, P>();
    }

    /// Register a [`ProviderDelegate`] under an explicit requested type `I`.
    pub fn register_delegate_as<I, P>(&self)
    where
        I: ?Sized + Dependency,
        P: ProviderDelegate,
        P::Target: Implements<I>,
    {
        let builder: Builder = Arc::new(|| {
            Arc::new(<P::Target as Implements<I>>::upcast(Arc::new(P::provide()))) as AnyInstance
        });
        self.insert_builder(Key::of::<I>(), builder, std::any::type_name::<P>());
    }

    fn insert_builder(&self, key: Key, builder: Builder, via: &str) {
        trace!(registry = self.name(), key = %key, "Acquiring write lock for registration");
        let replaced = self.inner.tables.write().builders.insert(key, builder).is_some();

        if replaced && self.inner.config.warn_on_override {
            warn!(registry = self.name(), key = %key, via, "Replacing existing builder");
        } else {
            debug!(registry = self.name(), key = %key, via, replaced, "Builder registered");
        }
    }

    // ------------------------------------------------------------------
    // Preload, release, clear
    // ------------------------------------------------------------------

    /// Eagerly build and cache each key, in order.
    ///
    /// Any cached instance for a key is replaced. Stops at the first key that
    /// has neither a builder nor a default provider; keys preloaded before it
    /// stay cached.
    pub fn preload(&self, keys: &[Key]) -> Result<()> {
        debug!(registry = self.name(), count = keys.len(), "Preloading dependencies");
        for key in keys {
            self.preload_key(*key)?;
        }
        Ok(())
    }

    fn preload_key(&self, key: Key) -> Result<()> {
        let build = {
            let tables = self.inner.tables.read();
            select_build(&tables, &key)
        };
        let Some(build) = build else {
            debug!(registry = self.name(), key = %key, "Preload failed, key is unregistered");
            return Err(Error::UnregisteredKey(key.name().to_string()));
        };

        let instance = build.run();
        self.inner
            .tables
            .write()
            .instances
            .insert(key, Arc::new(OnceCell::with_value(instance)));

        debug!(registry = self.name(), key = %key, source = build.source(), "Dependency preloaded");
        Ok(())
    }

    /// Drop the cached instance for `I`. The builder stays registered.
    pub fn release<I: ?Sized + Dependency>(&self) {
        self.release_key(Key::of::<I>());
    }

    pub fn release_key(&self, key: Key) {
        let removed = self.inner.tables.write().instances.remove(&key).is_some();
        debug!(registry = self.name(), key = %key, removed, "Released cached instance");
    }

    /// Empty both the instance and builder tables.
    pub fn clear_all(&self) {
        let mut tables = self.inner.tables.write();
        let instances = tables.instances.len();
        let builders = tables.builders.len();
        tables.instances.clear();
        tables.builders.clear();
        drop(tables);

        debug!(
            registry = self.name(),
            instances, builders, "Cleared all instances and builders"
        );
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Whether an instance of `I` is currently cached.
    pub fn is_cached<I: ?Sized + Dependency>(&self) -> bool {
        self.cached_instance(&Key::of::<I>()).is_some()
    }

    /// Whether a builder is registered for `I`.
    pub fn is_registered<I: ?Sized + Dependency>(&self) -> bool {
        self.inner.tables.read().builders.contains_key(&Key::of::<I>())
    }

    pub fn cached_count(&self) -> usize {
        self.inner
            .tables
            .read()
            .instances
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    pub fn registered_count(&self) -> usize {
        self.inner.tables.read().builders.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("name", &self.inner.config.name)
            .field("cached", &self.cached_count())
            .field("registered", &self.registered_count())
            .finish()
    }
}

/// Registered builder first, then the key's own default provider.
fn select_build(tables: &Tables, key: &Key) -> Option<Build> {
    match tables.builders.get(key) {
        Some(builder) => Some(Build::Registered(builder.clone())),
        None => key.default_provider().map(Build::Default),
    }
}

fn downcast<I: ?Sized + Dependency>(key: &Key, instance: &AnyInstance) -> Result<Arc<I>> {
    instance
        .downcast_ref::<Arc<I>>()
        .cloned()
        .ok_or_else(|| Error::UnregisteredKey(key.name().to_string()))
}

/// Build a `&[Key]` list for [`Registry::preload`].
///
/// ```
/// use graft_core::{preload, Injectable, Registry};
///
/// #[derive(Default)]
/// struct Metrics;
/// impl Injectable for Metrics {}
///
/// let registry = Registry::new();
/// preload!(registry, Metrics).unwrap();
/// assert!(registry.is_cached::<Metrics>());
/// ```
#[macro_export]
macro_rules! preload {
    ($registry:expr, $($ty:ty),+ $(,)?) => {
        $registry.preload(&[$($crate::Key::of::<$ty>()),+])
    };
}
