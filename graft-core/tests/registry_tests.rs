// Tests for registry resolution, registration and lifecycle

use graft_core::{
    Error, Injectable, Key, ProviderDelegate, ProviderFn, Registry, dependency, implements,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

trait BaseType: Send + Sync {
    fn label(&self) -> String;
}

dependency!(dyn BaseType);

#[derive(Default)]
struct ImplType;

impl BaseType for ImplType {
    fn label(&self) -> String {
        "impl".to_string()
    }
}

impl Injectable for ImplType {}

implements!(ImplType => dyn BaseType);

#[derive(Default)]
struct OtherImpl;

impl BaseType for OtherImpl {
    fn label(&self) -> String {
        "other".to_string()
    }
}

impl Injectable for OtherImpl {}

implements!(OtherImpl => dyn BaseType);

struct ImplProvider;

impl ProviderDelegate for ImplProvider {
    type Target = ImplType;
}

/// Requestable, but neither injectable nor registered.
#[derive(Debug)]
struct Unconfigured;

dependency!(Unconfigured);

#[derive(Debug, Default)]
struct Service {
    name: String,
}

impl Injectable for Service {
    fn provide() -> Self {
        Service {
            name: "default".to_string(),
        }
    }
}

fn counting_factory(
    counter: &Arc<AtomicUsize>,
    name: &'static str,
) -> impl Fn() -> Arc<Service> + Send + Sync + 'static {
    let counter = counter.clone();
    move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Arc::new(Service {
            name: name.to_string(),
        })
    }
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_singleton_identity() {
    let registry = Registry::new();
    registry.register_mapping::<dyn BaseType, ImplType>();

    let first = registry.resolve::<dyn BaseType>().unwrap();
    let second = registry.resolve::<dyn BaseType>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let s1 = registry.resolve::<Service>().unwrap();
    let s2 = registry.resolve::<Service>().unwrap();
    assert!(Arc::ptr_eq(&s1, &s2));
}

#[test]
fn test_builder_takes_precedence_over_default() {
    let registry = Registry::new();
    let builds = Arc::new(AtomicUsize::new(0));
    registry.register_factory(counting_factory(&builds, "registered"));

    let service = registry.resolve::<Service>().unwrap();

    assert_eq!(service.name, "registered");
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_registration_is_lazy() {
    let registry = Registry::new();
    let builds = Arc::new(AtomicUsize::new(0));

    registry.register_factory(counting_factory(&builds, "lazy"));
    assert_eq!(builds.load(Ordering::SeqCst), 0);
    assert!(!registry.is_cached::<Service>());

    registry.resolve::<Service>().unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 1);

    registry.resolve::<Service>().unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_release_then_rebuild() {
    let registry = Registry::new();
    let builds = Arc::new(AtomicUsize::new(0));
    registry.register_factory(counting_factory(&builds, "rebuilt"));

    let before = registry.resolve::<Service>().unwrap();
    registry.release::<Service>();

    assert!(registry.is_registered::<Service>());
    assert!(!registry.is_cached::<Service>());

    let after = registry.resolve::<Service>().unwrap();
    assert_eq!(builds.load(Ordering::SeqCst), 2);
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.name, "rebuilt");
}

#[test]
fn test_unregistered_failure() {
    let registry = Registry::new();
    registry.register_mapping::<dyn BaseType, ImplType>();
    registry.resolve::<dyn BaseType>().unwrap();

    let err = registry.resolve::<Unconfigured>().unwrap_err();

    assert_eq!(
        err,
        Error::UnregisteredKey(std::any::type_name::<Unconfigured>().to_string())
    );
    assert!(err.to_string().contains("Unconfigured"));
    assert_eq!(registry.cached_count(), 1);
    assert_eq!(registry.registered_count(), 1);
    assert!(!registry.is_cached::<Unconfigured>());
}

#[test]
fn test_unregistered_interface_fails() {
    let registry = Registry::new();
    let result = registry.resolve::<dyn BaseType>();

    assert!(matches!(result, Err(Error::UnregisteredKey(ref key)) if key.contains("BaseType")));
}

#[test]
fn test_clear_all_forgets_registrations() {
    let registry = Registry::new();
    registry.register_mapping::<dyn BaseType, ImplType>();
    registry.register_factory(|| {
        Arc::new(Service {
            name: "custom".to_string(),
        })
    });
    registry.resolve::<dyn BaseType>().unwrap();
    registry.resolve::<Service>().unwrap();

    registry.clear_all();

    assert_eq!(registry.cached_count(), 0);
    assert_eq!(registry.registered_count(), 0);

    // Falls back to default-provide, or fails
    assert_eq!(registry.resolve::<Service>().unwrap().name, "default");
    assert!(registry.resolve::<dyn BaseType>().is_err());
}

#[test]
fn test_register_does_not_touch_cached_instance() {
    let registry = Registry::new();
    registry.register_mapping::<dyn BaseType, ImplType>();
    let cached = registry.resolve::<dyn BaseType>().unwrap();

    registry.register_mapping::<dyn BaseType, OtherImpl>();
    let still_cached = registry.resolve::<dyn BaseType>().unwrap();
    assert!(Arc::ptr_eq(&cached, &still_cached));
    assert_eq!(still_cached.label(), "impl");

    registry.release::<dyn BaseType>();
    assert_eq!(registry.resolve::<dyn BaseType>().unwrap().label(), "other");
}

#[test]
fn test_last_registration_wins() {
    let registry = Registry::new();
    registry.register_mapping::<dyn BaseType, OtherImpl>();
    registry.register_mapping::<dyn BaseType, ImplType>();

    assert_eq!(registry.registered_count(), 1);
    assert_eq!(registry.resolve::<dyn BaseType>().unwrap().label(), "impl");
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_type_mapping_resolves_implementation() {
    let registry = Registry::new();
    registry.register_mapping::<dyn BaseType, ImplType>();

    let base = registry.resolve::<dyn BaseType>().unwrap();
    assert_eq!(base.label(), "impl");

    // The concrete type is a separate key with its own instance
    assert!(!registry.is_cached::<ImplType>());
}

#[test]
fn test_factory_result_is_returned() {
    let registry = Registry::new();
    let made = Arc::new(ImplType);
    let handle = made.clone();
    registry.register_factory::<dyn BaseType, _>(move || handle.clone());

    let resolved = registry.resolve::<dyn BaseType>().unwrap();
    assert_eq!(resolved.label(), "impl");
    assert_eq!(
        Arc::as_ptr(&resolved) as *const (),
        Arc::as_ptr(&made) as *const ()
    );
}

#[test]
fn test_provider_fn_registration() {
    let registry = Registry::new();
    let provider: ProviderFn<dyn BaseType> = Arc::new(|| Arc::new(OtherImpl));
    registry.register_provider(provider);

    assert_eq!(registry.resolve::<dyn BaseType>().unwrap().label(), "other");
}

#[test]
fn test_default_provide_without_registration() {
    let registry = Registry::new();

    let direct = registry.resolve::<ImplType>().unwrap();
    let again = registry.resolve::<ImplType>().unwrap();

    assert!(Arc::ptr_eq(&direct, &again));
    assert_eq!(registry.registered_count(), 0);
}

#[test]
fn test_delegate_with_base_type() {
    let registry = Registry::new();
    registry.register_delegate_as::<dyn BaseType, ImplProvider>();

    assert_eq!(registry.resolve::<dyn BaseType>().unwrap().label(), "impl");
}

#[test]
fn test_delegate_without_base_type() {
    let registry = Registry::new();
    registry.register_delegate::<ImplProvider>();

    assert!(registry.is_registered::<ImplType>());
    assert!(!registry.is_registered::<dyn BaseType>());
    registry.resolve::<ImplType>().unwrap();
}

#[test]
fn test_preload_fails_fast_in_declared_order() {
    let registry = Registry::new();
    let builds = Arc::new(AtomicUsize::new(0));
    registry.register_factory(counting_factory(&builds, "preloaded"));

    let err = registry
        .preload(&[Key::of::<Unconfigured>(), Key::of::<Service>()])
        .unwrap_err();

    assert_eq!(err.key(), std::any::type_name::<Unconfigured>());
    assert_eq!(builds.load(Ordering::SeqCst), 0);
    assert!(!registry.is_cached::<Service>());
}

#[test]
fn test_preload_keeps_earlier_successes() {
    let registry = Registry::new();
    let builds = Arc::new(AtomicUsize::new(0));
    registry.register_factory(counting_factory(&builds, "preloaded"));

    let err = registry
        .preload(&[Key::of::<Service>(), Key::of::<Unconfigured>(), Key::of::<ImplType>()])
        .unwrap_err();

    assert_eq!(err.key(), std::any::type_name::<Unconfigured>());
    assert!(registry.is_cached::<Service>());
    assert!(!registry.is_cached::<ImplType>());

    // Served from cache, no second build
    assert_eq!(registry.resolve::<Service>().unwrap().name, "preloaded");
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_preload_uses_default_provide() {
    let registry = Registry::new();
    graft_core::preload!(registry, Service, ImplType).unwrap();

    assert_eq!(registry.cached_count(), 2);
    assert_eq!(registry.resolve::<Service>().unwrap().name, "default");
}

#[test]
fn test_preload_interface_mapping() {
    let registry = Registry::new();
    registry.register_mapping::<dyn BaseType, OtherImpl>();

    registry.preload(&[Key::of::<dyn BaseType>()]).unwrap();
    assert!(registry.is_cached::<dyn BaseType>());
}

#[test]
fn test_builder_resolves_nested_dependency() {
    let registry = Registry::new();
    registry.register_mapping::<dyn BaseType, ImplType>();

    let inner = registry.clone();
    registry.register_factory(move || {
        let base = inner.resolve::<dyn BaseType>().unwrap();
        Arc::new(Service { name: base.label() })
    });

    assert_eq!(registry.resolve::<Service>().unwrap().name, "impl");
    assert!(registry.is_cached::<dyn BaseType>());
}
