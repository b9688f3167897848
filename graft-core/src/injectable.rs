//! Capability traits for types the registry can hand out.
//!
//! - [`Dependency`] marks any type that can be *requested*, including trait
//!   objects such as `dyn Mailer`.
//! - [`Injectable`] marks concrete types that can build themselves. Every
//!   `Injectable` is automatically a `Dependency` whose default-provide path
//!   is [`Injectable::provide`].
//! - [`Implements`] connects a concrete type to an interface it can be
//!   upcast to, so the registry can map `dyn Mailer` to `SmtpMailer`.

use std::any::Any;
use std::sync::Arc;

/// Type-erased cached value. The concrete type behind the `Any` is always
/// `Arc<I>` for the key type `I`.
#[doc(hidden)]
pub type AnyInstance = Arc<dyn Any + Send + Sync>;

/// Erased default-provide function.
#[doc(hidden)]
pub type DefaultProvider = fn() -> AnyInstance;

/// A type that can be requested from a [`Registry`](crate::Registry).
///
/// Implemented for every [`Injectable`]. Interfaces implement it with
/// [`dependency!`](crate::dependency):
///
/// ```
/// use graft_core::dependency;
///
/// trait Mailer: Send + Sync {
///     fn send(&self, to: &str) -> bool;
/// }
///
/// dependency!(dyn Mailer);
/// ```
pub trait Dependency: Send + Sync + 'static {
    /// Default construction path used when no builder is registered.
    #[doc(hidden)]
    fn default_provider() -> Option<DefaultProvider> {
        None
    }
}

/// A type that can be default-constructed and can produce itself.
///
/// # Examples
///
/// ```
/// use graft_core::{Injectable, Registry};
///
/// #[derive(Default)]
/// struct Clock;
///
/// impl Injectable for Clock {}
///
/// let registry = Registry::new();
/// let clock = registry.resolve::<Clock>().unwrap();
/// ```
pub trait Injectable: Default + Send + Sync + 'static {
    /// Build a fresh instance. Defaults to `Self::default()`.
    fn provide() -> Self {
        Self::default()
    }

    /// Drop the global registry's cached instance of this type.
    fn release(&self) {
        crate::global().release::<Self>();
    }
}

impl<T: Injectable> Dependency for T {
    fn default_provider() -> Option<DefaultProvider> {
        Some(provide_any::<T>)
    }
}

fn provide_any<T: Injectable>() -> AnyInstance {
    Arc::new(Arc::new(T::provide()))
}

/// Upcast from a concrete type to an interface `I` it satisfies.
///
/// Every type trivially implements itself. Use [`implements!`](crate::implements)
/// or `#[injectable(implements(dyn I))]` for trait objects.
pub trait Implements<I: ?Sized>: Send + Sync + 'static {
    fn upcast(instance: Arc<Self>) -> Arc<I>;
}

impl<T: Send + Sync + 'static> Implements<T> for T {
    #[inline]
    fn upcast(instance: Arc<T>) -> Arc<T> {
        instance
    }
}

/// Declare one or more types (usually trait objects) as requestable keys.
#[macro_export]
macro_rules! dependency {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::Dependency for $ty {})+
    };
}

/// Declare that a concrete type can stand in for one or more interfaces.
///
/// ```
/// use graft_core::{dependency, implements};
///
/// trait Mailer: Send + Sync {}
/// dependency!(dyn Mailer);
///
/// #[derive(Default)]
/// struct SmtpMailer;
/// impl Mailer for SmtpMailer {}
///
/// implements!(SmtpMailer => dyn Mailer);
/// ```
#[macro_export]
macro_rules! implements {
    ($concrete:ty => $($iface:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$iface> for $concrete {
                fn upcast(instance: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$iface> {
                    instance
                }
            }
        )+
    };
}
