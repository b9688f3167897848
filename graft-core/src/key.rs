// Registry keys derived from the requested type

use crate::injectable::{Dependency, DefaultProvider};
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a requested type.
///
/// Two keys are equal when they were built from the same type. The name is
/// only used for diagnostics.
#[derive(Clone, Copy)]
pub struct Key {
    type_id: TypeId,
    name: &'static str,
    default_provider: Option<DefaultProvider>,
}

impl Key {
    /// Key for the requested type `I`.
    #[inline]
    pub fn of<I: ?Sized + Dependency>() -> Self {
        Self {
            type_id: TypeId::of::<I>(),
            name: std::any::type_name::<I>(),
            default_provider: I::default_provider(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified type name, e.g. `dyn app::Mailer`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the requested type can build itself (it is `Injectable`).
    pub fn is_self_providing(&self) -> bool {
        self.default_provider.is_some()
    }

    pub(crate) fn default_provider(&self) -> Option<DefaultProvider> {
        self.default_provider
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("self_providing", &self.is_self_providing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Injectable;

    trait Store: Send + Sync {}

    crate::dependency!(dyn Store);

    #[derive(Default)]
    struct MemoryStore;

    impl Injectable for MemoryStore {}

    #[test]
    fn test_same_type_same_key() {
        assert_eq!(Key::of::<MemoryStore>(), Key::of::<MemoryStore>());
    }

    #[test]
    fn test_interface_and_impl_are_distinct_keys() {
        assert_ne!(Key::of::<dyn Store>(), Key::of::<MemoryStore>());
    }

    #[test]
    fn test_key_name() {
        let key = Key::of::<MemoryStore>();
        assert!(key.name().ends_with("MemoryStore"));
        assert_eq!(key.to_string(), key.name());
    }

    #[test]
    fn test_self_providing() {
        assert!(Key::of::<MemoryStore>().is_self_providing());
        assert!(!Key::of::<dyn Store>().is_self_providing());
    }
}
