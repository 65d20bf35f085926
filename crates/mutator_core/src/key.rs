//! Destination-type identifiers.
//!
//! A [`TypeKey`] identifies a Rust type for annotation lookup. Identity is the type's [`TypeId`]; the `type_name` is
//! kept alongside so diagnostics and plan renderings stay readable.

use std::any::{self, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identify a type for annotation lookup and transformer registration.
///
/// ## Notes
/// - Equality and hashing use only the [`TypeId`]; two keys with the same id always carry the same name.
/// - Keys are `Copy` and cheap to compare, so they can be used as map keys at synthesis time.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Build the key for `T`.
    ///
    /// ## Examples
    /// ```rust
    /// use mutator_core::TypeKey;
    ///
    /// assert_eq!(TypeKey::of::<String>(), TypeKey::of::<String>());
    /// assert_ne!(TypeKey::of::<String>(), TypeKey::of::<i64>());
    /// ```
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name (`my_crate::zoo::Frog`).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path (`Frog`).
    ///
    /// ## Notes
    /// - Generic arguments are kept verbatim; only the leading path of the outer type is stripped.
    /// - Names that do not start with a path (tuples, references, slices, `dyn` types) are returned unchanged.
    pub fn short_name(&self) -> &'static str {
        let head = self.name.split('<').next().unwrap_or(self.name);
        let is_path = head.starts_with(|c: char| c.is_alphabetic() || c == '_') && !head.contains(' ');
        if !is_path {
            return self.name;
        }
        match head.rfind("::") {
            Some(pos) => &self.name[pos + 2..],
            None => self.name,
        }
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod zoo {
        pub struct Frog;
        pub struct Pond<T>(pub T);
    }

    #[test]
    fn keys_compare_by_type_identity() {
        assert_eq!(TypeKey::of::<zoo::Frog>(), TypeKey::of::<zoo::Frog>());
        assert_ne!(TypeKey::of::<zoo::Frog>(), TypeKey::of::<String>());
        assert_eq!(TypeKey::of::<zoo::Frog>().id(), TypeId::of::<zoo::Frog>());
    }

    #[test]
    fn short_name_strips_module_path() {
        let key = TypeKey::of::<zoo::Frog>();
        assert!(key.name().ends_with("zoo::Frog"), "unexpected name: {}", key.name());
        assert_eq!(key.short_name(), "Frog");
        assert_eq!(key.to_string(), "Frog");
    }

    #[test]
    fn short_name_keeps_generic_arguments() {
        let key = TypeKey::of::<zoo::Pond<zoo::Frog>>();
        assert!(key.short_name().starts_with("Pond<"), "unexpected short name: {}", key.short_name());
    }

    #[test]
    fn compound_names_are_left_whole() {
        let tuple = TypeKey::of::<(zoo::Frog, String)>();
        assert_eq!(tuple.short_name(), tuple.name());
        assert!(tuple.short_name().ends_with("String)"), "unexpected short name: {}", tuple.short_name());

        let reference = TypeKey::of::<&'static zoo::Frog>();
        assert_eq!(reference.short_name(), reference.name());

        let slice = TypeKey::of::<[zoo::Frog]>();
        assert_eq!(slice.short_name(), slice.name());
    }

    #[test]
    fn primitive_names_have_no_path() {
        assert_eq!(TypeKey::of::<i64>().short_name(), "i64");
    }
}
