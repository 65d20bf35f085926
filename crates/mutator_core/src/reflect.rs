//! Reflection support for record types.
//!
//! The [`Record`] trait provides introspection for structured types: the static, ordered field list (with the
//! per-field mapping annotations) and index-based access to field values as `&dyn Any`.

use std::any::Any;
use std::fmt;

use crate::key::TypeKey;

/// Clone a value out of `src` into `dst`, both type-erased.
///
/// ## Returns
/// - (`bool`): `false` if either side is not a `T`; nothing is written in that case.
pub type CopyFn = fn(&dyn Any, &mut dyn Any) -> bool;

/// The [`CopyFn`] for values of type `T`.
///
/// ## Examples
/// ```rust
/// use mutator_core::copy_value;
///
/// let src = String::from("Kermit");
/// let mut dst = String::new();
/// assert!(copy_value::<String>(&src, &mut dst));
/// assert_eq!(dst, "Kermit");
///
/// let mut wrong = 0_i64;
/// assert!(!copy_value::<String>(&src, &mut wrong));
/// ```
pub fn copy_value<T: Clone + 'static>(src: &dyn Any, dst: &mut dyn Any) -> bool {
    match (src.downcast_ref::<T>(), dst.downcast_mut::<T>()) {
        (Some(src), Some(dst)) => {
            dst.clone_from(src);
            true
        }
        _ => false,
    }
}

/// One `destination type -> destination field` correspondence declared on a source field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    pub target: TypeKey,
    pub field: &'static str,
}

/// Static description of one field of a record.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: &'static str,
    index: usize,
    ty: TypeKey,
    writable: bool,
    annotations: Vec<Annotation>,
    copy: CopyFn,
}

impl FieldDescriptor {
    /// Describe a field holding a `T`.
    ///
    /// ## Parameters
    /// - `name`: the field's identifier.
    /// - `index`: declaration position; must match the index accepted by [`Record::field`].
    /// - `writable`: whether a transformer may assign this field when the record is a destination.
    pub fn new<T: Clone + 'static>(name: &'static str, index: usize, writable: bool) -> Self {
        Self {
            name,
            index,
            ty: TypeKey::of::<T>(),
            writable,
            annotations: Vec::new(),
            copy: copy_value::<T>,
        }
    }

    /// Declare that, when transforming into `D`, this field's value goes to `D`'s field `field`.
    ///
    /// ## Notes
    /// - A later annotation for the same `D` replaces the earlier one. The derive rejects that case at compile time,
    ///   so this only matters for hand-written impls.
    pub fn annotate<D: ?Sized + 'static>(mut self, field: &'static str) -> Self {
        let target = TypeKey::of::<D>();
        self.annotations.retain(|a| a.target != target);
        self.annotations.push(Annotation { target, field });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Key of the field's value type.
    pub fn ty(&self) -> TypeKey {
        self.ty
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Destination field name declared for `target`, if any.
    pub fn annotation_for(&self, target: TypeKey) -> Option<&'static str> {
        self.annotations.iter().find(|a| a.target == target).map(|a| a.field)
    }

    /// The copy function for this field's value type.
    pub fn copy_fn(&self) -> CopyFn {
        self.copy
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("index", &self.index)
            .field("ty", &self.ty)
            .field("writable", &self.writable)
            .field("annotations", &self.annotations)
            .finish()
    }
}

/// Provides reflection information about a record type.
///
/// This trait is typically derived using `#[derive(Record)]`.
///
/// ## Notes
/// - `Default` supplies the zero-valued instance a transformer starts from.
/// - [`Record::field`] / [`Record::field_mut`] must accept exactly the indices reported by [`Record::fields`], and the
///   value behind each index must have the type recorded in its descriptor.
pub trait Record: Default + 'static {
    /// Key identifying this record type as a transformation target.
    fn record_type() -> TypeKey {
        TypeKey::of::<Self>()
    }

    /// Returns the descriptors of all fields, in declaration order.
    fn fields() -> Vec<FieldDescriptor>;

    /// Returns the value of the field at `index`.
    fn field(&self, index: usize) -> Option<&dyn Any>;

    /// Returns the value of the field at `index` for assignment.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Any>;
}
