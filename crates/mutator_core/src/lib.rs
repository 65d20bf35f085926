//! Provide the reflection model that record transformers are synthesized from.
//!
//! Rust has no runtime reflection, so every record type describes itself through the [`Record`] trait: an ordered list
//! of [`FieldDescriptor`]s (static shape) plus index-based `&dyn Any` access to field values (dynamic access). The
//! `mutator_derive` crate generates both halves from `#[mutate(Dest = "field")]` attributes.
//!
//! ## Notes
//! - This is a dependency-free crate: **no IO**, no global state, no engine types.
//! - Type identity is [`std::any::TypeId`]; names are carried only for diagnostics.
//!
//! ## Examples
//! ```rust
//! use std::any::Any;
//! use mutator_core::{FieldDescriptor, Record, Shape};
//!
//! #[derive(Default)]
//! struct Frog {
//!     name: String,
//! }
//!
//! impl Record for Frog {
//!     fn fields() -> Vec<FieldDescriptor> {
//!         vec![FieldDescriptor::new::<String>("name", 0, true)]
//!     }
//!
//!     fn field(&self, index: usize) -> Option<&dyn Any> {
//!         match index {
//!             0 => Some(&self.name),
//!             _ => None,
//!         }
//!     }
//!
//!     fn field_mut(&mut self, index: usize) -> Option<&mut dyn Any> {
//!         match index {
//!             0 => Some(&mut self.name),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let shape = Shape::of::<Frog>();
//! assert_eq!(shape.field_named("name").map(|f| f.index()), Some(0));
//! ```

pub mod key;
pub mod reflect;
pub mod shape;

pub use key::TypeKey;
pub use reflect::{Annotation, CopyFn, FieldDescriptor, Record, copy_value};
pub use shape::Shape;
