#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
//! Record transformers synthesized from declarative field annotations.
//!
//! Annotate the fields of a source record with the destination field they feed, per destination type, then ask for a
//! transformer by naming its signature:
//!
//! ```rust
//! use mutator::{Record, synthesize};
//!
//! #[derive(Debug, Default, Clone, PartialEq, Record)]
//! pub struct Frog {
//!     #[mutate(Prince = "name")]
//!     pub name: String,
//!     #[mutate(Prince = "nationality")]
//!     pub species: String,
//!     #[mutate(Prince = "limbs")]
//!     pub legs: i64,
//! }
//!
//! #[derive(Debug, Default, Clone, PartialEq, Record)]
//! pub struct Prince {
//!     #[mutate(Frog = "name")]
//!     pub name: String,
//!     #[mutate(Frog = "species")]
//!     pub nationality: String,
//!     #[mutate(Frog = "legs")]
//!     pub limbs: i64,
//! }
//!
//! let kiss = synthesize::<fn(Frog) -> Prince>();
//! let magic = synthesize::<fn(Prince) -> Frog>();
//!
//! let frog = Frog { name: "Kermit".into(), species: "Muppet".into(), legs: 4 };
//! assert_eq!(magic.transform(&kiss.transform(&frog)), frog);
//! ```
//!
//! ## Error Policy
//!
//! - **Malformed signatures** (`fn(A, B) -> C`, non-record types) do not implement [`Signature`] and fail to compile.
//! - **Mapping gaps** (missing, non-writable or mistyped destination fields) are skipped and logged at `debug` by
//!   default; [`MappingMode::Strict`] turns them into [`SynthesisError::Unmapped`].
//! - **Production code** returns `Result` and never unwraps; tests may.
//!
//! ## Layout
//!
//! - `mutator_core` (re-exported as [`reflect`]): type keys, field descriptors, the [`Record`] trait.
//! - `mutator_derive`: `#[derive(Record)]` and the `#[mutate(...)]` attribute.
//! - this crate: [`synthesize`], [`Slot`], [`Registry`].

// Lets `#[derive(Record)]` output (which names `::mutator::reflect`) expand inside this crate's own tests.
extern crate self as mutator;

pub mod errors;
pub mod options;
pub mod registry;
pub mod signature;
pub mod slot;
pub mod synthesize;

pub use mutator_core as reflect;
pub use mutator_core::{Annotation, FieldDescriptor, Record, Shape, TypeKey};
pub use mutator_derive::Record;

pub use errors::{MappingGap, SynthesisError};
pub use options::{MappingMode, SynthesisOptions};
pub use registry::Registry;
pub use signature::Signature;
pub use slot::Slot;
pub use synthesize::{FieldMapping, Transformer, synthesize, synthesize_with};
