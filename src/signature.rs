//! Transformer signatures.
//!
//! A signature is spelled as a function-pointer type, `fn(Source) -> Dest`. [`Signature`] is implemented only for
//! single-argument function pointers whose argument and return types are records, so a malformed signature (wrong
//! arity, not a function, non-record types) is rejected by the compiler where it is declared.
//!
//! ## Examples
//! ```rust
//! use mutator::{Record, Signature};
//!
//! #[derive(Default, Record)]
//! pub struct Tadpole {
//!     #[mutate(Frog = "name")]
//!     pub name: String,
//! }
//!
//! #[derive(Default, Record)]
//! pub struct Frog {
//!     pub name: String,
//! }
//!
//! type Apoptosis = fn(Tadpole) -> Frog;
//! assert_eq!(<Apoptosis as Signature>::describe(), "Tadpole -> Frog");
//! ```
//!
//! ```compile_fail
//! use mutator::{Record, synthesize};
//!
//! #[derive(Default, Record)]
//! pub struct Frog {
//!     pub name: String,
//! }
//!
//! // two inputs: not a transformer signature
//! let _ = synthesize::<fn(Frog, Frog) -> Frog>();
//! ```

use mutator_core::{Record, TypeKey};

/// A `Source -> Dest` transformer signature.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a transformer signature",
    label = "expected `fn(Source) -> Dest`",
    note = "a transformer signature is a function pointer with exactly one record argument and one record result"
)]
pub trait Signature: 'static {
    type Source: Record;
    type Dest: Record;

    fn source() -> TypeKey {
        <Self::Source as Record>::record_type()
    }

    fn dest() -> TypeKey {
        <Self::Dest as Record>::record_type()
    }

    /// `"Source -> Dest"`, using short type names.
    fn describe() -> String {
        format!("{} -> {}", Self::source(), Self::dest())
    }
}

impl<S: Record, D: Record> Signature for fn(S) -> D {
    type Source = S;
    type Dest = D;
}
