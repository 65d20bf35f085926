//! Caller-owned storage for a synthesized transformer.
//!
//! A [`Slot`] names its signature in its type and can live in a `static`, so a transformer can be declared next to the
//! record types and installed once during program setup:
//!
//! ```rust
//! use mutator::{Record, Slot};
//!
//! #[derive(Default, Record)]
//! pub struct Frog {
//!     #[mutate(Prince = "name")]
//!     pub name: String,
//! }
//!
//! #[derive(Default, Record)]
//! pub struct Prince {
//!     pub name: String,
//! }
//!
//! static KISS: Slot<fn(Frog) -> Prince> = Slot::new();
//!
//! KISS.install();
//! let prince = KISS.transform(&Frog { name: "Charming".into() });
//! assert_eq!(prince.name, "Charming");
//! ```

use std::fmt;
use std::sync::OnceLock;

use crate::errors::SynthesisError;
use crate::options::SynthesisOptions;
use crate::signature::Signature;
use crate::synthesize::{Transformer, synthesize, synthesize_with};

type SlotTransformer<F> = Transformer<<F as Signature>::Source, <F as Signature>::Dest>;

/// Storage that receives the transformer for signature `F` exactly once.
pub struct Slot<F: Signature> {
    cell: OnceLock<SlotTransformer<F>>,
}

impl<F: Signature> Slot<F> {
    pub const fn new() -> Self {
        Self { cell: OnceLock::new() }
    }

    /// Synthesize (permissively) and install, or return the installed transformer.
    pub fn install(&self) -> &SlotTransformer<F> {
        self.cell.get_or_init(synthesize::<F>)
    }

    /// Synthesize with `options` and install.
    ///
    /// ## Notes
    /// - If the slot is already filled, the installed transformer is returned and `options` are not applied.
    ///
    /// ## Errors
    /// - Any [`SynthesisError`] from [`synthesize_with`]; the slot stays empty in that case.
    pub fn install_with(&self, options: &SynthesisOptions) -> Result<&SlotTransformer<F>, SynthesisError> {
        if let Some(installed) = self.cell.get() {
            return Ok(installed);
        }
        let transformer = synthesize_with::<F>(options)?;
        Ok(self.cell.get_or_init(|| transformer))
    }

    pub fn get(&self) -> Option<&SlotTransformer<F>> {
        self.cell.get()
    }

    pub fn is_installed(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Run the installed transformer, installing it permissively on first use.
    pub fn transform(&self, source: &F::Source) -> F::Dest {
        self.install().transform(source)
    }
}

impl<F: Signature> Default for Slot<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Signature> fmt::Debug for Slot<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("signature", &F::describe())
            .field("installed", &self.is_installed())
            .finish()
    }
}
