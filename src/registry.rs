//! Transformers keyed by `(source, destination)` type pair.
//!
//! The registry is filled during setup (`&mut self`) and read afterwards. Besides typed lookup it can dispatch on the
//! runtime type of a `&dyn Any` source, for callers that only know the destination they want.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use mutator_core::{Record, TypeKey};

use crate::errors::SynthesisError;
use crate::options::SynthesisOptions;
use crate::signature::Signature;
use crate::synthesize::{Transformer, synthesize_with};

/// Type-erased view of a [`Transformer`].
trait ErasedTransformer: Send + Sync {
    fn transform_any(&self, source: &dyn Any) -> Option<Box<dyn Any>>;

    fn as_any(&self) -> &dyn Any;
}

impl<S: Record, D: Record> ErasedTransformer for Transformer<S, D> {
    fn transform_any(&self, source: &dyn Any) -> Option<Box<dyn Any>> {
        let source = source.downcast_ref::<S>()?;
        Some(Box::new(self.transform(source)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A set of transformers, at most one per type pair.
#[derive(Default)]
pub struct Registry {
    options: SynthesisOptions,
    transformers: HashMap<(TypeKey, TypeKey), Arc<dyn ErasedTransformer>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose registrations are synthesized with `options`.
    pub fn with_options(options: SynthesisOptions) -> Self {
        Self {
            options,
            transformers: HashMap::new(),
        }
    }

    /// Synthesize and store the transformer for `F`.
    ///
    /// ## Errors
    /// - [`SynthesisError::DuplicatePair`] if the pair is already registered.
    /// - Any error from [`synthesize_with`] under this registry's options.
    pub fn register<F: Signature>(&mut self) -> Result<&mut Self, SynthesisError> {
        let key = (F::source(), F::dest());
        if self.transformers.contains_key(&key) {
            return Err(SynthesisError::DuplicatePair { from: key.0, to: key.1 });
        }

        let transformer = synthesize_with::<F>(&self.options)?;
        tracing::debug!(
            signature = %F::describe(),
            mappings = transformer.mappings().len(),
            gaps = transformer.gaps().len(),
            "registered transformer"
        );
        self.transformers.insert(key, Arc::new(transformer));
        Ok(self)
    }

    /// Typed lookup.
    pub fn get<S: Record, D: Record>(&self) -> Option<Transformer<S, D>> {
        self.transformers
            .get(&(S::record_type(), D::record_type()))
            .and_then(|erased| erased.as_any().downcast_ref::<Transformer<S, D>>())
            .cloned()
    }

    pub fn contains(&self, source: TypeKey, dest: TypeKey) -> bool {
        self.transformers.contains_key(&(source, dest))
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Registered `(source, destination)` pairs, in no particular order.
    pub fn pairs(&self) -> impl Iterator<Item = (TypeKey, TypeKey)> + '_ {
        self.transformers.keys().copied()
    }

    /// Transform with the registered `S -> D` transformer.
    ///
    /// ## Errors
    /// - [`SynthesisError::UnknownPair`] if no such transformer is registered.
    pub fn transform<S: Record, D: Record>(&self, source: &S) -> Result<D, SynthesisError> {
        self.get::<S, D>()
            .map(|transformer| transformer.transform(source))
            .ok_or_else(|| SynthesisError::UnknownPair {
                from: S::record_type(),
                to: D::record_type(),
            })
    }

    /// Transform a type-erased record into `dest`, dispatching on the source's runtime type.
    ///
    /// The returned box holds the destination record and downcasts to its concrete type.
    ///
    /// ## Errors
    /// - [`SynthesisError::UnknownPair`] if no transformer from the source's type to `dest` is registered.
    pub fn transform_any(&self, source: &dyn Any, dest: TypeKey) -> Result<Box<dyn Any>, SynthesisError> {
        let source_id = source.type_id();
        let unknown = || SynthesisError::UnknownPair {
            from: self.source_key(source_id).unwrap_or_else(TypeKey::of::<dyn Any>),
            to: dest,
        };

        let transformer = self
            .transformers
            .iter()
            .find(|((from, to), _)| from.id() == source_id && *to == dest)
            .map(|(_, transformer)| transformer)
            .ok_or_else(unknown)?;
        transformer.transform_any(source).ok_or_else(unknown)
    }

    /// The registered key for a runtime type id, if any transformer starts from it.
    fn source_key(&self, id: std::any::TypeId) -> Option<TypeKey> {
        self.transformers.keys().map(|(from, _)| *from).find(|from| from.id() == id)
    }
}
