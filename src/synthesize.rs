//! Transformer synthesis.
//!
//! [`synthesize`] resolves a [`Signature`] into a mapping plan once and returns a [`Transformer`] that replays it on
//! every call.
//!
//! ## Notes
//! - Only the source's annotations keyed by the destination type are consulted; the destination's own annotations
//!   belong to the reverse direction.
//! - Steps are built in source declaration order. When two source fields target the same destination field, the later
//!   one wins.
//! - Values are cloned unchanged: no coercion, no recursion into nested records.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use mutator_core::{CopyFn, Record, Shape, TypeKey};

use crate::errors::{MappingGap, SynthesisError};
use crate::options::SynthesisOptions;
use crate::signature::Signature;

/// One resolved `source field -> destination field` correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub source_field: &'static str,
    pub dest_field: &'static str,
}

#[derive(Clone, Copy)]
struct Step {
    from: usize,
    to: usize,
    copy: CopyFn,
}

/// Immutable result of resolving one `(Source, Dest)` pair.
struct Plan {
    source: TypeKey,
    dest: TypeKey,
    steps: Vec<Step>,
    mappings: Vec<FieldMapping>,
    gaps: Vec<MappingGap>,
}

impl Plan {
    fn resolve(source: &Shape, dest: &Shape) -> Self {
        let target = dest.record();
        let mut steps: Vec<Step> = Vec::new();
        let mut mappings: Vec<FieldMapping> = Vec::new();
        let mut gaps = Vec::new();

        for field in source.fields() {
            let Some(dest_field) = field.annotation_for(target) else {
                continue;
            };
            let source_field = field.name();

            let Some(receiver) = dest.field_named(dest_field) else {
                gaps.push(MappingGap::MissingField {
                    source_field,
                    dest_field,
                });
                continue;
            };
            if !receiver.is_writable() {
                gaps.push(MappingGap::NotWritable {
                    source_field,
                    dest_field,
                });
                continue;
            }
            if receiver.ty() != field.ty() {
                gaps.push(MappingGap::TypeMismatch {
                    source_field,
                    dest_field,
                    source_ty: field.ty(),
                    dest_ty: receiver.ty(),
                });
                continue;
            }

            if let Some(earlier) = mappings.iter().find(|m| m.dest_field == dest_field) {
                gaps.push(MappingGap::DuplicateTarget {
                    dest_field,
                    first: earlier.source_field,
                    second: source_field,
                });
            }

            steps.push(Step {
                from: field.index(),
                to: receiver.index(),
                copy: field.copy_fn(),
            });
            mappings.push(FieldMapping {
                source_field,
                dest_field,
            });
        }

        Self {
            source: source.record(),
            dest: target,
            steps,
            mappings,
            gaps,
        }
    }

    /// Gaps that abort synthesis in strict mode.
    fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// A synthesized `S -> D` conversion.
///
/// Cloning is cheap (the plan is shared). Transformers hold no mutable state, so one instance may be called from any
/// number of threads at once.
pub struct Transformer<S, D> {
    plan: Arc<Plan>,
    _signature: PhantomData<fn(&S) -> D>,
}

impl<S, D> Clone for Transformer<S, D> {
    fn clone(&self) -> Self {
        Self {
            plan: Arc::clone(&self.plan),
            _signature: PhantomData,
        }
    }
}

impl<S: Record, D: Record> Transformer<S, D> {
    /// Build a fresh `D` from `source`.
    pub fn transform(&self, source: &S) -> D {
        let mut out = D::default();
        for step in &self.plan.steps {
            if let (Some(src), Some(dst)) = (source.field(step.from), out.field_mut(step.to)) {
                (step.copy)(src, dst);
            }
        }
        out
    }

    /// Consume `source` and build a fresh `D`.
    pub fn apply(&self, source: S) -> D {
        self.transform(&source)
    }

    /// Borrow as a plain closure.
    pub fn as_fn(&self) -> impl Fn(&S) -> D + '_ {
        move |source| self.transform(source)
    }

    /// Convert into an owned closure that can be stored or sent across threads.
    pub fn into_fn(self) -> impl Fn(&S) -> D + Clone + Send + Sync + 'static {
        move |source| self.transform(source)
    }
}

impl<S, D> Transformer<S, D> {
    pub fn source(&self) -> TypeKey {
        self.plan.source
    }

    pub fn dest(&self) -> TypeKey {
        self.plan.dest
    }

    /// Resolved correspondences, in the order they are applied.
    pub fn mappings(&self) -> &[FieldMapping] {
        &self.plan.mappings
    }

    /// Correspondences that were declared but skipped.
    pub fn gaps(&self) -> &[MappingGap] {
        &self.plan.gaps
    }
}

impl<S, D> fmt::Debug for Transformer<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformer")
            .field("source", &self.plan.source)
            .field("dest", &self.plan.dest)
            .field("mappings", &self.plan.mappings)
            .field("gaps", &self.plan.gaps)
            .finish()
    }
}

/// Renders the plan, one correspondence per line.
impl<S, D> fmt::Display for Transformer<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.plan.source, self.plan.dest)?;
        for mapping in &self.plan.mappings {
            write!(f, "\n  {} -> {}", mapping.source_field, mapping.dest_field)?;
        }
        for gap in &self.plan.gaps {
            write!(f, "\n  skipped {gap}")?;
        }
        Ok(())
    }
}

/// Synthesize the transformer for signature `F` with permissive mapping.
///
/// ## Examples
/// ```rust
/// use mutator::{Record, synthesize};
///
/// #[derive(Default, Record)]
/// pub struct Tadpole {
///     #[mutate(Frog = "name")]
///     pub name: String,
///     #[mutate(Frog = "legs")]
///     pub leglets: i64,
/// }
///
/// #[derive(Debug, Default, PartialEq, Record)]
/// pub struct Frog {
///     pub name: String,
///     pub legs: i64,
/// }
///
/// let apoptosis = synthesize::<fn(Tadpole) -> Frog>();
/// let frog = apoptosis.transform(&Tadpole { name: "Kermit".into(), leglets: 4 });
/// assert_eq!(frog, Frog { name: "Kermit".into(), legs: 4 });
/// ```
pub fn synthesize<F: Signature>() -> Transformer<F::Source, F::Dest> {
    let plan = build_plan::<F::Source, F::Dest>();
    Transformer {
        plan: Arc::new(plan),
        _signature: PhantomData,
    }
}

/// Synthesize the transformer for signature `F`, honouring `options`.
///
/// ## Errors
/// - [`SynthesisError::IdentityMapping`] if source and destination are the same type and identity is disallowed.
/// - [`SynthesisError::Unmapped`] in strict mode, if any annotation could not be resolved.
pub fn synthesize_with<F: Signature>(
    options: &SynthesisOptions,
) -> Result<Transformer<F::Source, F::Dest>, SynthesisError> {
    if !options.allow_identity && F::source() == F::dest() {
        return Err(SynthesisError::IdentityMapping { record: F::source() });
    }

    let plan = build_plan::<F::Source, F::Dest>();
    if options.is_strict() && !plan.is_complete() {
        return Err(SynthesisError::Unmapped {
            from: plan.source,
            to: plan.dest,
            gaps: plan.gaps,
        });
    }

    Ok(Transformer {
        plan: Arc::new(plan),
        _signature: PhantomData,
    })
}

#[tracing::instrument(skip_all, fields(source = %S::record_type(), dest = %D::record_type()))]
fn build_plan<S: Record, D: Record>() -> Plan {
    let plan = Plan::resolve(&Shape::of::<S>(), &Shape::of::<D>());

    for gap in &plan.gaps {
        tracing::debug!(%gap, "skipping field correspondence");
    }
    tracing::trace!(
        steps = plan.steps.len(),
        gaps = plan.gaps.len(),
        "synthesized transformer"
    );

    plan
}
