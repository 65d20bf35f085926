//! Synthesis errors and per-field mapping gaps.
//!
//! Two tiers:
//! - [`MappingGap`]: an annotation that could not become a copy step. Gaps are kept on the transformer and logged; they
//!   only become errors in [`MappingMode::Strict`](crate::MappingMode::Strict).
//! - [`SynthesisError`]: setup-time failures returned from `synthesize_with`, `Slot::install_with` and the `Registry`.

use std::fmt;

use mutator_core::TypeKey;
use thiserror::Error;

/// A declared correspondence that a transformer skips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingGap {
    /// The annotation names a field the destination does not have.
    MissingField { source_field: &'static str, dest_field: &'static str },

    /// The destination field exists but is private or `#[mutate(readonly)]`.
    NotWritable { source_field: &'static str, dest_field: &'static str },

    /// Source and destination value types differ; no coercion is attempted.
    TypeMismatch {
        source_field: &'static str,
        dest_field: &'static str,
        source_ty: TypeKey,
        dest_ty: TypeKey,
    },

    /// A later source field also targets this destination field and overwrites it.
    DuplicateTarget {
        dest_field: &'static str,
        first: &'static str,
        second: &'static str,
    },
}

impl MappingGap {
    /// The source field the gap was found on.
    pub fn source_field(&self) -> &'static str {
        match self {
            Self::MissingField { source_field, .. }
            | Self::NotWritable { source_field, .. }
            | Self::TypeMismatch { source_field, .. } => *source_field,
            Self::DuplicateTarget { second, .. } => *second,
        }
    }

    pub fn dest_field(&self) -> &'static str {
        match self {
            Self::MissingField { dest_field, .. }
            | Self::NotWritable { dest_field, .. }
            | Self::TypeMismatch { dest_field, .. }
            | Self::DuplicateTarget { dest_field, .. } => *dest_field,
        }
    }
}

impl fmt::Display for MappingGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField {
                source_field,
                dest_field,
            } => write!(f, "`{source_field}` -> `{dest_field}`: no such destination field"),
            Self::NotWritable {
                source_field,
                dest_field,
            } => write!(f, "`{source_field}` -> `{dest_field}`: destination field is not writable"),
            Self::TypeMismatch {
                source_field,
                dest_field,
                source_ty,
                dest_ty,
            } => write!(
                f,
                "`{source_field}` -> `{dest_field}`: type mismatch ({} vs {})",
                source_ty.name(),
                dest_ty.name()
            ),
            Self::DuplicateTarget {
                dest_field,
                first,
                second,
            } => write!(f, "`{first}` and `{second}` both map to `{dest_field}`; `{second}` wins"),
        }
    }
}

/// Errors raised while synthesizing, registering or dispatching transformers.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("unmapped correspondences for {from} -> {to}: {}", join_gaps(.gaps))]
    Unmapped {
        from: TypeKey,
        to: TypeKey,
        gaps: Vec<MappingGap>,
    },

    #[error("identity mapping {record} -> {record} is disabled")]
    IdentityMapping { record: TypeKey },

    #[error("a transformer for {from} -> {to} is already registered")]
    DuplicatePair { from: TypeKey, to: TypeKey },

    #[error("no transformer registered for {from} -> {to}")]
    UnknownPair { from: TypeKey, to: TypeKey },
}

fn join_gaps(gaps: &[MappingGap]) -> String {
    gaps.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Frog;
    struct Prince;

    #[test]
    fn unmapped_error_lists_every_gap() {
        let err = SynthesisError::Unmapped {
            from: TypeKey::of::<Frog>(),
            to: TypeKey::of::<Prince>(),
            gaps: vec![
                MappingGap::MissingField {
                    source_field: "name",
                    dest_field: "nom",
                },
                MappingGap::NotWritable {
                    source_field: "legs",
                    dest_field: "limbs",
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "unmapped correspondences for Frog -> Prince: `name` -> `nom`: no such destination field; \
             `legs` -> `limbs`: destination field is not writable"
        );
    }

    #[test]
    fn type_mismatch_names_both_types() {
        let gap = MappingGap::TypeMismatch {
            source_field: "legs",
            dest_field: "limbs",
            source_ty: TypeKey::of::<i64>(),
            dest_ty: TypeKey::of::<u8>(),
        };
        assert_eq!(gap.to_string(), "`legs` -> `limbs`: type mismatch (i64 vs u8)");
        assert_eq!(gap.source_field(), "legs");
        assert_eq!(gap.dest_field(), "limbs");
    }

    #[test]
    fn duplicate_target_reports_the_winner() {
        let gap = MappingGap::DuplicateTarget {
            dest_field: "name",
            first: "nickname",
            second: "name",
        };
        assert_eq!(gap.to_string(), "`nickname` and `name` both map to `name`; `name` wins");
        assert_eq!(gap.source_field(), "name");
    }

    #[test]
    fn pair_errors_use_short_names() {
        let err = SynthesisError::UnknownPair {
            from: TypeKey::of::<Frog>(),
            to: TypeKey::of::<Prince>(),
        };
        assert_eq!(err.to_string(), "no transformer registered for Frog -> Prince");
    }
}
