//! Synthesis options
//!
//! Permissive mapping is the default contract: unresolvable correspondences are skipped. Strict mode turns them into
//! setup-time errors.

/// How unresolvable correspondences are treated at synthesis time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingMode {
    /// Skip missing, non-writable and mistyped destination fields
    #[default]
    Permissive,
    /// Fail synthesis if any annotation cannot become a copy step
    Strict,
}

/// Synthesis configuration
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Treatment of mapping gaps
    pub mode: MappingMode,
    /// Whether `S -> S` transformers may be synthesized
    pub allow_identity: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            mode: MappingMode::Permissive,
            allow_identity: true,
        }
    }
}

impl SynthesisOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `SynthesisOptions::new().with_mode(MappingMode::Strict)`
    pub fn strict() -> Self {
        Self::default().with_mode(MappingMode::Strict)
    }

    /// Set the mapping mode
    pub fn with_mode(mut self, mode: MappingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Allow or forbid same-type transformers
    pub fn with_allow_identity(mut self, allow: bool) -> Self {
        self.allow_identity = allow;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.mode == MappingMode::Strict
    }
}
