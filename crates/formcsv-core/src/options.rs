//! Options controlling conversion limits.

/// Default bound on field tree nesting.
pub const DEFAULT_MAX_FIELD_DEPTH: usize = 64;

/// Resource limits for a conversion.
///
/// Limits keep pathological documents (huge inputs, cyclic `/Kids`
/// references) from consuming unbounded memory or time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Maximum input PDF size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
    /// Maximum nesting depth of the field tree (default: 64).
    ///
    /// Subtrees below this depth are dropped.
    pub max_field_depth: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_input_bytes: None,
            max_field_depth: DEFAULT_MAX_FIELD_DEPTH,
        }
    }
}

impl ConvertOptions {
    /// Set the input size limit, returning the modified options.
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }

    /// Set the field depth limit, returning the modified options.
    pub fn with_max_field_depth(mut self, depth: usize) -> Self {
        self.max_field_depth = depth;
        self
    }
}
