//! Configuration for font loading.

/// What to do when a code table entry conflicts with an existing one.
///
/// A code table is one-to-one: every character code maps to one Unicode
/// scalar and every scalar to one code. Real ToUnicode streams routinely map
/// several codes to the same character, so the loader needs a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`Error::DuplicateMappingEntry`](crate::error::Error::DuplicateMappingEntry)
    Reject,
    /// Keep the earlier entry, skip the conflicting one
    #[default]
    KeepFirst,
    /// Evict the earlier entries the new one conflicts with
    KeepLast,
}

/// Font loading options.
///
/// # Example
///
/// ```
/// use pdf_typeface::config::{DuplicatePolicy, FontOptions};
///
/// // Strict mode - reject broken code tables
/// let strict = FontOptions::strict();
/// assert_eq!(strict.duplicate_policy, DuplicatePolicy::Reject);
///
/// // Lenient mode (default) - keep the first mapping
/// let lenient = FontOptions::default().with_embedded_programs(false);
/// assert!(!lenient.load_embedded_programs);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontOptions {
    /// Conflict rule applied while building code tables
    pub duplicate_policy: DuplicatePolicy,

    /// Pull embedded font programs for glyph, width and kerning tables
    pub load_embedded_programs: bool,

    /// Maximum number of references followed while resolving one value
    pub max_resolve_depth: u32,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self::lenient()
    }
}

impl FontOptions {
    /// Strict mode: any code table conflict fails the font load.
    pub fn strict() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            load_embedded_programs: true,
            max_resolve_depth: 32,
        }
    }

    /// Lenient mode: keep the first of conflicting mappings.
    pub fn lenient() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::KeepFirst,
            load_embedded_programs: true,
            max_resolve_depth: 32,
        }
    }

    /// Set the duplicate mapping policy.
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Enable or disable embedded program parsing.
    pub fn with_embedded_programs(mut self, enable: bool) -> Self {
        self.load_embedded_programs = enable;
        self
    }

    /// Set the reference chain depth limit.
    pub fn with_max_resolve_depth(mut self, depth: u32) -> Self {
        self.max_resolve_depth = depth;
        self
    }
}
