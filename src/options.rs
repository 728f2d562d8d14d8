pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Upper bound for [`ParseOptions::max_depth`]. Both the parser and the drop
/// of a finished tree recurse once per nesting level, so the limit keeps deep
/// input from exhausting the thread's stack.
pub const MAX_DEPTH_CEILING: usize = 512;

/// Options controlling how a token sequence is turned into a tree.
///
/// The default is lenient: missing commas between members and a comma right
/// before a closing bracket are tolerated, and anything after the root value
/// is ignored.
///
/// # Examples
/// ```
/// use json_ledger::ParseOptions;
///
/// let opts = ParseOptions::new().with_strict(true).with_max_depth(16);
/// assert!(opts.strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub strict: bool,
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require commas between members and elements, reject a comma before a
    /// closing bracket, and reject tokens after the root value.
    ///
    /// # Examples
    /// ```
    /// use json_ledger::{parse_str_with_options, ParseOptions};
    ///
    /// let opts = ParseOptions::new().with_strict(true);
    /// assert!(parse_str_with_options(r#"{"a":1 "b":2}"#, &opts).is_err());
    /// ```
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Maximum container nesting. The root container is depth 1. Values above
    /// [`MAX_DEPTH_CEILING`] are clamped to it.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_CEILING);
        self
    }
}
