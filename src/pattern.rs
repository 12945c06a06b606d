//! # Pattern Module - *Opaque regex capability*
//!
//! The pattern-matching engine behind the regex paths of `contains`,
//! `replace`, and `extract`.
//!
//! ## Contract
//! - A pattern is compiled once per operation and then applied row-wise by
//!   the kernels; compilation failures surface as `InvalidPattern` before
//!   any device work runs.
//! - The accepted dialect is the `regex` crate subset. No flags are honoured
//!   in this revision — case-insensitivity and friends fail fast at the
//!   facade instead of being silently ignored.
//! - Replacement strings are taken literally; there is no group expansion in
//!   replacement text.
//! - Match policy is leftmost, non-overlapping: a replaced span is never
//!   rescanned.

use regex::{NoExpand, Regex};

use crate::enums::error::TextcolError;

/// A compiled pattern, ready for row-wise application.
#[derive(Debug, Clone)]
pub struct Pattern {
    re: Regex,
}

impl Pattern {
    /// Compiles `pattern` in the engine's dialect.
    pub fn compile(pattern: &str) -> Result<Self, TextcolError> {
        match Regex::new(pattern) {
            Ok(re) => Ok(Pattern { re }),
            Err(e) => Err(TextcolError::InvalidPattern {
                message: e.to_string(),
            }),
        }
    }

    /// The source pattern string.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.re.as_str()
    }

    /// True when the pattern matches anywhere in `haystack`.
    #[inline]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.re.is_match(haystack)
    }

    /// Replaces up to `limit` leftmost, non-overlapping matches with the
    /// literal `replacement`; `limit == 0` replaces all.
    #[inline]
    pub fn replacen(&self, haystack: &str, limit: usize, replacement: &str) -> String {
        self.re
            .replacen(haystack, limit, NoExpand(replacement))
            .into_owned()
    }

    /// Number of capturing groups in the pattern (group 0 excluded).
    #[inline]
    pub fn group_count(&self) -> usize {
        self.re.captures_len() - 1
    }

    /// Captures of the first match: one entry per group, `None` for a group
    /// that did not participate. Returns `None` when the overall match
    /// fails.
    pub fn extract_groups(&self, haystack: &str) -> Option<Vec<Option<String>>> {
        let caps = self.re.captures(haystack)?;
        Some(
            (1..self.re.captures_len())
                .map(|g| caps.get(g).map(|m| m.as_str().to_string()))
                .collect(),
        )
    }
}
