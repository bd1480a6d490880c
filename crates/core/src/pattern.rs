//! Name patterns used by the `byRegexp` column matcher.
//!
//! Patterns use the `regex` syntax and run on the `regex-automata` meta
//! engine, so matching stays linear in the length of the name. A pattern may
//! be wrapped in slashes with trailing flags (`/cpu|mem/i`). Recognised flags
//! are `i` (case-insensitive), `m` (multi-line anchors) and `s` (`.` matches
//! newlines); other letters are accepted and ignored.

use crate::error::{Error, Result};
use alloc::string::String;
use regex_automata::meta::Regex;
use regex_automata::util::syntax;

/// A compiled name pattern.
#[derive(Clone, Debug)]
pub struct NamePattern {
    source: String,
    regex: Regex,
}

impl NamePattern {
    /// Compiles `pattern`. Syntax errors become [`Error::InvalidPattern`].
    pub fn parse(pattern: &str) -> Result<Self> {
        let (body, flags) = strip_delimiters(pattern);
        let config = syntax::Config::new()
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'));
        let regex = Regex::builder()
            .syntax(config)
            .build(body)
            .map_err(|_| Error::invalid_pattern(pattern))?;

        Ok(Self {
            source: String::from(pattern),
            regex,
        })
    }

    /// Returns the pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests `value` against the pattern. Unanchored patterns match substrings.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for NamePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Splits `/body/flags` into its parts. Anything else is a bare pattern.
fn strip_delimiters(pattern: &str) -> (&str, &str) {
    if pattern.len() > 1 && pattern.starts_with('/') {
        if let Some(close) = pattern.rfind('/') {
            let flags = &pattern[close + 1..];
            if close > 0 && flags.chars().all(|f| f.is_ascii_alphabetic()) {
                return (&pattern[1..close], flags);
            }
        }
    }
    (pattern, "")
}
