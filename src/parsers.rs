//! Post-processing passes run over fully substituted output.
//!
//! Each [`CustomParser`] pairs a pattern with a transform. Parsers run in the
//! order given, each one seeing the text produced by the previous one.

use crate::error::Result;
use log::debug;
use regex::Regex;
use std::fmt;

/// Transform receiving the whole current text and the collected matches.
pub type Transform = Box<dyn Fn(&str, &ParserMatches) -> String + Send + Sync>;

/// All matches of a parser pattern, grouped by capture group.
///
/// `group(0)` holds the full text of every match, `group(1)` the first capture
/// of every match, and so on. Groups that did not take part in a match hold an
/// empty string at that position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserMatches {
    groups: Vec<Vec<String>>,
}

impl ParserMatches {
    fn collect(pattern: &Regex, text: &str) -> Self {
        let mut groups = vec![Vec::new(); pattern.captures_len()];
        for caps in pattern.captures_iter(text) {
            for (index, group) in groups.iter_mut().enumerate() {
                group.push(caps.get(index).map_or_else(String::new, |m| m.as_str().to_string()));
            }
        }
        Self { groups }
    }

    /// Full text of every match.
    pub fn full(&self) -> &[String] {
        self.group(0)
    }

    /// Values of capture group `index` across all matches.
    pub fn group(&self, index: usize) -> &[String] {
        self.groups.get(index).map_or(&[][..], Vec::as_slice)
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.full().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when at least one match produced a capture group.
    fn has_capture(&self) -> bool {
        !self.group(1).is_empty()
    }
}

/// A caller-supplied post-processing pass.
pub struct CustomParser {
    pattern: Regex,
    transform: Transform,
}

impl CustomParser {
    /// Compiles `pattern` and pairs it with `transform`.
    ///
    /// # Errors
    /// * `Error::PatternError` if the pattern does not compile
    pub fn new<F>(pattern: &str, transform: F) -> Result<Self>
    where
        F: Fn(&str, &ParserMatches) -> String + Send + Sync + 'static,
    {
        Ok(Self::from_regex(Regex::new(pattern)?, transform))
    }

    /// Pairs an already compiled pattern with `transform`.
    pub fn from_regex<F>(pattern: Regex, transform: F) -> Self
    where
        F: Fn(&str, &ParserMatches) -> String + Send + Sync + 'static,
    {
        Self { pattern, transform: Box::new(transform) }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Runs the transform if the pattern captured anything, otherwise `None`.
    fn apply(&self, text: &str) -> Option<String> {
        let matches = ParserMatches::collect(&self.pattern, text);
        if !matches.has_capture() {
            return None;
        }
        Some((self.transform)(text, &matches))
    }
}

impl fmt::Debug for CustomParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomParser")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Applies `parsers` in order over `text`.
///
/// A parser whose pattern captures nothing is skipped without calling its
/// transform.
pub fn apply_custom_parsers(text: &str, parsers: &[CustomParser]) -> String {
    let mut text = text.to_string();

    for parser in parsers {
        match parser.apply(&text) {
            Some(next) => text = next,
            None => debug!("Custom parser '{}' did not match", parser.pattern.as_str()),
        }
    }

    text
}
