//! Tag discovery for sections and leftover-tag cleanup.
//!
//! Sections are found with a non-greedy, newline-spanning pattern: the smallest
//! span from an opening tag to the next closing tag of the same name. Newlines
//! directly after the closing tag belong to the match so that removing a block
//! does not leave a blank line behind.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static LEFTOVER_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{.*?\}\}.*?\{\{/.*?\}\}\n*").expect("leftover section pattern must compile")
});

#[allow(clippy::expect_used)]
static LEFTOVER_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{.*?\}\}\n*").expect("leftover tag pattern must compile")
});

/// Opening form of a section tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// `{{#name}}`
    Positive,
    /// `{{^name}}`
    Negative,
}

impl SectionKind {
    pub fn sigil(self) -> char {
        match self {
            SectionKind::Positive => '#',
            SectionKind::Negative => '^',
        }
    }

    /// The opening form that is rendered when a boolean has the given value.
    pub fn for_truth(truth: bool) -> Self {
        if truth {
            SectionKind::Positive
        } else {
            SectionKind::Negative
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            SectionKind::Positive => SectionKind::Negative,
            SectionKind::Negative => SectionKind::Positive,
        }
    }
}

/// One occurrence of a section inside a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMatch {
    /// Full matched text, tags and trailing newlines included
    pub full: String,
    /// Text between the opening and closing tags
    pub body: String,
}

/// Builds the section pattern for `name`. Names are matched literally.
fn section_pattern(name: &str, kind: SectionKind) -> Option<Regex> {
    let open = format!("{{{{{}{}}}}}", kind.sigil(), name);
    let close = format!("{{{{/{}}}}}", name);
    let pattern =
        format!("(?s){}(.*?){}\\n*", regex::escape(&open), regex::escape(&close));

    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            debug!("Section pattern for '{}' did not compile: {}", name, e);
            None
        }
    }
}

/// Finds every occurrence of the `name` section, left to right.
pub fn find_sections(template: &str, name: &str, kind: SectionKind) -> Vec<SectionMatch> {
    let Some(re) = section_pattern(name, kind) else {
        return Vec::new();
    };

    re.captures_iter(template)
        .map(|caps| SectionMatch {
            full: caps[0].to_string(),
            body: caps.get(1).map_or_else(String::new, |m| m.as_str().to_string()),
        })
        .collect()
}

/// Removes every occurrence of the `name` section, body and trailing newlines included.
pub fn remove_sections(template: &str, name: &str, kind: SectionKind) -> String {
    match section_pattern(name, kind) {
        Some(re) => re.replace_all(template, "").into_owned(),
        None => template.to_string(),
    }
}

/// Removes leftover section blocks, then any leftover bare tags.
///
/// Meant for output whose tags were never bound. Applying it twice gives the
/// same result as applying it once.
pub fn strip_unresolved_tags(text: &str) -> String {
    let text = LEFTOVER_SECTION.replace_all(text, "");
    LEFTOVER_TAG.replace_all(&text, "").into_owned()
}
