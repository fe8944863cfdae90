//! Common constants used throughout stache.

/// Extension appended to template paths when none is given
pub const DEFAULT_EXTENSION: &str = "mustache";

/// Context key under which a non-map loop item is exposed to the section body
pub const ITEM_KEY: &str = "_";
