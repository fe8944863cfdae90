//! stache is a logic-less text templating engine.
//! It replaces `{{name}}`, `{{{name}}}` and section tags in a template with
//! values from an ordered binding context, then runs caller-supplied
//! post-processing passes over the result.

/// Command-line interface module for the stache binary
pub mod cli;

/// Common constants
pub mod constants;

/// Loading binding contexts from JSON and YAML documents
pub mod context;

/// Substitution engine: walks the context and rewrites the template
pub mod engine;

/// Error types and handling
pub mod error;

/// HTML escaping for the `{{name}}` tag form
pub mod escape;

/// Template source loading
pub mod loader;

/// Section discovery and leftover-tag cleanup
pub mod matcher;

/// Caller-supplied post-processing passes
pub mod parsers;

/// Render entry points and the template cache
pub mod render;

/// Binding context values
pub mod value;

pub use error::{Error, Result};
pub use matcher::strip_unresolved_tags;
pub use parsers::{CustomParser, ParserMatches};
pub use render::{render, render_from_source, render_from_source_with_extension, TemplateCache};
pub use value::{Context, Value};
