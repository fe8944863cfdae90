//! Render entry points.
//!
//! [`render`] works on an in-memory template. The `render_from_source*`
//! functions load the template first through a [`TemplateCache`]; the free
//! functions share one process-wide cache backed by the filesystem.

use crate::constants::DEFAULT_EXTENSION;
use crate::engine::substitute;
use crate::error::Result;
use crate::loader::{FileSystemLoader, TemplateLoader};
use crate::parsers::{apply_custom_parsers, CustomParser};
use crate::value::Context;
use log::debug;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static TEMPLATES: LazyLock<TemplateCache<FileSystemLoader>> =
    LazyLock::new(|| TemplateCache::new(FileSystemLoader::new()));

/// Renders `template` against `context`, then runs `parsers` over the result.
pub fn render(template: &str, context: &Context, parsers: &[CustomParser]) -> String {
    let output = substitute(template, context, context);
    apply_custom_parsers(&output, parsers)
}

/// Renders `<path>.mustache` using the process-wide template cache.
///
/// # Errors
/// * `Error::TemplateNotFound` if the template file does not exist
/// * `Error::TemplateReadError` if the template file cannot be read
pub fn render_from_source<P: AsRef<Path>>(
    path: P,
    context: &Context,
    parsers: &[CustomParser],
) -> Result<String> {
    TEMPLATES.render_from_source(path, context, parsers)
}

/// Renders `<path>.<extension>` using the process-wide template cache.
pub fn render_from_source_with_extension<P: AsRef<Path>>(
    path: P,
    context: &Context,
    parsers: &[CustomParser],
    extension: &str,
) -> Result<String> {
    TEMPLATES.render_from_source_with_extension(path, context, parsers, extension)
}

/// Raw template text keyed by the path it was requested with.
///
/// Entries are loaded on first use and kept for the life of the cache. The key
/// does not include the extension: asking for the same path with another
/// extension returns the text loaded first.
pub struct TemplateCache<L: TemplateLoader = FileSystemLoader> {
    loader: L,
    templates: Mutex<HashMap<PathBuf, String>>,
}

impl<L: TemplateLoader> TemplateCache<L> {
    pub fn new(loader: L) -> Self {
        Self { loader, templates: Mutex::new(HashMap::new()) }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, String>> {
        self.templates.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the raw text for `path`, loading `<path>.<extension>` on a miss.
    pub fn source<P: AsRef<Path>>(&self, path: P, extension: &str) -> Result<String> {
        let path = path.as_ref();
        let mut templates = self.lock();

        if let Some(template) = templates.get(path) {
            debug!("Template cache hit for {}", path.display());
            return Ok(template.clone());
        }

        let file = resolve_file(path, extension);
        debug!("Template cache miss for {}, reading {}", path.display(), file.display());
        let template = self.loader.load(&file)?;
        templates.insert(path.to_path_buf(), template.clone());

        Ok(template)
    }

    /// Renders `<path>.mustache`.
    pub fn render_from_source<P: AsRef<Path>>(
        &self,
        path: P,
        context: &Context,
        parsers: &[CustomParser],
    ) -> Result<String> {
        self.render_from_source_with_extension(path, context, parsers, DEFAULT_EXTENSION)
    }

    /// Renders `<path>.<extension>`.
    pub fn render_from_source_with_extension<P: AsRef<Path>>(
        &self,
        path: P,
        context: &Context,
        parsers: &[CustomParser],
        extension: &str,
    ) -> Result<String> {
        let template = self.source(path, extension)?;
        Ok(render(&template, context, parsers))
    }

    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.lock().contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Appends `.<extension>` without touching any extension `path` already has.
fn resolve_file(path: &Path, extension: &str) -> PathBuf {
    let mut file = OsString::from(path.as_os_str());
    file.push(".");
    file.push(extension);
    PathBuf::from(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_file() {
        assert_eq!(resolve_file(Path::new("views/page"), "mustache"), Path::new("views/page.mustache"));
        assert_eq!(resolve_file(Path::new("mail.v2"), "txt"), Path::new("mail.v2.txt"));
    }
}
