//! The substitution engine.
//!
//! Walks a binding context in order and rewrites the template once per entry.
//! Section bodies are substituted recursively against the item or map that
//! drives them. Conditional bodies are always substituted against the root
//! context handed to the outermost call, never against the current scope.

use crate::constants::ITEM_KEY;
use crate::escape::escape_html;
use crate::matcher::{find_sections, remove_sections, SectionKind};
use crate::value::{Context, DeferredFn, Value};
use log::{debug, trace};
use std::borrow::Cow;

/// Substitutes every entry of `scope` into `template`.
///
/// `root` is the context of the outermost render and is used for the bodies of
/// boolean sections.
pub fn substitute(template: &str, scope: &Context, root: &Context) -> String {
    let mut template = template.to_string();

    for (key, value) in scope {
        trace!("Substituting '{}' ({})", key, value.kind());

        template = match value {
            Value::List(items) if items.is_empty() => {
                remove_sections(&template, key, SectionKind::Positive)
            }
            Value::List(items) => expand_list(&template, key, items, root),
            Value::Map(map) if map.is_empty() => {
                remove_sections(&template, key, SectionKind::Positive)
            }
            Value::Map(map) => expand_singleton(&template, key, map, root),
            Value::Boolean(truth) => apply_condition(&template, key, *truth, root),
            Value::DeferredText(f) => replace_deferred(&template, key, f),
            Value::Scalar(text) => replace_scalar(&template, key, text),
            Value::Opaque(_) => {
                debug!("Skipping opaque value bound to '{}'", key);
                template
            }
        };
    }

    template
}

fn escaped_tag(key: &str) -> String {
    format!("{{{{{}}}}}", key)
}

fn raw_tag(key: &str) -> String {
    format!("{{{{{{{}}}}}}}", key)
}

/// Repeats every `{{#key}}` section once per list item.
fn expand_list(template: &str, key: &str, items: &[Value], root: &Context) -> String {
    let mut template = template.to_string();

    for section in find_sections(&template, key, SectionKind::Positive) {
        let body = loop_body(&section.body);
        let mut content: String = items
            .iter()
            .map(|item| substitute(&body, &item_scope(item), root))
            .collect();
        content.push('\n');

        template = template.replacen(&section.full, &content, 1);
    }

    template
}

/// Renders every `{{#key}}` section once against `map`.
fn expand_singleton(template: &str, key: &str, map: &Context, root: &Context) -> String {
    let mut template = template.to_string();

    for section in find_sections(&template, key, SectionKind::Positive) {
        let mut content = substitute(&section.body, map, root);
        content.push('\n');

        template = template.replacen(&section.full, &content, 1);
    }

    template
}

/// Drops the sections that contradict `truth` and renders the others against `root`.
fn apply_condition(template: &str, key: &str, truth: bool, root: &Context) -> String {
    let include = SectionKind::for_truth(truth);
    let mut template = remove_sections(template, key, include.opposite());

    for section in find_sections(&template, key, include) {
        let mut content = substitute(&section.body, root, root);
        content.push('\n');

        template = template.replacen(&section.full, &content, 1);
    }

    template
}

/// Each tag form present gets its own invocation.
fn replace_deferred(template: &str, key: &str, f: &DeferredFn) -> String {
    let mut template = template.to_string();

    let raw = raw_tag(key);
    if template.contains(&raw) {
        template = template.replace(&raw, &f());
    }

    let escaped = escaped_tag(key);
    if template.contains(&escaped) {
        template = template.replace(&escaped, &escape_html(&f()));
    }

    template
}

fn replace_scalar(template: &str, key: &str, text: &str) -> String {
    template
        .replace(&raw_tag(key), text)
        .replace(&escaped_tag(key), &escape_html(text))
}

/// Scope for one list item: maps are used directly, anything else is exposed
/// under the item key. Nested non-empty lists are wrapped too.
fn item_scope(item: &Value) -> Cow<'_, Context> {
    match item {
        Value::Map(map) => Cow::Borrowed(map),
        Value::List(items) if items.is_empty() => Cow::Owned(Context::new()),
        other => {
            let mut scope = Context::new();
            scope.insert(ITEM_KEY.to_string(), other.clone());
            Cow::Owned(scope)
        }
    }
}

/// Trims leading whitespace and the final line break of a loop body, then
/// restores exactly one trailing newline so every item ends on its own line.
fn loop_body(body: &str) -> String {
    let trimmed = body.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0B');
    let trimmed = trimmed
        .strip_suffix("\n\n")
        .or_else(|| trimmed.strip_suffix('\n'))
        .unwrap_or(trimmed);

    let mut body = String::with_capacity(trimmed.len() + 1);
    body.push_str(trimmed);
    body.push('\n');
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn context(entries: Vec<(&str, Value)>) -> Context {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn render(template: &str, ctx: &Context) -> String {
        substitute(template, ctx, ctx)
    }

    #[test]
    fn test_tag_helpers() {
        assert_eq!(escaped_tag("name"), "{{name}}");
        assert_eq!(raw_tag("name"), "{{{name}}}");
    }

    #[test]
    fn test_loop_body() {
        assert_eq!(loop_body("\n  <li>{{_}}</li>\n"), "<li>{{_}}</li>\n");
        assert_eq!(loop_body("x\n\n"), "x\n");
        assert_eq!(loop_body("x"), "x\n");
        assert_eq!(loop_body("\n"), "\n");
    }

    #[test]
    fn test_scalar_forms() {
        let ctx = context(vec![("v", Value::from("<a & b>"))]);
        assert_eq!(render("{{v}}|{{{v}}}", &ctx), "&lt;a &amp; b&gt;|<a & b>");
    }

    #[test]
    fn test_list_of_scalars() {
        let ctx = context(vec![("key", Value::from(vec![1, 2, 3]))]);
        assert_eq!(render("{{#key}}{{_}}{{/key}}", &ctx), "1\n2\n3\n\n");
    }

    #[test]
    fn test_list_of_maps() {
        let people = vec![
            Value::Map(context(vec![("name", Value::from("Ann"))])),
            Value::Map(context(vec![("name", Value::from("Bob"))])),
        ];
        let ctx = context(vec![("people", Value::List(people))]);
        let template = "<ul>\n{{#people}}\n<li>{{name}}</li>\n{{/people}}\n</ul>";

        assert_eq!(render(template, &ctx), "<ul>\n<li>Ann</li>\n<li>Bob</li>\n\n</ul>");
    }

    #[test]
    fn test_list_of_lists_wraps_each_item() {
        let grid = Value::List(vec![Value::from(vec!["a", "b"]), Value::from(vec!["c"])]);
        let ctx = context(vec![("rows", grid)]);
        let template = "{{#rows}}[{{#_}}{{_}}{{/_}}]{{/rows}}";

        assert_eq!(render(template, &ctx), "[a\nb\n\n]\n[c\n\n]\n\n");
    }

    #[test]
    fn test_empty_list_removes_section() {
        let ctx = context(vec![("key", Value::List(Vec::new()))]);
        assert_eq!(render("{{#key}}X{{/key}}", &ctx), "");
        assert_eq!(render("a\n{{#key}}X{{/key}}\n\nb", &ctx), "a\nb");
    }

    #[test]
    fn test_map_renders_section_once() {
        let ctx = context(vec![(
            "user",
            Value::Map(context(vec![("name", Value::from("Ann"))])),
        )]);
        assert_eq!(render("{{#user}}Hi {{name}}{{/user}}", &ctx), "Hi Ann\n");
    }

    #[test]
    fn test_empty_map_removes_section() {
        let ctx = context(vec![("user", Value::Map(Context::new()))]);
        assert_eq!(render("a{{#user}}Hi{{/user}}b", &ctx), "ab");
    }

    #[test]
    fn test_boolean_sections() {
        let template = "{{#key}}A{{/key}}{{^key}}B{{/key}}";
        assert_eq!(render(template, &context(vec![("key", Value::from(true))])), "A\n");
        assert_eq!(render(template, &context(vec![("key", Value::from(false))])), "B\n");
    }

    #[test]
    fn test_boolean_body_uses_root_context() {
        let root = context(vec![("title", Value::from("root"))]);
        let scope = context(vec![("show", Value::from(true)), ("title", Value::from("inner"))]);

        assert_eq!(substitute("{{#show}}{{title}}{{/show}}", &scope, &root), "root\n");
    }

    #[test]
    fn test_boolean_inside_loop_reads_root() {
        let items = vec![Value::Map(context(vec![
            ("flag", Value::from(true)),
            ("x", Value::from("item")),
        ]))];
        let ctx = context(vec![("list", Value::List(items)), ("x", Value::from("top"))]);

        assert_eq!(render("{{#list}}{{#flag}}{{x}}{{/flag}}{{/list}}", &ctx), "top\n\n");
    }

    #[test]
    fn test_deferred_called_once_per_form() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let ctx = context(vec![(
            "now",
            Value::deferred(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                "<t>".to_string()
            }),
        )]);

        assert_eq!(render("{{now}} {{now}} {{{now}}}", &ctx), "&lt;t&gt; &lt;t&gt; <t>");
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert_eq!(render("{{now}}", &ctx), "&lt;t&gt;");
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        assert_eq!(render("nothing", &ctx), "nothing");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_opaque_is_left_untouched() {
        let ctx = context(vec![("obj", Value::opaque(42u32))]);
        let template = "{{obj}} {{{obj}}} {{#obj}}x{{/obj}}";
        assert_eq!(render(template, &ctx), template);
    }

    #[test]
    fn test_unbound_tags_remain() {
        let ctx = context(vec![("a", Value::from("1"))]);
        assert_eq!(render("{{a}} {{b}}", &ctx), "1 {{b}}");
    }
}
