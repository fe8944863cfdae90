use stache::context::load_context;
use stache::error::Error;
use stache::{render, Value};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_yaml_context_and_render() {
    let temp_dir = TempDir::new().unwrap();
    let file = temp_dir.path().join("context.yaml");
    fs::write(&file, "items:\n  - name: one\n  - name: two\nshow: true\nlabel: List\n").unwrap();

    let ctx = load_context(&file).unwrap();
    assert!(matches!(ctx["show"], Value::Boolean(true)));

    let template = "{{#show}}{{label}}:{{/show}}\n{{#items}}\n- {{name}}\n{{/items}}";
    assert_eq!(render(template, &ctx, &[]), "List:\n- one\n- two\n\n");
}

#[test]
fn test_load_missing_context() {
    let temp_dir = TempDir::new().unwrap();
    let result = load_context(temp_dir.path().join("nope.json"));
    assert!(matches!(result, Err(Error::IoError(_))));
}
