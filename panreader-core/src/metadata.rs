//! Flattening of front-matter values into string metadata.

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Document metadata as handed to the host: field name to string value
pub type Metadata = BTreeMap<String, String>;

/// Key under which some front-matter loaders expose the document body.
/// It is never part of the returned metadata.
pub const CONTENT_KEY: &str = "content";

/// Flatten parsed front matter into metadata.
///
/// Every value is normalized with [`normalize_value`] and then handed to
/// `process` together with its key.
pub fn flatten<F>(fields: &Mapping, mut process: F) -> Metadata
where
    F: FnMut(&str, String) -> String,
{
    let mut metadata = Metadata::new();
    for (key, value) in fields {
        let key = render_key(key);
        if key == CONTENT_KEY {
            continue;
        }
        let value = process(&key, normalize_value(value));
        metadata.insert(key, value);
    }
    metadata
}

/// Unwrap a single-element sequence, then render the value as a string.
pub fn normalize_value(value: &Value) -> String {
    match unwrap_tag(value) {
        Value::Sequence(items) if items.len() == 1 => render(&items[0]),
        other => render(other),
    }
}

fn unwrap_tag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => unwrap_tag(&tagged.value),
        other => other,
    }
}

/// String form of a front-matter value. Never fails.
fn render(value: &Value) -> String {
    match unwrap_tag(value) {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        mapping @ Value::Mapping(_) => serde_json::to_string(mapping)
            .or_else(|_| serde_yaml::to_string(mapping).map(|s| s.trim_end().to_string()))
            .unwrap_or_default(),
        // unwrap_tag never returns a tagged value
        Value::Tagged(_) => String::new(),
    }
}

fn render_key(key: &Value) -> String {
    match unwrap_tag(key) {
        Value::String(s) => s.clone(),
        other => render(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn identity(_: &str, value: String) -> String {
        value
    }

    #[test]
    fn test_scalars_are_stringified() {
        let metadata = flatten(
            &fields("title: Hello\ncount: 3\nratio: 0.5\ndraft: true\nempty:\n"),
            identity,
        );

        assert_eq!(metadata["title"], "Hello");
        assert_eq!(metadata["count"], "3");
        assert_eq!(metadata["ratio"], "0.5");
        assert_eq!(metadata["draft"], "true");
        assert_eq!(metadata["empty"], "");
    }

    #[test]
    fn test_single_element_sequence_is_unwrapped() {
        let metadata = flatten(&fields("author: [Ada]\nnested: [[a, b]]\n"), identity);
        assert_eq!(metadata["author"], "Ada");
        assert_eq!(metadata["nested"], "a, b");
    }

    #[test]
    fn test_longer_sequences_are_joined() {
        let metadata = flatten(&fields("tags:\n  - rust\n  - pandoc\n"), identity);
        assert_eq!(metadata["tags"], "rust, pandoc");
    }

    #[test]
    fn test_mappings_render_as_json() {
        let metadata = flatten(&fields("author:\n  name: Ada\n"), identity);
        assert_eq!(metadata["author"], r#"{"name":"Ada"}"#);
    }

    #[test]
    fn test_content_key_is_dropped() {
        let metadata = flatten(&fields("title: T\ncontent: body text\n"), identity);
        assert!(!metadata.contains_key(CONTENT_KEY));
        assert_eq!(metadata.len(), 1);
    }

    #[test]
    fn test_non_string_keys() {
        let metadata = flatten(&fields("1: one\ntrue: yes\n"), identity);
        assert_eq!(metadata["1"], "one");
        assert_eq!(metadata["true"], "yes");
    }

    #[test]
    fn test_tagged_values_use_inner_value() {
        let metadata = flatten(&fields("when: !date 2024-01-01\n"), identity);
        assert_eq!(metadata["when"], "2024-01-01");
    }

    #[test]
    fn test_process_hook_sees_key_and_value() {
        let metadata = flatten(&fields("title: hello\nslug: s\n"), |key, value| {
            if key == "title" {
                value.to_uppercase()
            } else {
                value
            }
        });
        assert_eq!(metadata["title"], "HELLO");
        assert_eq!(metadata["slug"], "s");
    }
}
