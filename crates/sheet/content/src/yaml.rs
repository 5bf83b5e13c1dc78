//! Lenient reads over YAML block bodies.
//!
//! Authors hand-write these blocks, so every accessor answers `None` (or an
//! empty list) for a missing or wrongly typed field instead of failing the
//! whole block.

use anyhow::Context;
use serde_json::Value as Json;
use serde_yaml_ng::Value as Yaml;
use sheet_core::{ResetOn, ResetRule};
use tracing::warn;

/// Common result type for strict loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Parses a block body, failing on malformed YAML.
pub fn parse_yaml(source: &str) -> LoadResult<Yaml> {
    serde_yaml_ng::from_str(source).context("failed to parse block YAML")
}

/// Parses a block body; malformed YAML is logged and reads as an empty block.
pub fn parse_lenient(codeblock: &str, source: &str) -> Yaml {
    match parse_yaml(source) {
        Ok(value) => value,
        Err(err) => {
            warn!(codeblock, error = %err, "malformed block, using defaults");
            Yaml::Null
        }
    }
}

pub(crate) fn int(value: &Yaml) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite())
            .map(|n| n.trunc() as i64)
    })
}

pub(crate) fn int_field(value: &Yaml, key: &str) -> Option<i32> {
    value
        .get(key)
        .and_then(int)
        .and_then(|n| i32::try_from(n).ok())
}

pub(crate) fn uint_field(value: &Yaml, key: &str) -> Option<u32> {
    value
        .get(key)
        .and_then(int)
        .and_then(|n| u32::try_from(n).ok())
}

/// Scalar text. Numbers and booleans are accepted and printed.
pub(crate) fn text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn text_field(value: &Yaml, key: &str) -> Option<String> {
    value.get(key).and_then(text)
}

pub(crate) fn seq_field<'a>(value: &'a Yaml, key: &str) -> &'a [Yaml] {
    value
        .get(key)
        .and_then(Yaml::as_sequence)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// String entries of a list field; other entries are dropped.
pub(crate) fn string_list(value: &Yaml, key: &str) -> Vec<String> {
    seq_field(value, key)
        .iter()
        .filter_map(Yaml::as_str)
        .map(str::to_string)
        .collect()
}

/// The `reset_on` field in any of its three shapes.
///
/// The shape of a list is decided by its first entry, as authors never mix
/// names and rules in one list.
pub(crate) fn reset_on(value: &Yaml) -> Option<ResetOn> {
    match value.get("reset_on")? {
        Yaml::String(event) => Some(ResetOn::Event(event.clone())),
        Yaml::Sequence(entries) => match entries.first()? {
            Yaml::String(_) => Some(ResetOn::Events(
                entries
                    .iter()
                    .filter_map(Yaml::as_str)
                    .map(str::to_string)
                    .collect(),
            )),
            Yaml::Mapping(_) => Some(ResetOn::Partial(
                entries
                    .iter()
                    .filter_map(|entry| {
                        Some(ResetRule {
                            event: text_field(entry, "event")?,
                            amount: uint_field(entry, "amount"),
                        })
                    })
                    .collect(),
            )),
            _ => None,
        },
        _ => None,
    }
}

/// Converts YAML (typically frontmatter) into a template value.
///
/// Integers stay integers so `{{frontmatter.level}}` prints `5`. Mapping keys
/// that are not scalars are dropped.
pub fn to_template_value(value: &Yaml) -> Json {
    match value {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(*b),
        Yaml::Number(n) => match n.as_i64() {
            Some(i) => Json::from(i),
            None => n
                .as_f64()
                .and_then(serde_json::Number::from_f64)
                .map(Json::Number)
                .unwrap_or_default(),
        },
        Yaml::String(s) => Json::String(s.clone()),
        Yaml::Sequence(items) => Json::Array(items.iter().map(to_template_value).collect()),
        Yaml::Mapping(map) => Json::Object(
            map.iter()
                .filter_map(|(key, value)| Some((text(key)?, to_template_value(value))))
                .collect(),
        ),
        Yaml::Tagged(tagged) => to_template_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(source: &str) -> Yaml {
        parse_yaml(source).unwrap()
    }

    #[test]
    fn malformed_yaml_reads_as_empty() {
        assert_eq!(parse_lenient("test", "items: [unclosed"), Yaml::Null);
        assert!(parse_yaml("items: [unclosed").is_err());
    }

    #[test]
    fn wrongly_typed_fields_are_ignored() {
        let doc = yaml("health: lots\nac: 12.7\nname: 42\nlist: nope");
        assert_eq!(int_field(&doc, "health"), None);
        assert_eq!(int_field(&doc, "ac"), Some(12));
        assert_eq!(text_field(&doc, "name").as_deref(), Some("42"));
        assert!(seq_field(&doc, "list").is_empty());
        assert_eq!(uint_field(&doc, "missing"), None);
    }

    #[test]
    fn negative_counts_are_rejected() {
        let doc = yaml("uses: -3");
        assert_eq!(uint_field(&doc, "uses"), None);
    }

    #[test]
    fn reads_every_reset_on_shape() {
        assert_eq!(
            reset_on(&yaml("reset_on: long-rest")),
            Some(ResetOn::Event("long-rest".into()))
        );
        assert_eq!(
            reset_on(&yaml("reset_on: [short-rest, long-rest]")),
            Some(ResetOn::Events(vec!["short-rest".into(), "long-rest".into()]))
        );
        assert_eq!(
            reset_on(&yaml(
                "reset_on:\n  - event: short-rest\n    amount: 1\n  - event: dawn"
            )),
            Some(ResetOn::Partial(vec![
                ResetRule {
                    event: "short-rest".into(),
                    amount: Some(1),
                },
                ResetRule {
                    event: "dawn".into(),
                    amount: None,
                },
            ]))
        );
        assert_eq!(reset_on(&yaml("reset_on: 3")), None);
        assert_eq!(reset_on(&yaml("other: 1")), None);
    }

    #[test]
    fn converts_frontmatter_to_template_values() {
        let value = to_template_value(&yaml("level: 5\nclass: Wizard\ntags: [a, b]"));
        assert_eq!(
            value,
            serde_json::json!({"level": 5, "class": "Wizard", "tags": ["a", "b"]})
        );
        assert_eq!(
            to_template_value(&yaml("speed: 7.5\n3: three")),
            serde_json::json!({"speed": 7.5, "3": "three"})
        );
    }
}
