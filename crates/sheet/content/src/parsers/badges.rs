//! `badges` blocks.

use serde_yaml_ng::Value as Yaml;
use sheet_core::{BadgeItem, BadgesBlock};

use super::BlockParser;
use crate::yaml::{seq_field, text_field};

pub struct BadgesParser;

impl BlockParser for BadgesParser {
    const CODEBLOCK: &'static str = "badges";

    type Block = BadgesBlock;

    fn from_yaml(doc: &Yaml) -> BadgesBlock {
        BadgesBlock {
            items: seq_field(doc, "items")
                .iter()
                .filter_map(|entry| {
                    Some(BadgeItem {
                        label: text_field(entry, "label"),
                        value: text_field(entry, "value")?,
                    })
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_required_label_is_not() {
        let block = BadgesParser::parse(
            "items:\n  - label: AC\n    value: 15\n  - value: Inspired\n  - label: Empty\n",
        );
        assert_eq!(
            block.items,
            [
                BadgeItem {
                    label: Some("AC".into()),
                    value: "15".into(),
                },
                BadgeItem {
                    label: None,
                    value: "Inspired".into(),
                },
            ]
        );
    }
}
