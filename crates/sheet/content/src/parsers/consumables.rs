//! `consumable` blocks: a list of independently persisted rows.

use serde_yaml_ng::Value as Yaml;
use sheet_core::{ConsumableItem, ConsumablesBlock};

use super::BlockParser;
use crate::yaml::{reset_on, seq_field, text_field, uint_field};

pub struct ConsumablesParser;

impl BlockParser for ConsumablesParser {
    const CODEBLOCK: &'static str = "consumable";

    type Block = ConsumablesBlock;

    /// Entries that are not mappings are skipped.
    fn from_yaml(doc: &Yaml) -> ConsumablesBlock {
        ConsumablesBlock {
            items: seq_field(doc, "items").iter().filter_map(item).collect(),
        }
    }
}

fn item(entry: &Yaml) -> Option<ConsumableItem> {
    entry.as_mapping()?;
    Some(ConsumableItem {
        label: text_field(entry, "label").unwrap_or_default(),
        state_key: text_field(entry, "state_key"),
        uses: uint_field(entry, "uses").unwrap_or(1),
        reset_on: reset_on(entry),
    })
}
