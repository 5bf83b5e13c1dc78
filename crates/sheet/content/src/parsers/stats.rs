//! `stats` blocks.

use serde_yaml_ng::Value as Yaml;
use sheet_core::{StatItem, StatValue, StatsBlock};

use super::BlockParser;
use crate::yaml::{seq_field, text, text_field, uint_field};

pub struct StatsParser;

impl BlockParser for StatsParser {
    const CODEBLOCK: &'static str = "stats";

    type Block = StatsBlock;

    fn from_yaml(doc: &Yaml) -> StatsBlock {
        StatsBlock {
            items: seq_field(doc, "items").iter().filter_map(item).collect(),
            columns: doc
                .get("grid")
                .and_then(|grid| uint_field(grid, "columns")),
        }
    }
}

fn item(entry: &Yaml) -> Option<StatItem> {
    let value = match entry.get("value")? {
        Yaml::Number(n) => StatValue::Number(n.as_f64()?),
        other => StatValue::Text(text(other)?),
    };
    Some(StatItem {
        label: text_field(entry, "label")?,
        value,
        sublabel: text_field(entry, "sublabel"),
    })
}
