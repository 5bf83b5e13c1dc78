//! `initiative` blocks.

use indexmap::IndexMap;
use serde_yaml_ng::Value as Yaml;
use sheet_core::{HpShape, InitiativeBlock, InitiativeItem};

use super::BlockParser;
use crate::yaml::{int, int_field, seq_field, text, text_field};

pub struct InitiativeParser;

impl BlockParser for InitiativeParser {
    const CODEBLOCK: &'static str = "initiative";

    type Block = InitiativeBlock;

    fn from_yaml(doc: &Yaml) -> InitiativeBlock {
        InitiativeBlock {
            state_key: text_field(doc, "state_key"),
            items: seq_field(doc, "items").iter().map(item).collect(),
        }
    }
}

/// Saved state addresses combatants by roster position, so a malformed entry
/// still takes its slot as an empty combatant.
fn item(entry: &Yaml) -> InitiativeItem {
    if entry.as_mapping().is_none() {
        return InitiativeItem::default();
    }
    InitiativeItem {
        name: text_field(entry, "name").unwrap_or_default(),
        link: text_field(entry, "link"),
        ac: int_field(entry, "ac").unwrap_or(0),
        hp: entry.get("hp").map(hp_shape).unwrap_or_default(),
    }
}

/// The `hp` shape is settled here, once: a number is one creature, a mapping
/// is a group keyed by creature label in authored order.
fn hp_shape(value: &Yaml) -> HpShape {
    match value {
        Yaml::Mapping(labels) => HpShape::Group(
            labels
                .iter()
                .filter_map(|(label, hp)| {
                    let hp = i32::try_from(int(hp)?).ok()?;
                    Some((text(label)?, hp))
                })
                .collect::<IndexMap<_, _>>(),
        ),
        other => int(other)
            .and_then(|hp| i32::try_from(hp).ok())
            .map(HpShape::Single)
            .unwrap_or_default(),
    }
}
