//! `healthpoints` blocks.

use serde_yaml_ng::Value as Yaml;
use sheet_core::{HealthBlock, HitDice};

use super::BlockParser;
use crate::yaml::{int_field, reset_on, text_field, uint_field};

pub struct HealthParser;

impl BlockParser for HealthParser {
    const CODEBLOCK: &'static str = "healthpoints";

    type Block = HealthBlock;

    /// Fields the author leaves out are filled from [`HealthBlock::default`],
    /// including the individual fields of `hitdice`.
    fn from_yaml(doc: &Yaml) -> HealthBlock {
        let defaults = HealthBlock::default();
        let hitdice = match doc.get("hitdice") {
            Some(dice) => HitDice {
                dice: text_field(dice, "dice").unwrap_or(defaults.hitdice.dice),
                value: uint_field(dice, "value").unwrap_or(defaults.hitdice.value),
            },
            None => defaults.hitdice,
        };

        HealthBlock {
            state_key: text_field(doc, "state_key"),
            health: int_field(doc, "health").unwrap_or(defaults.health),
            hitdice,
            reset_on: reset_on(doc),
        }
    }
}
