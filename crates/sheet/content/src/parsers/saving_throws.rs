//! `savingthrows` blocks.

use std::collections::BTreeMap;

use serde_yaml_ng::Value as Yaml;
use sheet_core::{Ability, SavingThrowsBlock, SheetConfig};

use super::BlockParser;
use crate::yaml::{int, int_field, seq_field, text, text_field};

pub struct SavingThrowsParser;

impl BlockParser for SavingThrowsParser {
    const CODEBLOCK: &'static str = "savingthrows";

    type Block = SavingThrowsBlock;

    fn from_yaml(doc: &Yaml) -> SavingThrowsBlock {
        let bonuses: BTreeMap<Ability, i32> = doc
            .get("bonuses")
            .and_then(Yaml::as_mapping)
            .map(|map| {
                map.iter()
                    .filter_map(|(ability, bonus)| {
                        let ability = text(ability)?.parse::<Ability>().ok()?;
                        let bonus = i32::try_from(int(bonus)?).ok()?;
                        Some((ability, bonus))
                    })
                    .collect()
            })
            .unwrap_or_default();

        SavingThrowsBlock {
            proficiency_bonus: int_field(doc, "proficiencyBonus")
                .unwrap_or(SheetConfig::DEFAULT_PROFICIENCY_BONUS),
            proficiencies: abilities(seq_field(doc, "proficient")),
            bonuses,
            ability_block_id: text_field(doc, "abilityBlock"),
        }
    }
}

/// Ability names from a list; unknown names are dropped.
pub(crate) fn abilities(entries: &[Yaml]) -> Vec<Ability> {
    entries
        .iter()
        .filter_map(Yaml::as_str)
        .filter_map(|name| name.parse::<Ability>().ok())
        .collect()
}
