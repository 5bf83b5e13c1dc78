//! `ability` blocks.

use serde_yaml_ng::Value as Yaml;
use sheet_core::{Ability, AbilityBlock, AbilityBonus, AbilityScores, BonusTarget, SheetConfig};

use super::BlockParser;
use crate::yaml::{int_field, seq_field, text_field};

pub struct AbilityParser;

impl BlockParser for AbilityParser {
    const CODEBLOCK: &'static str = "ability";

    type Block = AbilityBlock;

    fn from_yaml(doc: &Yaml) -> AbilityBlock {
        let scores = scores(doc, 0);
        // `modifiers` is the older spelling of `bonuses`.
        let bonuses = match doc.get("bonuses") {
            Some(_) => seq_field(doc, "bonuses"),
            None => seq_field(doc, "modifiers"),
        };

        AbilityBlock {
            id: text_field(doc, "id"),
            abilities: scores,
            bonuses: bonuses.iter().filter_map(bonus).collect(),
        }
    }
}

impl AbilityParser {
    /// The block as seen by another block referencing it by id: scores the
    /// author left out count as 10. `None` when the block has no `abilities`.
    pub fn referenced(doc: &Yaml) -> Option<AbilityBlock> {
        doc.get("abilities")?.as_mapping()?;
        Some(AbilityBlock {
            abilities: scores(doc, SheetConfig::REFERENCED_ABILITY_DEFAULT),
            ..Self::from_yaml(doc)
        })
    }
}

fn scores(doc: &Yaml, missing: i32) -> AbilityScores {
    let mut scores = AbilityScores::uniform(missing);
    if let Some(abilities) = doc.get("abilities") {
        for ability in Ability::all() {
            if let Some(score) = int_field(abilities, ability.as_ref()) {
                scores.set(ability, score);
            }
        }
    }
    scores
}

/// A bonus needs a name, a known target ability and an integer value.
fn bonus(entry: &Yaml) -> Option<AbilityBonus> {
    let target = text_field(entry, "target")?.parse::<Ability>().ok()?;
    let modifies = match text_field(entry, "modifies").as_deref() {
        None | Some("score") => BonusTarget::Score,
        Some("saving_throw") => BonusTarget::SavingThrow,
        Some(_) => return None,
    };
    Some(AbilityBonus {
        name: entry.get("name")?.as_str()?.to_string(),
        target,
        value: int_field(entry, "value")?,
        modifies,
    })
}
