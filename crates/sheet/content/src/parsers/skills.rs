//! `skills` blocks.

use serde_yaml_ng::Value as Yaml;
use sheet_core::{SkillBonus, SkillsBlock};

use super::BlockParser;
use crate::yaml::{int_field, seq_field, string_list, text_field};

pub struct SkillsParser;

impl BlockParser for SkillsParser {
    const CODEBLOCK: &'static str = "skills";

    type Block = SkillsBlock;

    fn from_yaml(doc: &Yaml) -> SkillsBlock {
        let lowered = |key: &str| -> Vec<String> {
            string_list(doc, key)
                .into_iter()
                .map(|skill| skill.to_lowercase())
                .collect()
        };

        SkillsBlock {
            proficiencies: lowered("proficiencies"),
            expertise: lowered("expertise"),
            half_proficiencies: lowered("half_proficiencies"),
            bonuses: seq_field(doc, "bonuses")
                .iter()
                .filter_map(|entry| {
                    Some(SkillBonus {
                        name: text_field(entry, "name")?,
                        target: text_field(entry, "target")?.to_lowercase(),
                        value: int_field(entry, "value")?,
                    })
                })
                .collect(),
        }
    }
}
