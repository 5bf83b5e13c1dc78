//! Saving throw derivation.

use std::collections::BTreeMap;

use crate::abilities::{Ability, AbilityScores, calculate_modifier, format_modifier};
use crate::config::SheetConfig;

/// Parsed `savingthrows` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavingThrowsBlock {
    pub proficiency_bonus: i32,
    pub proficiencies: Vec<Ability>,
    pub bonuses: BTreeMap<Ability, i32>,
    /// Id of the `ability` block whose scores feed these saves.
    pub ability_block_id: Option<String>,
}

impl Default for SavingThrowsBlock {
    fn default() -> Self {
        Self {
            proficiency_bonus: SheetConfig::DEFAULT_PROFICIENCY_BONUS,
            proficiencies: Vec::new(),
            bonuses: BTreeMap::new(),
            ability_block_id: None,
        }
    }
}

impl SavingThrowsBlock {
    pub fn is_proficient(&self, ability: Ability) -> bool {
        self.proficiencies.contains(&ability)
    }

    pub fn bonus(&self, ability: Ability) -> i32 {
        self.bonuses.get(&ability).copied().unwrap_or(0)
    }

    /// One row per ability, in canonical order.
    ///
    /// `extra_bonus` lets callers add bonuses declared elsewhere (an ability
    /// block's `modifies: saving_throw` entries).
    pub fn saving_throws(
        &self,
        scores: &AbilityScores,
        extra_bonus: impl Fn(Ability) -> i32,
    ) -> Vec<SavingThrow> {
        Ability::all()
            .map(|ability| {
                let proficient = self.is_proficient(ability);
                let value = calculate_saving_throw(
                    ability,
                    scores,
                    self.proficiency_bonus,
                    proficient,
                    self.bonus(ability) + extra_bonus(ability),
                );
                SavingThrow {
                    ability,
                    proficient,
                    value,
                }
            })
            .collect()
    }
}

/// A computed saving throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SavingThrow {
    pub ability: Ability,
    pub proficient: bool,
    pub value: i32,
}

impl SavingThrow {
    pub fn label(&self) -> String {
        format!("{} Save", self.ability.title())
    }

    pub fn formatted(&self) -> String {
        format_modifier(self.value)
    }
}

/// `modifier(score) + (proficient ? proficiency_bonus : 0) + bonus`.
pub fn calculate_saving_throw(
    ability: Ability,
    scores: &AbilityScores,
    proficiency_bonus: i32,
    proficient: bool,
    bonus: i32,
) -> i32 {
    let proficiency = if proficient { proficiency_bonus } else { 0 };
    calculate_modifier(scores.get(ability)) + proficiency + bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_proficiency_only_when_proficient() {
        let scores = AbilityScores {
            dexterity: 14,
            wisdom: 8,
            ..AbilityScores::uniform(10)
        };

        assert_eq!(
            calculate_saving_throw(Ability::Dexterity, &scores, 3, true, 0),
            5
        );
        assert_eq!(
            calculate_saving_throw(Ability::Dexterity, &scores, 3, false, 0),
            2
        );
        assert_eq!(calculate_saving_throw(Ability::Wisdom, &scores, 3, false, 1), 0);
    }

    #[test]
    fn rows_cover_all_abilities_with_bonuses() {
        let block = SavingThrowsBlock {
            proficiency_bonus: 2,
            proficiencies: vec![Ability::Constitution],
            bonuses: BTreeMap::from([(Ability::Charisma, 1)]),
            ability_block_id: None,
        };
        let scores = AbilityScores::uniform(12);

        let rows = block.saving_throws(&scores, |ability| {
            if ability == Ability::Strength { 2 } else { 0 }
        });

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].value, 3);
        assert_eq!(rows[2].value, 3);
        assert!(rows[2].proficient);
        assert_eq!(rows[5].value, 2);
        assert_eq!(rows[5].label(), "Charisma Save");
        assert_eq!(rows[1].formatted(), "+1");
    }
}
