//! The six ability scores and the bonuses layered on top of them.
//!
//! Scores are stored as authored. Bonuses from feats, items, or race are kept
//! as a separate list so the view can show both the base and the total, and so
//! bonuses that only apply to saving throws never inflate the score itself.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// One of the six core abilities.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// Title-cased display name, e.g. `Strength`.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Dexterity => "Dexterity",
            Self::Constitution => "Constitution",
            Self::Intelligence => "Intelligence",
            Self::Wisdom => "Wisdom",
            Self::Charisma => "Charisma",
        }
    }

    /// Three-letter abbreviation, e.g. `STR`.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Dexterity => "DEX",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
            Self::Wisdom => "WIS",
            Self::Charisma => "CHA",
        }
    }

    pub fn all() -> impl Iterator<Item = Ability> {
        Self::iter()
    }
}

/// Raw ability scores as written in an `ability` block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    /// Every score set to the same value.
    pub const fn uniform(score: i32) -> Self {
        Self {
            strength: score,
            dexterity: score,
            constitution: score,
            intelligence: score,
            wisdom: score,
            charisma: score,
        }
    }

    pub const fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        match ability {
            Ability::Strength => self.strength = score,
            Ability::Dexterity => self.dexterity = score,
            Ability::Constitution => self.constitution = score,
            Ability::Intelligence => self.intelligence = score,
            Ability::Wisdom => self.wisdom = score,
            Ability::Charisma => self.charisma = score,
        }
    }
}

/// What a bonus applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BonusTarget {
    #[default]
    Score,
    SavingThrow,
}

/// A named adjustment to one ability, e.g. "Belt of Giant Strength +4".
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityBonus {
    pub name: String,
    pub target: Ability,
    pub value: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifies: BonusTarget,
}

/// Parsed `ability` block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityBlock {
    /// Optional identifier other blocks use to reference these scores.
    pub id: Option<String>,
    pub abilities: AbilityScores,
    pub bonuses: Vec<AbilityBonus>,
}

impl AbilityBlock {
    /// Bonuses targeting `ability` that modify `modifies`.
    pub fn bonuses_for(
        &self,
        ability: Ability,
        modifies: BonusTarget,
    ) -> impl Iterator<Item = &AbilityBonus> {
        self.bonuses
            .iter()
            .filter(move |bonus| bonus.target == ability && bonus.modifies == modifies)
    }

    /// Base score plus every score bonus for that ability.
    pub fn total_score(&self, ability: Ability) -> i32 {
        self.abilities.get(ability)
            + self
                .bonuses_for(ability, BonusTarget::Score)
                .map(|bonus| bonus.value)
                .sum::<i32>()
    }

    /// All six totals, used as the `abilities` template context.
    pub fn total_scores(&self) -> AbilityScores {
        let mut totals = AbilityScores::default();
        for ability in Ability::all() {
            totals.set(ability, self.total_score(ability));
        }
        totals
    }

    /// Sum of saving-throw bonuses declared for `ability`.
    pub fn saving_throw_bonus(&self, ability: Ability) -> i32 {
        self.bonuses_for(ability, BonusTarget::SavingThrow)
            .map(|bonus| bonus.value)
            .sum()
    }
}

/// Ability modifier: `floor((score - 10) / 2)`.
pub fn calculate_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Signed display form of a modifier: `+2`, `+0`, `-1`.
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{modifier}")
    } else {
        modifier.to_string()
    }
}
