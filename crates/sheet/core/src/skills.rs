//! Skill proficiencies: the `skills` list view and the template context.

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::abilities::Ability;

/// The eighteen standard skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Skill {
    Acrobatics,
    #[strum(to_string = "Animal Handling")]
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    #[strum(to_string = "Sleight of Hand")]
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub fn all() -> impl Iterator<Item = Skill> {
        Self::iter()
    }

    /// Governing ability.
    pub const fn ability(self) -> Ability {
        match self {
            Self::Athletics => Ability::Strength,
            Self::Acrobatics | Self::SleightOfHand | Self::Stealth => Ability::Dexterity,
            Self::Arcana
            | Self::History
            | Self::Investigation
            | Self::Nature
            | Self::Religion => Ability::Intelligence,
            Self::AnimalHandling
            | Self::Insight
            | Self::Medicine
            | Self::Perception
            | Self::Survival => Ability::Wisdom,
            Self::Deception | Self::Intimidation | Self::Performance | Self::Persuasion => {
                Ability::Charisma
            }
        }
    }
}

/// How strongly a character is trained in a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Proficiency {
    None,
    Half,
    Proficient,
    Expert,
}

impl Proficiency {
    /// Multiplier on the proficiency bonus, in halves.
    pub const fn halves(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Half => 1,
            Self::Proficient => 2,
            Self::Expert => 4,
        }
    }
}

/// `Sleight of Hand`, `sleight_of_hand` and `sleight-of-hand` name one skill.
fn skill_key(name: &str) -> String {
    name.to_lowercase().replace(['_', '-'], " ")
}

/// Flat bonus on one skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBonus {
    pub name: String,
    pub target: String,
    pub value: i32,
}

/// Parsed `skills` block. Skill names are stored lowercased.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillsBlock {
    pub proficiencies: Vec<String>,
    pub expertise: Vec<String>,
    pub half_proficiencies: Vec<String>,
    pub bonuses: Vec<SkillBonus>,
}

impl SkillsBlock {
    /// Expertise wins over proficiency, which wins over half proficiency.
    pub fn proficiency(&self, skill: &str) -> Proficiency {
        let skill = skill_key(skill);
        let listed = |names: &[String]| names.iter().any(|name| skill_key(name) == skill);
        if listed(&self.expertise) {
            Proficiency::Expert
        } else if listed(&self.proficiencies) {
            Proficiency::Proficient
        } else if listed(&self.half_proficiencies) {
            Proficiency::Half
        } else {
            Proficiency::None
        }
    }

    /// Ability modifier plus proficiency (half proficiency rounds down) plus bonuses.
    pub fn skill_value(&self, skill: &str, ability_modifier: i32, proficiency_bonus: i32) -> i32 {
        let halves = self.proficiency(skill).halves();
        let proficiency = (proficiency_bonus * halves).div_euclid(2);
        let skill = skill_key(skill);
        let bonus: i32 = self
            .bonuses
            .iter()
            .filter(|bonus| skill_key(&bonus.target) == skill)
            .map(|bonus| bonus.value)
            .sum();
        ability_modifier + proficiency + bonus
    }
}
