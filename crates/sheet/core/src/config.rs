/// Rule constants and tunable defaults for sheet blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetConfig {
    /// Proficiency bonus used when neither the block nor the frontmatter sets one.
    pub proficiency_bonus: i32,
}

impl SheetConfig {
    // ===== fixed labels =====
    /// HP label used for a combatant that is a single creature.
    pub const MAIN_HP_LABEL: &'static str = "main";

    // ===== block defaults =====
    pub const DEFAULT_HEALTH: i32 = 6;
    pub const DEFAULT_HIT_DIE: &'static str = "d6";
    pub const DEFAULT_HIT_DICE: u32 = 1;
    /// Score assumed for an ability missing from a block found by id.
    pub const REFERENCED_ABILITY_DEFAULT: i32 = 10;
    pub const SAVING_THROW_COLUMNS: u32 = 3;
    pub const ABILITY_COLUMNS: u32 = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PROFICIENCY_BONUS: i32 = 2;

    pub fn new() -> Self {
        Self {
            proficiency_bonus: Self::DEFAULT_PROFICIENCY_BONUS,
        }
    }

    pub fn with_proficiency_bonus(proficiency_bonus: i32) -> Self {
        Self { proficiency_bonus }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::new()
    }
}
