//! Tabletop character-sheet rules and data types shared across crates.
//!
//! `sheet-core` defines the canonical static blocks (what an author writes in a
//! fenced code block), the mutable widget states that get persisted, and the
//! pure functions that derive values or transition state. Nothing in this crate
//! performs I/O; parsing lives in `sheet-content` and persistence in
//! `sheet-runtime`.
pub mod abilities;
pub mod badges;
pub mod config;
pub mod consumables;
pub mod error;
pub mod events;
pub mod health;
pub mod initiative;
pub mod saving_throws;
pub mod skills;
pub mod stats;
pub mod template;

pub use abilities::{
    Ability, AbilityBlock, AbilityBonus, AbilityScores, BonusTarget, calculate_modifier,
    format_modifier,
};
pub use badges::{BadgeItem, BadgesBlock};
pub use config::SheetConfig;
pub use consumables::{ConsumableAction, ConsumableItem, ConsumableState, ConsumablesBlock};
pub use error::{ErrorSeverity, SheetError};
pub use events::{ResetOn, ResetRule, reset_amount, should_reset_on_event};
pub use health::{HealthAction, HealthBlock, HealthState, HitDice};
pub use initiative::{
    HpShape, InitiativeAction, InitiativeBlock, InitiativeItem, InitiativeState, SortedEntry,
};
pub use saving_throws::{SavingThrow, SavingThrowsBlock, calculate_saving_throw};
pub use skills::{Proficiency, Skill, SkillBonus, SkillsBlock};
pub use stats::{StatItem, StatValue, StatsBlock};
pub use template::{TemplateContext, TemplateEngine, TemplateError};
