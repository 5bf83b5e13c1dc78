//! Hit point and hit dice tracker.

use crate::config::SheetConfig;
use crate::events::{ResetOn, reset_amount, should_reset_on_event};

/// Hit dice pool, e.g. `3d8`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitDice {
    pub dice: String,
    pub value: u32,
}

impl Default for HitDice {
    fn default() -> Self {
        Self {
            dice: SheetConfig::DEFAULT_HIT_DIE.to_string(),
            value: SheetConfig::DEFAULT_HIT_DICE,
        }
    }
}

/// Parsed `healthpoints` block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthBlock {
    pub state_key: Option<String>,
    /// Maximum hit points.
    pub health: i32,
    pub hitdice: HitDice,
    pub reset_on: Option<ResetOn>,
}

impl Default for HealthBlock {
    fn default() -> Self {
        Self {
            state_key: None,
            health: SheetConfig::DEFAULT_HEALTH,
            hitdice: HitDice::default(),
            reset_on: None,
        }
    }
}

impl HealthBlock {
    pub fn default_state(&self) -> HealthState {
        HealthState {
            current: self.health,
            temporary: 0,
            hitdice_used: 0,
        }
    }
}

/// Persisted health state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HealthState {
    pub current: i32,
    pub temporary: i32,
    pub hitdice_used: u32,
}

/// User interactions on a health card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HealthAction {
    Damage(i32),
    Heal(i32),
    SetTemporary(i32),
    ToggleHitDie(u32),
    /// A rest or other reset event; only acts when the block's `reset_on` matches.
    Event(String),
}

impl HealthAction {
    /// Returns the state after applying this action. Non-positive amounts are ignored.
    pub fn apply(&self, block: &HealthBlock, state: &HealthState) -> HealthState {
        let mut next = state.clone();
        match self {
            Self::Damage(amount) if *amount > 0 => {
                let absorbed = next.temporary.min(*amount);
                next.temporary -= absorbed;
                next.current = (next.current - (amount - absorbed)).max(0);
            }
            Self::Heal(amount) if *amount > 0 => {
                next.current = (next.current + amount).min(block.health);
            }
            Self::SetTemporary(amount) if *amount > 0 => {
                next.temporary = next.temporary.max(*amount);
            }
            Self::ToggleHitDie(index) => {
                next.hitdice_used = toggle_box(state.hitdice_used, *index, block.hitdice.value);
            }
            Self::Event(event) if should_reset_on_event(block.reset_on.as_ref(), event) => {
                next.current = block.health;
                next.temporary = 0;
                next.hitdice_used = match reset_amount(block.reset_on.as_ref(), event) {
                    Some(amount) => next.hitdice_used.saturating_sub(amount),
                    None => 0,
                };
            }
            _ => {}
        }
        next
    }
}

/// Box-row toggle shared by hit dice and consumables.
///
/// Box `index` is checked iff `index < used`. Clicking a checked box unchecks it
/// and everything after it; clicking an unchecked box checks it and everything
/// before it. Clicks past `total` are ignored.
pub fn toggle_box(used: u32, index: u32, total: u32) -> u32 {
    if index >= total {
        return used.min(total);
    }
    if index < used { index } else { index + 1 }
}
