//! Turn order and HP bookkeeping for the initiative tracker.
//!
//! Every function here is pure: it takes the current state by reference and
//! returns the next state. The controller persists whatever comes back.

use std::collections::BTreeMap;

use super::hp::max_hp;
use super::types::{InitiativeBlock, InitiativeItem, InitiativeState, SortedEntry};

/// Zero state for a roster: no active combatant, round 1, every initiative 0,
/// every creature at max HP.
pub fn default_state(block: &InitiativeBlock) -> InitiativeState {
    let mut state = InitiativeState::default();
    for (index, item) in block.items.iter().enumerate() {
        state.initiatives.insert(index, 0);
        let labels: BTreeMap<String, i32> = item
            .hp
            .labels()
            .into_iter()
            .map(|(label, max)| (label.to_string(), max))
            .collect();
        state.hp.insert(index, labels);
    }
    state
}

/// Turn order: highest initiative first; ties keep roster order.
///
/// Recomputed on every call so edits to initiative rolls apply immediately.
pub fn sorted_view<'a>(
    items: &'a [InitiativeItem],
    initiatives: &BTreeMap<usize, i32>,
) -> Vec<SortedEntry<'a>> {
    let mut view: Vec<SortedEntry<'a>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| SortedEntry {
            item,
            index,
            initiative: initiatives.get(&index).copied().unwrap_or(0),
        })
        .collect();
    // `sort_by` is stable, so equal rolls keep their roster order.
    view.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    view
}

fn position_in(view: &[SortedEntry<'_>], active: Option<usize>) -> Option<usize> {
    let active = active?;
    view.iter().position(|entry| entry.index == active)
}

/// Next combatant's turn. Wrapping past the last combatant starts a new round.
pub fn advance(state: &InitiativeState, view: &[SortedEntry<'_>]) -> InitiativeState {
    let mut next = state.clone();
    let Some(first) = view.first() else {
        return next;
    };

    match position_in(view, state.active_index) {
        None => next.active_index = Some(first.index),
        Some(position) if position + 1 < view.len() => {
            next.active_index = Some(view[position + 1].index);
        }
        Some(_) => {
            next.active_index = Some(first.index);
            next.round = state.round.saturating_add(1);
        }
    }
    next
}

/// Previous combatant's turn. Wrapping before the first combatant goes back a
/// round, but never below round 1.
pub fn retreat(state: &InitiativeState, view: &[SortedEntry<'_>]) -> InitiativeState {
    let mut next = state.clone();
    let Some(last) = view.last() else {
        return next;
    };

    match position_in(view, state.active_index) {
        None => next.active_index = Some(last.index),
        Some(0) => {
            next.active_index = Some(last.index);
            if state.round > 1 {
                next.round = state.round - 1;
            }
        }
        Some(position) => next.active_index = Some(view[position - 1].index),
    }
    next
}

/// Start the encounter over from the roster.
pub fn reset(block: &InitiativeBlock) -> InitiativeState {
    default_state(block)
}

/// Subtract `amount` from one creature, floored at 0. Non-positive amounts and
/// unknown creatures leave the state unchanged.
pub fn apply_damage(
    state: &InitiativeState,
    index: usize,
    label: &str,
    amount: i32,
) -> InitiativeState {
    let mut next = state.clone();
    if amount <= 0 {
        return next;
    }
    if let Some(current) = next.hp.get_mut(&index).and_then(|hp| hp.get_mut(label)) {
        *current = current.saturating_sub(amount).max(0);
    }
    next
}

/// Add `amount` to one creature, capped at `max_hp`. Non-positive amounts and
/// unknown creatures leave the state unchanged.
pub fn apply_heal(
    state: &InitiativeState,
    index: usize,
    label: &str,
    amount: i32,
    max_hp: i32,
) -> InitiativeState {
    let mut next = state.clone();
    if amount <= 0 {
        return next;
    }
    if let Some(current) = next.hp.get_mut(&index).and_then(|hp| hp.get_mut(label)) {
        *current = current.saturating_add(amount).min(max_hp).max(0);
    }
    next
}

/// Store a rolled initiative. Input that does not parse as an integer counts as 0.
pub fn set_initiative(state: &InitiativeState, index: usize, input: &str) -> InitiativeState {
    let value = input.trim().parse::<i32>().unwrap_or(0);
    set_initiative_value(state, index, value)
}

pub fn set_initiative_value(state: &InitiativeState, index: usize, value: i32) -> InitiativeState {
    let mut next = state.clone();
    next.initiatives.insert(index, value);
    next
}

/// Everything the initiative view can ask for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitiativeAction {
    /// Raw text from the initiative input box.
    SetInitiative { index: usize, input: String },
    Damage {
        index: usize,
        label: String,
        amount: i32,
    },
    Heal {
        index: usize,
        label: String,
        amount: i32,
    },
    Next,
    Previous,
    Reset,
}

impl InitiativeAction {
    /// Resolves the action against the roster and returns the replacement state.
    pub fn apply(&self, block: &InitiativeBlock, state: &InitiativeState) -> InitiativeState {
        match self {
            Self::SetInitiative { index, input } => set_initiative(state, *index, input),
            Self::Damage {
                index,
                label,
                amount,
            } => apply_damage(state, *index, label, *amount),
            Self::Heal {
                index,
                label,
                amount,
            } => {
                let Some(item) = block.items.get(*index) else {
                    return state.clone();
                };
                apply_heal(state, *index, label, *amount, max_hp(item, Some(label)))
            }
            Self::Next => advance(state, &sorted_view(&block.items, &state.initiatives)),
            Self::Previous => retreat(state, &sorted_view(&block.items, &state.initiatives)),
            Self::Reset => reset(block),
        }
    }
}
