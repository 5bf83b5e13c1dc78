//! Limited-use resources rendered as a row of checkboxes (spell slots, potions,
//! channel divinity, ...). Each item persists independently.

use crate::events::{ResetOn, reset_amount, should_reset_on_event};
use crate::health::toggle_box;

/// One consumable row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableItem {
    pub label: String,
    pub state_key: Option<String>,
    /// Number of boxes.
    pub uses: u32,
    pub reset_on: Option<ResetOn>,
}

impl ConsumableItem {
    pub fn default_state(&self) -> ConsumableState {
        ConsumableState::default()
    }
}

/// Parsed `consumable` block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumablesBlock {
    pub items: Vec<ConsumableItem>,
}

impl ConsumablesBlock {
    /// Length of the longest label, used to align the rows.
    pub fn max_label_len(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Persisted consumable state: how many boxes are checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumableState {
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsumableAction {
    Toggle(u32),
    /// Reset event; acts only when the item's `reset_on` matches.
    Event(String),
}

impl ConsumableAction {
    pub fn apply(&self, item: &ConsumableItem, state: &ConsumableState) -> ConsumableState {
        match self {
            Self::Toggle(index) => ConsumableState {
                value: toggle_box(state.value, *index, item.uses),
            },
            Self::Event(event) if should_reset_on_event(item.reset_on.as_ref(), event) => {
                match reset_amount(item.reset_on.as_ref(), event) {
                    Some(amount) => ConsumableState {
                        value: state.value.saturating_sub(amount),
                    },
                    None => item.default_state(),
                }
            }
            Self::Event(_) => *state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ResetRule;

    fn item(reset_on: Option<ResetOn>) -> ConsumableItem {
        ConsumableItem {
            label: "Spell Slots".into(),
            state_key: Some("slots".into()),
            uses: 4,
            reset_on,
        }
    }

    #[test]
    fn toggling_checks_up_to_clicked_box() {
        let item = item(None);
        let state = ConsumableAction::Toggle(2).apply(&item, &ConsumableState::default());
        assert_eq!(state.value, 3);

        let state = ConsumableAction::Toggle(2).apply(&item, &state);
        assert_eq!(state.value, 2);

        let state = ConsumableAction::Toggle(9).apply(&item, &state);
        assert_eq!(state.value, 2);
    }

    #[test]
    fn partial_reset_restores_amount() {
        let item = item(Some(ResetOn::Partial(vec![ResetRule {
            event: "short-rest".into(),
            amount: Some(1),
        }])));
        let state = ConsumableState { value: 3 };

        let next = ConsumableAction::Event("short-rest".into()).apply(&item, &state);
        assert_eq!(next.value, 2);

        let next = ConsumableAction::Event("long-rest".into()).apply(&item, &state);
        assert_eq!(next.value, 3);
    }

    #[test]
    fn full_reset_clears_all_boxes() {
        let item = item(Some(ResetOn::Event("long-rest".into())));
        let next = ConsumableAction::Event("long-rest".into())
            .apply(&item, &ConsumableState { value: 4 });
        assert_eq!(next.value, 0);
    }

    #[test]
    fn measures_longest_label() {
        let block = ConsumablesBlock {
            items: vec![item(None), ConsumableItem::default()],
        };
        assert_eq!(block.max_label_len(), 11);
    }
}
