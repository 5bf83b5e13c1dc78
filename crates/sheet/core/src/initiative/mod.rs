//! Initiative tracker: turn order, rounds, and per-creature HP for an encounter.
//!
//! The roster ([`InitiativeBlock`]) is static and authored; everything that
//! changes during play lives in [`InitiativeState`] and is replaced wholesale by
//! [`InitiativeAction::apply`].
mod engine;
mod hp;
mod types;

pub use engine::{
    InitiativeAction, advance, apply_damage, apply_heal, default_state, reset, retreat,
    set_initiative, set_initiative_value, sorted_view,
};
pub use hp::{is_group_labels, max_hp};
pub use types::{HpShape, InitiativeBlock, InitiativeItem, InitiativeState, SortedEntry};

impl InitiativeBlock {
    pub fn default_state(&self) -> InitiativeState {
        default_state(self)
    }

    /// Turn order for `state`.
    pub fn sorted<'a>(&'a self, state: &InitiativeState) -> Vec<SortedEntry<'a>> {
        sorted_view(&self.items, &state.initiatives)
    }
}
