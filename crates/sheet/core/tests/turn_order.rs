//! Encounter-level checks for the initiative tracker.
//!
//! These drive the tracker only through the public API, the way the runtime
//! widget does: build a roster, derive the default state, then feed actions.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use sheet_core::initiative::{
    advance, apply_damage, apply_heal, default_state, is_group_labels, max_hp, retreat,
    sorted_view,
};
use sheet_core::{HpShape, InitiativeAction, InitiativeBlock, InitiativeItem, InitiativeState};

fn aria_and_goblins() -> InitiativeBlock {
    InitiativeBlock {
        state_key: Some("encounter-1".into()),
        items: vec![
            InitiativeItem {
                name: "Aria".into(),
                link: None,
                ac: 16,
                hp: HpShape::Single(10),
            },
            InitiativeItem {
                name: "Goblins".into(),
                link: None,
                ac: 13,
                hp: HpShape::Group(IndexMap::from([
                    ("G1".to_string(), 7),
                    ("G2".to_string(), 7),
                ])),
            },
        ],
    }
}

fn five_goblins() -> InitiativeBlock {
    InitiativeBlock {
        state_key: Some("ambush".into()),
        items: (0..5)
            .map(|i| InitiativeItem {
                name: format!("Goblin {i}"),
                link: None,
                ac: 13,
                hp: HpShape::Single(7),
            })
            .collect(),
    }
}

fn with_rolls(block: &InitiativeBlock, rolls: &[i32]) -> InitiativeState {
    let mut state = default_state(block);
    for (index, roll) in rolls.iter().enumerate() {
        state = InitiativeAction::SetInitiative {
            index,
            input: roll.to_string(),
        }
        .apply(block, &state);
    }
    state
}

// ================================================================
// Turn order
// ================================================================

#[test]
fn test_tied_initiative_keeps_roster_order_and_counts_rounds() {
    let block = aria_and_goblins();
    let state = with_rolls(&block, &[15, 15]);

    let order: Vec<&str> = block
        .sorted(&state)
        .iter()
        .map(|entry| entry.item.name.as_str())
        .collect();
    assert_eq!(order, ["Aria", "Goblins"]);

    let state = InitiativeAction::Next.apply(&block, &state);
    assert_eq!((state.active_index, state.round), (Some(0), 1));

    let state = InitiativeAction::Next.apply(&block, &state);
    assert_eq!((state.active_index, state.round), (Some(1), 1));

    let state = InitiativeAction::Next.apply(&block, &state);
    assert_eq!((state.active_index, state.round), (Some(0), 2));
}

#[test]
fn test_sorted_view_is_a_stable_descending_permutation() {
    let block = five_goblins();
    let cases: &[&[i32]] = &[
        &[0, 0, 0, 0, 0],
        &[1, 2, 3, 4, 5],
        &[5, 4, 3, 2, 1],
        &[10, 3, 10, -2, 3],
        &[7],
    ];

    for rolls in cases {
        let initiatives: BTreeMap<usize, i32> = rolls.iter().copied().enumerate().collect();
        let view = sorted_view(&block.items, &initiatives);

        let mut indices: Vec<usize> = view.iter().map(|entry| entry.index).collect();
        for pair in view.windows(2) {
            assert!(pair[0].initiative >= pair[1].initiative, "rolls {rolls:?}");
            if pair[0].initiative == pair[1].initiative {
                assert!(pair[0].index < pair[1].index, "rolls {rolls:?}");
            }
        }
        indices.sort_unstable();
        assert_eq!(indices, (0..block.items.len()).collect::<Vec<_>>());
    }
}

#[test]
fn test_advance_then_retreat_round_trips_inside_a_round() {
    let block = five_goblins();
    let mut state = with_rolls(&block, &[12, 18, 5, 9, 14]);
    state.round = 3;
    let view = block.sorted(&state);

    for position in 0..view.len() - 1 {
        let here = InitiativeState {
            active_index: Some(view[position].index),
            ..state.clone()
        };
        let there = retreat(&advance(&here, &view), &view);
        assert_eq!(there.active_index, here.active_index);
        assert_eq!(there.round, here.round);

        let next = InitiativeState {
            active_index: Some(view[position + 1].index),
            ..state.clone()
        };
        let back = advance(&retreat(&next, &view), &view);
        assert_eq!(back.active_index, next.active_index);
        assert_eq!(back.round, next.round);
    }
}

#[test]
fn test_wraparound_boundaries_change_the_round() {
    let block = five_goblins();
    let mut state = with_rolls(&block, &[12, 18, 5, 9, 14]);
    state.round = 3;
    let view = block.sorted(&state);
    let first = view[0].index;
    let last = view[view.len() - 1].index;

    // Forward past the last combatant.
    let at_last = InitiativeState {
        active_index: Some(last),
        ..state.clone()
    };
    let wrapped = advance(&at_last, &view);
    assert_eq!((wrapped.active_index, wrapped.round), (Some(first), 4));
    let unwrapped = retreat(&wrapped, &view);
    assert_eq!((unwrapped.active_index, unwrapped.round), (Some(last), 3));

    // Backward past the first combatant.
    let at_first = InitiativeState {
        active_index: Some(first),
        ..state.clone()
    };
    let wrapped = retreat(&at_first, &view);
    assert_eq!((wrapped.active_index, wrapped.round), (Some(last), 2));
    let unwrapped = advance(&wrapped, &view);
    assert_eq!((unwrapped.active_index, unwrapped.round), (Some(first), 3));
}

#[test]
fn test_round_never_drops_below_one() {
    let block = aria_and_goblins();
    let mut state = with_rolls(&block, &[3, 20]);

    for _ in 0..25 {
        state = InitiativeAction::Previous.apply(&block, &state);
        assert!(state.round >= 1);
    }
    assert_eq!(state.round, 1);
    assert!(state.active_index.is_some());
}

#[test]
fn test_edited_roll_reorders_next_advance() {
    let block = aria_and_goblins();
    let state = with_rolls(&block, &[15, 10]);
    let state = InitiativeAction::Next.apply(&block, &state);
    assert_eq!(state.active_index, Some(0));

    // Goblins now outrank Aria, so Aria is last and the next advance wraps.
    let state = InitiativeAction::SetInitiative {
        index: 1,
        input: "20".into(),
    }
    .apply(&block, &state);
    let state = InitiativeAction::Next.apply(&block, &state);
    assert_eq!((state.active_index, state.round), (Some(1), 2));
}

// ================================================================
// Hit points
// ================================================================

#[test]
fn test_group_damage_is_clamped_per_creature() {
    let block = aria_and_goblins();
    let state = default_state(&block);

    let state = apply_damage(&state, 1, "G1", 10);
    assert_eq!(state.current_hp(1, "G1"), Some(0));
    assert_eq!(state.current_hp(1, "G2"), Some(7));
    assert_eq!(state.current_hp(0, "main"), Some(10));
}

#[test]
fn test_damage_then_heal_restores_hp_unless_clamped() {
    let block = aria_and_goblins();
    let start = default_state(&block);
    let aria = &block.items[0];

    let hurt = apply_damage(&start, 0, "main", 4);
    let healed = apply_heal(&hurt, 0, "main", 4, max_hp(aria, Some("main")));
    assert_eq!(healed.current_hp(0, "main"), start.current_hp(0, "main"));

    // Clamped at 0: 10 damage on 7 HP only removes 7.
    let goblins = &block.items[1];
    let floored = apply_damage(&start, 1, "G2", 10);
    let healed = apply_heal(&floored, 1, "G2", 10, max_hp(goblins, Some("G2")));
    assert_eq!(healed.current_hp(1, "G2"), Some(7));
    let partial = apply_heal(&floored, 1, "G2", 3, max_hp(goblins, Some("G2")));
    assert_eq!(partial.current_hp(1, "G2"), Some(3));

    // Clamped at max: healing at full HP changes nothing.
    let topped = apply_heal(&start, 0, "main", 5, max_hp(aria, None));
    assert_eq!(topped.current_hp(0, "main"), Some(10));
}

#[test]
fn test_group_detection() {
    assert!(!is_group_labels(["main"]));
    assert!(is_group_labels(["main", "goblin-2"]));
    assert!(is_group_labels(["Ogre"]));
    assert!(!HpShape::Single(12).is_group());
}

#[test]
fn test_single_hp_max_ignores_label() {
    let item = InitiativeItem {
        name: "Bandit".into(),
        link: None,
        ac: 12,
        hp: HpShape::Single(12),
    };
    for label in [None, Some("main"), Some("G1"), Some("")] {
        assert_eq!(max_hp(&item, label), 12);
    }
}

#[test]
fn test_reset_clears_the_encounter() {
    let block = aria_and_goblins();
    let mut state = with_rolls(&block, &[15, 12]);
    state = InitiativeAction::Damage {
        index: 1,
        label: "G2".into(),
        amount: 5,
    }
    .apply(&block, &state);
    for _ in 0..5 {
        state = InitiativeAction::Next.apply(&block, &state);
    }
    assert_eq!(state.round, 3);

    let state = InitiativeAction::Reset.apply(&block, &state);
    assert_eq!(state.active_index, None);
    assert_eq!(state.round, 1);
    assert_eq!(state.initiative(0), 0);
    assert_eq!(state.current_hp(1, "G2"), Some(7));
}
