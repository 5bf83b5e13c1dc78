use std::collections::BTreeMap;

use indexmap::IndexMap;

/// Maximum HP of a roster entry.
///
/// Authors write either a bare number (one creature) or a mapping from
/// creature label to max HP (a group of creatures tracked individually).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum HpShape {
    Single(i32),
    Group(IndexMap<String, i32>),
}

impl Default for HpShape {
    fn default() -> Self {
        Self::Single(0)
    }
}

/// One combatant (or group of identical combatants) in the roster.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeItem {
    pub name: String,
    /// Display-only link target (usually a note about the creature).
    #[cfg_attr(feature = "serde", serde(default))]
    pub link: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ac: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: HpShape,
}

/// Parsed `initiative` block: the static roster.
///
/// Items are addressed by their position in `items` for the whole session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeBlock {
    pub state_key: Option<String>,
    pub items: Vec<InitiativeItem>,
}

/// Mutable tracker state persisted under the block's state key.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct InitiativeState {
    /// Roster index whose turn it is; `None` before the tracker has started.
    #[cfg_attr(feature = "serde", serde(with = "active_index"))]
    pub active_index: Option<usize>,
    /// Rolled initiative per roster index.
    pub initiatives: BTreeMap<usize, i32>,
    /// Current HP per roster index, per creature label.
    pub hp: BTreeMap<usize, BTreeMap<String, i32>>,
    /// Combat round, starting at 1.
    pub round: u32,
}

impl Default for InitiativeState {
    fn default() -> Self {
        Self {
            active_index: None,
            initiatives: BTreeMap::new(),
            hp: BTreeMap::new(),
            round: 1,
        }
    }
}

impl InitiativeState {
    pub fn initiative(&self, index: usize) -> i32 {
        self.initiatives.get(&index).copied().unwrap_or(0)
    }

    pub fn current_hp(&self, index: usize, label: &str) -> Option<i32> {
        self.hp.get(&index)?.get(label).copied()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_index == Some(index)
    }
}

/// One row of the turn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortedEntry<'a> {
    pub item: &'a InitiativeItem,
    /// Position of `item` in the roster.
    pub index: usize,
    pub initiative: i32,
}

/// `activeIndex` is persisted as a signed integer where `-1` means "none".
#[cfg(feature = "serde")]
mod active_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(index) => serializer.serialize_i64(*index as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).ok())
    }
}
