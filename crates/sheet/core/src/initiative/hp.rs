//! HP shape resolution: single creature vs. named group.

use crate::config::SheetConfig;

use super::types::{HpShape, InitiativeItem};

/// Whether a set of creature labels describes a group.
///
/// More than one label is always a group; a single label is a group unless it
/// is the single-creature sentinel `"main"`.
pub fn is_group_labels<'a, I>(labels: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut labels = labels.into_iter();
    match (labels.next(), labels.next()) {
        (None, _) => false,
        (Some(only), None) => only != SheetConfig::MAIN_HP_LABEL,
        (Some(_), Some(_)) => true,
    }
}

impl HpShape {
    /// A bare number is never a group.
    pub fn is_group(&self) -> bool {
        match self {
            Self::Single(_) => false,
            Self::Group(labels) => is_group_labels(labels.keys().map(String::as_str)),
        }
    }

    /// `(label, max_hp)` pairs; a single creature uses the `"main"` label.
    pub fn labels(&self) -> Vec<(&str, i32)> {
        match self {
            Self::Single(max) => vec![(SheetConfig::MAIN_HP_LABEL, *max)],
            Self::Group(labels) => labels
                .iter()
                .map(|(label, max)| (label.as_str(), *max))
                .collect(),
        }
    }
}

/// Maximum HP for `label` on `item`.
///
/// A bare number answers for any label. A group answers for a known label, or
/// for no/unknown label when it has exactly one entry; otherwise 0.
pub fn max_hp(item: &InitiativeItem, label: Option<&str>) -> i32 {
    match &item.hp {
        HpShape::Single(max) => *max,
        HpShape::Group(labels) => {
            if let Some(max) = label.and_then(|label| labels.get(label)) {
                return *max;
            }
            match labels.len() {
                1 => labels.values().next().copied().unwrap_or(0),
                _ => 0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn group(pairs: &[(&str, i32)]) -> HpShape {
        HpShape::Group(
            pairs
                .iter()
                .map(|(label, hp)| (label.to_string(), *hp))
                .collect::<IndexMap<_, _>>(),
        )
    }

    fn item(hp: HpShape) -> InitiativeItem {
        InitiativeItem {
            name: "Ogre".into(),
            link: None,
            ac: 11,
            hp,
        }
    }

    #[test]
    fn main_only_is_not_a_group() {
        assert!(!group(&[("main", 10)]).is_group());
        assert!(group(&[("main", 10), ("goblin-2", 8)]).is_group());
        assert!(group(&[("Ogre", 15)]).is_group());
        assert!(!HpShape::Single(10).is_group());
        assert!(!group(&[]).is_group());
    }

    #[test]
    fn single_hp_ignores_label() {
        let ogre = item(HpShape::Single(12));
        assert_eq!(max_hp(&ogre, None), 12);
        assert_eq!(max_hp(&ogre, Some("main")), 12);
        assert_eq!(max_hp(&ogre, Some("anything")), 12);
    }

    #[test]
    fn group_hp_resolves_by_label() {
        let goblins = item(group(&[("G1", 7), ("G2", 9)]));
        assert_eq!(max_hp(&goblins, Some("G2")), 9);
        assert_eq!(max_hp(&goblins, Some("G3")), 0);
        assert_eq!(max_hp(&goblins, None), 0);

        let lone = item(group(&[("Ogre", 15)]));
        assert_eq!(max_hp(&lone, None), 15);
        assert_eq!(max_hp(&lone, Some("other")), 15);
    }
}
