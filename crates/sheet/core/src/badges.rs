//! Compact label/value pills (level, AC, speed, ...).

/// One badge. A badge without a label shows only its value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BadgeItem {
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
    /// May contain template tags.
    pub value: String,
}

/// Parsed `badges` block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BadgesBlock {
    pub items: Vec<BadgeItem>,
}
