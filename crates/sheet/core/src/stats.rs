//! Free-form stat cards (AC, speed, passive perception, ...).

use std::fmt;

/// A stat value is either a number or text (text may contain template tags).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", crate::template::format_number(*n)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatItem {
    pub label: String,
    pub value: StatValue,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sublabel: Option<String>,
}

/// Parsed `stats` block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatsBlock {
    pub items: Vec<StatItem>,
    pub columns: Option<u32>,
}

impl StatsBlock {
    /// Grid width: explicit `grid.columns`, else one column per item.
    pub fn columns(&self) -> u32 {
        self.columns
            .filter(|columns| *columns > 0)
            .unwrap_or(self.items.len().max(1) as u32)
    }
}
