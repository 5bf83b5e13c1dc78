//! One parser per fenced-block language.
//!
//! Parsers never fail: malformed YAML or wrongly typed fields fall back to the
//! block's documented defaults. Required fields that have no safe default
//! (`state_key`) are left as `None` for the renderer to reject.

pub mod ability;
pub mod badges;
pub mod consumables;
pub mod health;
pub mod initiative;
pub mod saving_throws;
pub mod skills;
pub mod stats;

pub use ability::AbilityParser;
pub use badges::BadgesParser;
pub use consumables::ConsumablesParser;
pub use health::HealthParser;
pub use initiative::InitiativeParser;
pub use saving_throws::SavingThrowsParser;
pub use skills::SkillsParser;
pub use stats::StatsParser;

use serde_yaml_ng::Value as Yaml;

use crate::yaml::parse_lenient;

/// Turns the body of one fenced block into its static definition.
pub trait BlockParser {
    /// Language tag of the fenced block, e.g. `healthpoints`.
    const CODEBLOCK: &'static str;

    type Block;

    /// Builds the block from already-parsed YAML.
    fn from_yaml(doc: &Yaml) -> Self::Block;

    fn parse(source: &str) -> Self::Block {
        Self::from_yaml(&parse_lenient(Self::CODEBLOCK, source))
    }
}
