//! Block parsers and document scanning for character-sheet notes.
//!
//! This crate turns authored text into `sheet-core` types:
//! - fenced-block YAML into static blocks (one parser per block language)
//! - a whole note into frontmatter plus its fenced blocks
//! - cross-block lookups (saving throws reading an ability block by id)
//! - the template context a note's templates render against
//!
//! Parsing is lenient throughout. Content never fails to load; it degrades to
//! documented defaults and logs what it skipped.

pub mod document;
pub mod parsers;
pub mod yaml;

pub use document::{CodeBlock, Document};
pub use parsers::{
    AbilityParser, BadgesParser, BlockParser, ConsumablesParser, HealthParser, InitiativeParser,
    SavingThrowsParser, SkillsParser, StatsParser,
};
pub use yaml::{LoadResult, parse_lenient, parse_yaml, to_template_value};
