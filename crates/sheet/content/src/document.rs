//! Whole-document scanning: frontmatter, fenced blocks, and the lookups that
//! let one block read another (saving throws reading ability scores, templates
//! reading everything).

use serde_yaml_ng::Value as Yaml;
use sheet_core::{
    AbilityBlock, AbilityScores, SavingThrow, SavingThrowsBlock, SkillsBlock, TemplateContext,
};
use tracing::debug;

use crate::parsers::saving_throws::abilities;
use crate::parsers::{AbilityParser, BlockParser, SkillsParser};
use crate::yaml::{int_field, parse_lenient, seq_field, to_template_value};

const FENCE: &str = "```";
const FRONTMATTER_FENCE: &str = "---";

/// One fenced code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag after the opening fence; empty when absent.
    pub language: String,
    /// Block body without the fences.
    pub source: String,
    /// Zero-based line of the opening fence.
    pub line: usize,
}

/// A parsed source document.
#[derive(Clone, Debug)]
pub struct Document {
    frontmatter: Yaml,
    blocks: Vec<CodeBlock>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let (frontmatter, body_start) = split_frontmatter(&lines);
        let blocks = scan_blocks(&lines, body_start);
        debug!(blocks = blocks.len(), "scanned document");
        Self {
            frontmatter,
            blocks,
        }
    }

    /// Frontmatter mapping, or `Null` when the document has none.
    pub fn frontmatter(&self) -> &Yaml {
        &self.frontmatter
    }

    pub fn code_blocks(&self) -> &[CodeBlock] {
        &self.blocks
    }

    pub fn blocks_of<'a>(&'a self, language: &'a str) -> impl Iterator<Item = &'a CodeBlock> {
        self.blocks
            .iter()
            .filter(move |block| block.language == language)
    }

    /// The first `ability` block, which the template context and saving throws
    /// fall back to.
    pub fn first_ability_block(&self) -> Option<AbilityBlock> {
        self.blocks_of(AbilityParser::CODEBLOCK)
            .next()
            .map(|block| AbilityParser::parse(&block.source))
    }

    /// The `ability` block whose `id` is `id`, with unset scores read as 10.
    pub fn find_ability_block_by_id(&self, id: &str) -> Option<AbilityBlock> {
        self.blocks_of(AbilityParser::CODEBLOCK).find_map(|block| {
            let doc = parse_lenient(AbilityParser::CODEBLOCK, &block.source);
            match doc.get("id").and_then(Yaml::as_str) {
                Some(found) if found == id => AbilityParser::referenced(&doc),
                _ => None,
            }
        })
    }

    pub fn first_skills_block(&self) -> Option<SkillsBlock> {
        self.blocks_of(SkillsParser::CODEBLOCK)
            .next()
            .map(|block| SkillsParser::parse(&block.source))
    }

    /// Context for rendering templates anywhere in this document.
    pub fn template_context(&self) -> TemplateContext {
        let abilities = self
            .first_ability_block()
            .map(|block| block.total_scores())
            .unwrap_or_default();
        let frontmatter = match &self.frontmatter {
            Yaml::Null => TemplateContext::default().frontmatter,
            other => to_template_value(other),
        };
        TemplateContext::new(
            frontmatter,
            abilities,
            self.first_skills_block().unwrap_or_default(),
        )
    }

    /// Frontmatter `proficiencyBonus` (or `proficiency_bonus`), if set.
    pub fn proficiency_bonus(&self) -> Option<i32> {
        int_field(&self.frontmatter, "proficiencyBonus")
            .or_else(|| int_field(&self.frontmatter, "proficiency_bonus"))
    }

    /// Computes the six saves for a `savingthrows` block in this document.
    ///
    /// Scores come from the ability block named by `abilityBlock`, else the
    /// first ability block, else zeros. Frontmatter `proficiencyBonus` (or
    /// `proficiency_bonus`) and `proficiencies` override the block's own.
    pub fn saving_throws(&self, block: &SavingThrowsBlock) -> Vec<SavingThrow> {
        let source = block
            .ability_block_id
            .as_deref()
            .and_then(|id| self.find_ability_block_by_id(id))
            .or_else(|| self.first_ability_block());

        let mut block = block.clone();
        if let Some(bonus) = self.proficiency_bonus() {
            block.proficiency_bonus = bonus;
        }
        if self.frontmatter.get("proficiencies").is_some() {
            block.proficiencies = abilities(seq_field(&self.frontmatter, "proficiencies"));
        }

        match source {
            Some(source) => {
                block.saving_throws(&source.total_scores(), |ability| {
                    source.saving_throw_bonus(ability)
                })
            }
            None => block.saving_throws(&AbilityScores::default(), |_| 0),
        }
    }
}

/// Splits a leading `---` fenced YAML header off the document.
fn split_frontmatter(lines: &[&str]) -> (Yaml, usize) {
    if lines.first().map(|line| line.trim_end()) != Some(FRONTMATTER_FENCE) {
        return (Yaml::Null, 0);
    }
    let Some(close) = lines
        .iter()
        .skip(1)
        .position(|line| matches!(line.trim_end(), FRONTMATTER_FENCE | "..."))
    else {
        return (Yaml::Null, 0);
    };

    let close = close + 1;
    let source = lines[1..close].join("\n");
    let frontmatter = match parse_lenient("frontmatter", &source) {
        mapping @ Yaml::Mapping(_) => mapping,
        _ => Yaml::Null,
    };
    (frontmatter, close + 1)
}

/// Collects fenced blocks from `start` on. An unclosed fence runs to the end
/// of the document.
fn scan_blocks(lines: &[&str], start: usize) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut index = start;

    while index < lines.len() {
        let Some(info) = lines[index].trim_start().strip_prefix(FENCE) else {
            index += 1;
            continue;
        };

        let language = info
            .trim_start_matches('`')
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        let open = index;
        let body_start = index + 1;
        let body_end = lines[body_start..]
            .iter()
            .position(|line| is_closing_fence(line))
            .map_or(lines.len(), |offset| body_start + offset);

        blocks.push(CodeBlock {
            language,
            source: lines[body_start.min(lines.len())..body_end].join("\n"),
            line: open,
        });
        index = body_end + 1;
    }

    blocks
}

fn is_closing_fence(line: &str) -> bool {
    let line = line.trim();
    line.len() >= FENCE.len() && line.chars().all(|c| c == '`')
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_core::Ability;

    const SHEET: &str = r#"---
proficiency_bonus: 3
class: "[[wizard-phb|Wizard]]"
---
# Aria

```ability
id: aria
abilities:
  strength: 8
  intelligence: 17
bonuses:
  - name: Headband
    target: intelligence
    value: 2
  - name: Ring
    target: wisdom
    value: 1
    modifies: saving_throw
```

Some prose.

```savingthrows
proficient: [intelligence, wisdom]
```

```skills
proficiencies: [Arcana]
```
"#;

    #[test]
    fn splits_frontmatter_and_blocks() {
        let doc = Document::parse(SHEET);
        assert_eq!(doc.proficiency_bonus(), Some(3));

        let languages: Vec<&str> = doc
            .code_blocks()
            .iter()
            .map(|block| block.language.as_str())
            .collect();
        assert_eq!(languages, ["ability", "savingthrows", "skills"]);
        assert_eq!(doc.code_blocks()[0].line, 6);
        assert!(doc.code_blocks()[1].source.starts_with("proficient"));
    }

    #[test]
    fn document_without_frontmatter() {
        let doc = Document::parse("```stats\nitems: []\n```");
        assert_eq!(doc.frontmatter(), &Yaml::Null);
        assert_eq!(doc.proficiency_bonus(), None);
        assert_eq!(doc.code_blocks().len(), 1);
        assert_eq!(doc.code_blocks()[0].source, "items: []");
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let doc = Document::parse("text\n```initiative\nstate_key: x\n");
        assert_eq!(doc.code_blocks().len(), 1);
        assert_eq!(doc.code_blocks()[0].source, "state_key: x");
    }

    #[test]
    fn finds_ability_block_by_id() {
        let doc = Document::parse(SHEET);
        let block = doc.find_ability_block_by_id("aria").unwrap();
        assert_eq!(block.abilities.intelligence, 17);
        assert_eq!(block.abilities.dexterity, 10);
        assert!(doc.find_ability_block_by_id("nobody").is_none());
    }

    #[test]
    fn template_context_uses_totals() {
        let context = Document::parse(SHEET).template_context();
        assert_eq!(context.abilities.intelligence, 19);
        assert_eq!(context.abilities.dexterity, 0);
        assert_eq!(context.skills.proficiencies, ["arcana"]);
    }

    #[test]
    fn saving_throws_apply_frontmatter_and_bonuses() {
        let doc = Document::parse(SHEET);
        let block = crate::parsers::SavingThrowsParser::parse(&doc.code_blocks()[1].source);
        let saves = doc.saving_throws(&block);

        let int = saves
            .iter()
            .find(|save| save.ability == Ability::Intelligence)
            .unwrap();
        // Falls back to the first ability block: INT 19 -> +4, proficient +3.
        assert_eq!(int.value, 7);
        assert!(int.proficient);

        let wis = saves.iter().find(|save| save.ability == Ability::Wisdom).unwrap();
        // Zero-score lookup: WIS 0 -> -5, proficient +3, ring +1.
        assert_eq!(wis.value, -1);
    }
}
