use sheet_content::{AbilityParser, BlockParser};
use sheet_core::{Ability, SheetConfig, calculate_modifier, format_modifier};

use super::{StaticView, ViewContext};
use crate::html::stat_grid;

/// Six ability cards: abbreviation, total score, modifier.
pub struct AbilityView;

impl StaticView for AbilityView {
    fn codeblock(&self) -> &'static str {
        AbilityParser::CODEBLOCK
    }

    fn render(&self, source: &str, _context: &ViewContext<'_>) -> String {
        let block = AbilityParser::parse(source);
        let cards: Vec<String> = Ability::all()
            .map(|ability| {
                let total = block.total_score(ability);
                format!(
                    r#"<div class="ability-score-card"><div class="ability-header"><p class="ability-name">{}</p><p class="ability-value">{}</p></div><p class="ability-modifier">{}</p></div>"#,
                    ability.abbreviation(),
                    total,
                    format_modifier(calculate_modifier(total))
                )
            })
            .collect();
        stat_grid(SheetConfig::ABILITY_COLUMNS, &cards)
    }
}
