use sheet_content::{BlockParser, StatsParser};
use sheet_core::StatValue;

use super::{StaticView, ViewContext, render_text};
use crate::html::{stat_card, stat_grid};

/// Free-form stat cards. Text runs through the template engine first.
pub struct StatsView;

impl StaticView for StatsView {
    fn codeblock(&self) -> &'static str {
        StatsParser::CODEBLOCK
    }

    fn render(&self, source: &str, context: &ViewContext<'_>) -> String {
        let block = StatsParser::parse(source);
        let cards: Vec<String> = block
            .items
            .iter()
            .map(|item| {
                let value = match &item.value {
                    StatValue::Text(text) => render_text(text, context),
                    number => number.to_string(),
                };
                let sublabel = item
                    .sublabel
                    .as_deref()
                    .map(|sublabel| render_text(sublabel, context));
                stat_card(
                    &render_text(&item.label, context),
                    &value,
                    sublabel.as_deref(),
                )
            })
            .collect();
        stat_grid(block.columns(), &cards)
    }
}
