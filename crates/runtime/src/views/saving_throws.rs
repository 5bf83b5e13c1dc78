use sheet_content::{BlockParser, SavingThrowsParser};
use sheet_core::SheetConfig;

use super::{StaticView, ViewContext};
use crate::html::{stat_card, stat_grid};

/// Three-column grid of saves, scores read from the note's ability block.
pub struct SavingThrowsView;

impl StaticView for SavingThrowsView {
    fn codeblock(&self) -> &'static str {
        SavingThrowsParser::CODEBLOCK
    }

    fn render(&self, source: &str, context: &ViewContext<'_>) -> String {
        let block = SavingThrowsParser::parse(source);
        let cards: Vec<String> = context
            .document
            .saving_throws(&block)
            .iter()
            .map(|save| {
                stat_card(
                    &save.label(),
                    &save.formatted(),
                    save.proficient.then_some("Proficient"),
                )
            })
            .collect();
        stat_grid(SheetConfig::SAVING_THROW_COLUMNS, &cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_content::Document;
    use sheet_core::TemplateEngine;

    const NOTE: &str = "---\nproficiency_bonus: 3\n---\n```ability\nabilities:\n  wisdom: 14\n```\n";

    #[test]
    fn renders_six_saves_with_proficiency() {
        let document = Document::parse(NOTE);
        let template = document.template_context();
        let engine = TemplateEngine::with_default_helpers();
        let context = ViewContext {
            document: &document,
            template: &template,
            engine: &engine,
        };

        let html = SavingThrowsView.render("proficient: [wisdom]", &context);
        assert_eq!(html.matches("generic-card-label").count(), 6);
        assert!(html.contains(
            r#"<p class="generic-card-label">Wisdom Save</p><p class="generic-card-value">+5</p><p class="generic-card-sublabel">Proficient</p>"#
        ));
        assert!(html.contains(
            r#"<p class="generic-card-label">Strength Save</p><p class="generic-card-value">-5</p></div>"#
        ));
        assert!(html.contains("repeat(3,"));
    }
}
