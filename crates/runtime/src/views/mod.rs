//! Read-only blocks: rendered from the note alone, nothing persisted.

mod abilities;
mod badges;
mod saving_throws;
mod skills;
mod stats;

pub use abilities::AbilityView;
pub use badges::BadgesView;
pub use saving_throws::SavingThrowsView;
pub use skills::SkillsView;
pub use stats::StatsView;

use sheet_content::Document;
use sheet_core::template::has_template_variables;
use sheet_core::{TemplateContext, TemplateEngine};
use tracing::warn;

/// Everything a static view may read besides its own block.
pub struct ViewContext<'a> {
    pub document: &'a Document,
    pub template: &'a TemplateContext,
    pub engine: &'a TemplateEngine,
}

/// A block that renders straight to HTML.
pub trait StaticView: Send + Sync {
    fn codeblock(&self) -> &'static str;

    fn render(&self, source: &str, context: &ViewContext<'_>) -> String;
}

/// Template output, or the original text when the template is malformed.
pub(crate) fn render_text(text: &str, context: &ViewContext<'_>) -> String {
    if !has_template_variables(text) {
        return text.to_string();
    }
    match context.engine.render(text, context.template) {
        Ok(rendered) => rendered,
        Err(err) => {
            warn!(template = text, error = %err, "template failed; showing source text");
            text.to_string()
        }
    }
}
