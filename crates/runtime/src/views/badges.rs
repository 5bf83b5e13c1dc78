use sheet_content::{BadgesParser, BlockParser};

use super::{StaticView, ViewContext, render_text};
use crate::html::escape;

/// A row of label/value pills. Both parts may use templates.
pub struct BadgesView;

impl StaticView for BadgesView {
    fn codeblock(&self) -> &'static str {
        BadgesParser::CODEBLOCK
    }

    fn render(&self, source: &str, context: &ViewContext<'_>) -> String {
        let block = BadgesParser::parse(source);
        let mut html = String::from(r#"<div class="badges-row">"#);
        for item in &block.items {
            html.push_str(r#"<div class="badge-item">"#);
            if let Some(label) = &item.label {
                html.push_str(&format!(
                    r#"<span class="badge-label">{}</span>"#,
                    escape(&render_text(label, context))
                ));
            }
            html.push_str(&format!(
                r#"<span class="badge-value">{}</span></div>"#,
                escape(&render_text(&item.value, context))
            ));
        }
        html.push_str("</div>");
        html
    }
}
