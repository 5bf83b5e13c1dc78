//! `initiative` tracker: turn order, rounds, and per-creature HP.

use sheet_content::{BlockParser, InitiativeParser};
use sheet_core::{InitiativeAction, InitiativeBlock, InitiativeState, SortedEntry};

use crate::html::{escape, wiki_link};
use crate::widget::Widget;

pub struct InitiativeWidget;

impl Widget for InitiativeWidget {
    const CODEBLOCK: &'static str = InitiativeParser::CODEBLOCK;

    type Block = InitiativeBlock;
    type State = InitiativeState;
    type Action = InitiativeAction;

    fn parse(&self, source: &str) -> Vec<InitiativeBlock> {
        vec![InitiativeParser::parse(source)]
    }

    fn state_key<'a>(&self, block: &'a InitiativeBlock) -> Option<&'a str> {
        block.state_key.as_deref()
    }

    fn default_state(&self, block: &InitiativeBlock) -> InitiativeState {
        block.default_state()
    }

    fn present(&self, block: &InitiativeBlock, state: &InitiativeState) -> String {
        let mut html = String::with_capacity(2048);
        html.push_str(r#"<div class="initiative-tracker generic-card">"#);

        html.push_str(r#"<div class="initiative-header">"#);
        html.push_str(&format!(
            r#"<p class="initiative-round">Round {}</p>"#,
            state.round
        ));
        html.push_str(r#"<div class="initiative-controls">"#);
        html.push_str(r#"<button type="button" class="initiative-button" data-action="previous">Previous</button>"#);
        html.push_str(r#"<button type="button" class="initiative-button" data-action="next">Next</button>"#);
        html.push_str(r#"<button type="button" class="initiative-button" data-action="reset">Reset</button>"#);
        html.push_str("</div></div>");

        html.push_str(r#"<table class="initiative-table">"#);
        html.push_str("<thead><tr><th>Init</th><th>Name</th><th>AC</th><th>HP</th></tr></thead>");
        html.push_str("<tbody>");
        for entry in block.sorted(state) {
            html.push_str(&row(&entry, state));
        }
        html.push_str("</tbody></table>");

        html.push_str("</div>");
        html
    }

    fn apply(
        &self,
        block: &InitiativeBlock,
        state: &InitiativeState,
        action: &InitiativeAction,
    ) -> InitiativeState {
        action.apply(block, state)
    }
}

fn row(entry: &SortedEntry<'_>, state: &InitiativeState) -> String {
    let index = entry.index;
    let item = entry.item;
    let class = if state.is_active(index) {
        "initiative-row active"
    } else {
        "initiative-row"
    };

    let mut html = String::new();
    html.push_str(&format!(r#"<tr class="{class}" data-index="{index}">"#));
    html.push_str(&format!(
        r#"<td><input type="number" class="initiative-input" data-action="initiative" value="{}"/></td>"#,
        entry.initiative
    ));
    html.push_str(&format!("<td>{}</td>", name(&item.name, item.link.as_deref())));
    html.push_str(&format!(r#"<td class="initiative-ac">{}</td>"#, item.ac));

    html.push_str(r#"<td class="initiative-hp">"#);
    let group = item.hp.is_group();
    for (label, max) in item.hp.labels() {
        let current = state.current_hp(index, label).unwrap_or(max);
        html.push_str(&format!(
            r#"<span class="initiative-creature" data-label="{}">"#,
            escape(label)
        ));
        if group {
            html.push_str(&format!(
                r#"<span class="initiative-creature-label">{}</span> "#,
                escape(label)
            ));
        }
        html.push_str(&format!("{current} / {max}</span>"));
    }
    html.push_str("</td></tr>");
    html
}

/// Creature name, linked to its note when the roster gives a `[[link]]`.
fn name(name: &str, link: Option<&str>) -> String {
    match link.and_then(wiki_link) {
        Some((target, _)) => format!(
            r#"<a class="internal-link" data-href="{}">{}</a>"#,
            escape(target),
            escape(name)
        ),
        None => escape(name),
    }
}
