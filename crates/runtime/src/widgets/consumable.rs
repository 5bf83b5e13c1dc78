//! `consumable` rows: each list item is its own persisted instance.

use sheet_content::{BlockParser, ConsumablesParser};
use sheet_core::{ConsumableAction, ConsumableItem, ConsumableState};

use crate::html::{checkbox, escape};
use crate::widget::Widget;

/// Label column width in `em`, shared by every row of one block.
pub fn label_width_em(max_label_len: usize) -> f64 {
    (max_label_len as f64 * 0.55).max(3.0)
}

pub struct ConsumableWidget;

impl Widget for ConsumableWidget {
    const CODEBLOCK: &'static str = ConsumablesParser::CODEBLOCK;
    const PER_ITEM: bool = true;

    type Block = ConsumableItem;
    type State = ConsumableState;
    type Action = ConsumableAction;

    fn parse(&self, source: &str) -> Vec<ConsumableItem> {
        ConsumablesParser::parse(source).items
    }

    fn state_key<'a>(&self, item: &'a ConsumableItem) -> Option<&'a str> {
        item.state_key.as_deref()
    }

    fn default_state(&self, item: &ConsumableItem) -> ConsumableState {
        item.default_state()
    }

    fn present(&self, item: &ConsumableItem, state: &ConsumableState) -> String {
        let key = item.state_key.as_deref().unwrap_or_default();

        let mut html = String::with_capacity(256);
        html.push_str(r#"<div class="consumable-item">"#);
        html.push_str(&format!(
            r#"<p class="consumable-label">{}</p>"#,
            escape(&item.label)
        ));
        html.push_str(r#"<div class="consumable-boxes">"#);
        for index in 0..item.uses {
            html.push_str(&checkbox(
                &format!("{key}-{index}"),
                index < state.value,
                "toggle",
                index,
            ));
        }
        html.push_str("</div></div>");
        html
    }

    fn apply(
        &self,
        item: &ConsumableItem,
        state: &ConsumableState,
        action: &ConsumableAction,
    ) -> ConsumableState {
        action.apply(item, state)
    }

    fn on_event(
        &self,
        item: &ConsumableItem,
        state: &ConsumableState,
        event: &str,
    ) -> Option<ConsumableState> {
        Some(ConsumableAction::Event(event.to_string()).apply(item, state))
    }
}
