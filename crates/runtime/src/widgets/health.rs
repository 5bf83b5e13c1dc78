//! `healthpoints` tracker: current and temporary HP plus hit dice.

use sheet_content::{BlockParser, HealthParser};
use sheet_core::{HealthAction, HealthBlock, HealthState};

use crate::html::{checkbox, escape};
use crate::widget::Widget;

pub struct HealthWidget;

impl Widget for HealthWidget {
    const CODEBLOCK: &'static str = HealthParser::CODEBLOCK;

    type Block = HealthBlock;
    type State = HealthState;
    type Action = HealthAction;

    fn parse(&self, source: &str) -> Vec<HealthBlock> {
        vec![HealthParser::parse(source)]
    }

    fn state_key<'a>(&self, block: &'a HealthBlock) -> Option<&'a str> {
        block.state_key.as_deref()
    }

    fn default_state(&self, block: &HealthBlock) -> HealthState {
        block.default_state()
    }

    fn present(&self, block: &HealthBlock, state: &HealthState) -> String {
        let key = block.state_key.as_deref().unwrap_or_default();

        let mut html = String::with_capacity(1024);
        html.push_str(r#"<div class="health-card generic-card">"#);

        // Header
        html.push_str(r#"<div class="health-card-header">"#);
        html.push_str(r#"<div class="generic-card-label">Hit Points</div>"#);
        html.push_str(&format!(
            r#"<div class="health-value">{}<span class="health-max"> / {}</span>"#,
            state.current, block.health
        ));
        if state.temporary > 0 {
            html.push_str(&format!(
                r#"<span class="health-temp">+{} temp</span>"#,
                state.temporary
            ));
        }
        html.push_str("</div></div>");

        html.push_str(&format!(
            r#"<div class="health-progress-container"><div class="health-progress-bar" style="width: {}%"></div></div>"#,
            health_percentage(state.current, block.health)
        ));

        html.push_str(r#"<div class="health-controls">"#);
        html.push_str(
            r#"<input type="number" class="health-input" placeholder="0" aria-label="Health points"/>"#,
        );
        html.push_str(r#"<button type="button" class="health-button health-heal" data-action="heal">Heal</button>"#);
        html.push_str(r#"<button type="button" class="health-button health-damage" data-action="damage">Damage</button>"#);
        html.push_str(r#"<button type="button" class="health-button health-temp" data-action="temporary">Temp HP</button>"#);
        html.push_str("</div>");

        html.push_str(r#"<div class="health-divider"></div>"#);

        // Hit dice
        html.push_str(r#"<div class="hit-dice-container">"#);
        html.push_str(&format!(
            r#"<p class="hit-dice-label">Hit Dice ({})</p>"#,
            escape(&block.hitdice.dice)
        ));
        html.push_str(r#"<div class="hit-dice-boxes">"#);
        for index in 0..block.hitdice.value {
            html.push_str(&checkbox(
                &format!("{key}-hit-dice-{index}"),
                index < state.hitdice_used,
                "hit-die",
                index,
            ));
        }
        html.push_str("</div></div>");

        html.push_str("</div>");
        html
    }

    fn apply(
        &self,
        block: &HealthBlock,
        state: &HealthState,
        action: &HealthAction,
    ) -> HealthState {
        action.apply(block, state)
    }

    fn on_event(
        &self,
        block: &HealthBlock,
        state: &HealthState,
        event: &str,
    ) -> Option<HealthState> {
        Some(HealthAction::Event(event.to_string()).apply(block, state))
    }
}

/// Bar width in whole percent, clamped to `0..=100`.
fn health_percentage(current: i32, max: i32) -> i64 {
    if max <= 0 {
        return 0;
    }
    (i64::from(current) * 100 / i64::from(max)).clamp(0, 100)
}
