//! Small HTML building blocks shared by widgets and views.
//!
//! Output is plain strings the host inserts into the note. Class names match
//! the plugin stylesheet (`generic-card`, `stat-grid`, `hit-dice-box`, ...).

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Grid wrapper used by every card view.
pub fn stat_grid(columns: u32, cards: &[String]) -> String {
    let mut html = String::with_capacity(64 + cards.iter().map(String::len).sum::<usize>());
    html.push_str(&format!(
        r#"<div class="stat-grid" style="grid-template-columns: repeat({columns}, minmax(0, 1fr))">"#
    ));
    for card in cards {
        html.push_str(card);
    }
    html.push_str("</div>");
    html
}

/// A labelled value card with an optional sublabel.
pub fn stat_card(label: &str, value: &str, sublabel: Option<&str>) -> String {
    let mut html = String::new();
    html.push_str(r#"<div class="generic-card">"#);
    html.push_str(&format!(
        r#"<p class="generic-card-label">{}</p>"#,
        escape(label)
    ));
    html.push_str(&format!(
        r#"<p class="generic-card-value">{}</p>"#,
        escape(value)
    ));
    if let Some(sublabel) = sublabel {
        html.push_str(&format!(
            r#"<p class="generic-card-sublabel">{}</p>"#,
            escape(sublabel)
        ));
    }
    html.push_str("</div>");
    html
}

/// A checkbox drawn as a box, the way hit dice and consumable uses are shown.
///
/// `action` is the data attribute hosts read to route the click back.
pub fn checkbox(id: &str, checked: bool, action: &str, index: u32) -> String {
    format!(
        r#"<div class="hit-dice-wrapper"><input type="checkbox" class="hit-dice-checkbox" id="{id}" data-action="{action}" data-index="{index}"{checked}/><label for="{id}" class="hit-dice-box"></label></div>"#,
        id = escape(id),
        checked = if checked { " checked" } else { "" },
    )
}

/// Inline error shown in place of a block that could not render.
pub fn error_fragment(message: &str) -> String {
    format!(r#"<div class="sheet-error">{}</div>"#, escape(message))
}

/// Split `[[target|Label]]` into its target and display text.
pub fn wiki_link(link: &str) -> Option<(&str, &str)> {
    let inner = link.trim().strip_prefix("[[")?.strip_suffix("]]")?;
    Some(match inner.split_once('|') {
        Some((target, label)) => (target, label),
        None => (inner, inner),
    })
}
