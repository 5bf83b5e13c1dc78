//! Reset events (short rest, long rest, dawn, ...) and which widgets they reset.

/// One `{event, amount}` entry: restore `amount` uses when `event` happens.
/// Without an amount the event is a full reset.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetRule {
    pub event: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub amount: Option<u32>,
}

/// The `reset_on` field of a block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ResetOn {
    /// `reset_on: long-rest`
    Event(String),
    /// `reset_on: [short-rest, long-rest]`
    Events(Vec<String>),
    /// `reset_on: [{event: short-rest, amount: 1}]`
    Partial(Vec<ResetRule>),
}

/// Whether `event` resets a widget configured with `reset_on`.
pub fn should_reset_on_event(reset_on: Option<&ResetOn>, event: &str) -> bool {
    match reset_on {
        None => false,
        Some(ResetOn::Event(name)) => name == event,
        Some(ResetOn::Events(names)) => names.iter().any(|name| name == event),
        Some(ResetOn::Partial(rules)) => rules.iter().any(|rule| rule.event == event),
    }
}

/// How much `event` restores: `None` means a full reset.
pub fn reset_amount(reset_on: Option<&ResetOn>, event: &str) -> Option<u32> {
    match reset_on {
        Some(ResetOn::Partial(rules)) => rules
            .iter()
            .find(|rule| rule.event == event)
            .and_then(|rule| rule.amount),
        _ => None,
    }
}
