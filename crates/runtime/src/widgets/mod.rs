//! Stateful block kinds.

mod consumable;
mod health;
mod initiative;

pub use consumable::{ConsumableWidget, label_width_em};
pub use health::HealthWidget;
pub use initiative::InitiativeWidget;
