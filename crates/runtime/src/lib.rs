//! Runtime for the character-sheet widgets.
//!
//! This crate wires parsed blocks from `sheet-content` and rules from
//! `sheet-core` to a persistence store and HTML presentation. Hosts embed
//! [`Plugin`] to render a note's fenced blocks, then drive the returned
//! [`WidgetHandle`]s with user actions.
//!
//! Modules are organized by responsibility:
//! - [`plugin`] hosts the block registry and builder
//! - [`widget`] is the generic persisted-widget lifecycle
//! - [`widgets`] and [`views`] are the stateful and read-only block kinds
//! - [`store`] provides the key-value persistence contract and adapters
//! - [`config`] and [`logging`] cover host setup
pub mod api;
pub mod config;
pub mod html;
pub mod logging;
pub mod plugin;
pub mod store;
pub mod views;
pub mod widget;
pub mod widgets;

pub use api::{Result, RuntimeError};
pub use config::{PluginConfig, Settings};
pub use plugin::{MountedWidget, Plugin, PluginBuilder, RenderedBlock};
pub use store::{FileStore, InMemoryStore, KeyValueStore, StoreError};
pub use views::{
    AbilityView, BadgesView, SavingThrowsView, SkillsView, StaticView, StatsView, ViewContext,
};
pub use widget::{InstanceId, Widget, WidgetController, WidgetHandle};
pub use widgets::{ConsumableWidget, HealthWidget, InitiativeWidget};
