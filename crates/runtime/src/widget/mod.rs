//! Persisted widget lifecycle, written once for every stateful block kind.
//!
//! A [`Widget`] supplies the domain plug-ins (parse, default state, present,
//! apply). [`WidgetController`] turns a block's source into mounted
//! [`WidgetHandle`]s, and each handle owns one state key's load/save cycle:
//!
//! 1. parse the block; a block without a state key fails that one instance
//! 2. load the saved state; failures read as "nothing saved"
//! 3. if nothing was saved, persist the default before the first paint
//! 4. paint, then persist and repaint on every state change
//!
//! Store failures are logged and never reach the host. A change applied
//! before the initial load settles wins over whatever the load returns.

mod controller;
mod handle;

pub use controller::WidgetController;
pub use handle::{InstanceId, WidgetHandle};

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// One stateful block kind.
pub trait Widget: Send + Sync + 'static {
    /// Language tag of the fenced block this widget renders.
    const CODEBLOCK: &'static str;

    /// `true` when every list item in the block is its own widget instance.
    const PER_ITEM: bool = false;

    /// Static content authored in the note.
    type Block: Clone + Debug + Send + Sync + 'static;

    /// Mutable state persisted under the block's state key.
    type State: Serialize + DeserializeOwned + Clone + PartialEq + Debug + Send + Sync + 'static;

    /// User-visible mutations the presentation can request.
    type Action: Debug + Send + Sync;

    /// Parse a block's source into one entry per widget instance.
    fn parse(&self, source: &str) -> Vec<Self::Block>;

    fn state_key<'a>(&self, block: &'a Self::Block) -> Option<&'a str>;

    fn default_state(&self, block: &Self::Block) -> Self::State;

    /// Render `state` as an HTML fragment.
    fn present(&self, block: &Self::Block, state: &Self::State) -> String;

    /// Complete replacement state for `action`.
    fn apply(&self, block: &Self::Block, state: &Self::State, action: &Self::Action)
    -> Self::State;

    /// State after a named reset event, or `None` if the widget ignores it.
    fn on_event(
        &self,
        _block: &Self::Block,
        _state: &Self::State,
        _event: &str,
    ) -> Option<Self::State> {
        None
    }
}
