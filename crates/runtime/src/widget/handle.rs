//! One mounted widget instance and its persistence lifecycle.
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, watch};
use tracing::{debug, trace, warn};

use super::Widget;
use crate::api::{Result, RuntimeError};
use crate::store::KeyValueStore;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a mounted widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

impl InstanceId {
    fn next() -> Self {
        Self(NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// In-memory state of one instance.
///
/// `revision` counts state changes; a load that started at an older revision
/// is stale and must not replace the current state.
struct Slot<S> {
    state: Option<S>,
    revision: u64,
}

struct Shared<W: Widget> {
    id: InstanceId,
    widget: Arc<W>,
    store: Arc<dyn KeyValueStore>,
    block: W::Block,
    key: String,
    slot: Mutex<Slot<W::State>>,
    rendered: watch::Sender<String>,
}

/// Cloneable handle to a mounted widget.
///
/// Every clone drives the same instance. Hosts call [`dispatch`] for user
/// actions and watch [`subscribe`] for re-renders.
///
/// [`dispatch`]: WidgetHandle::dispatch
/// [`subscribe`]: WidgetHandle::subscribe
pub struct WidgetHandle<W: Widget> {
    shared: Arc<Shared<W>>,
}

impl<W: Widget> Clone for WidgetHandle<W> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<W: Widget> fmt::Debug for WidgetHandle<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetHandle")
            .field("codeblock", &W::CODEBLOCK)
            .field("id", &self.shared.id)
            .field("key", &self.shared.key)
            .finish()
    }
}

impl<W: Widget> WidgetHandle<W> {
    pub(crate) fn new(
        widget: Arc<W>,
        store: Arc<dyn KeyValueStore>,
        block: W::Block,
        key: String,
    ) -> Self {
        let (rendered, _) = watch::channel(String::new());
        Self {
            shared: Arc::new(Shared {
                id: InstanceId::next(),
                widget,
                store,
                block,
                key,
                slot: Mutex::new(Slot {
                    state: None,
                    revision: 0,
                }),
                rendered,
            }),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.shared.id
    }

    pub fn state_key(&self) -> &str {
        &self.shared.key
    }

    pub fn block(&self) -> &W::Block {
        &self.shared.block
    }

    /// Current state, or `None` before the first load or change.
    pub async fn state(&self) -> Option<W::State> {
        self.shared.slot.lock().await.state.clone()
    }

    /// Most recent paint; empty before the first one.
    pub fn rendered(&self) -> String {
        self.shared.rendered.borrow().clone()
    }

    /// Receive every repaint of this instance.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.shared.rendered.subscribe()
    }

    /// Load the saved state (or persist the default) and paint it.
    ///
    /// Never fails: unreadable or undecodable state falls back to the
    /// default. If the state changed while the store was being read, the
    /// read result is discarded and the newer state is kept.
    pub async fn load(&self) -> W::State {
        let shared = &self.shared;
        let started_at = shared.slot.lock().await.revision;

        let saved = self.fetch().await;

        let mut slot = shared.slot.lock().await;
        if slot.revision != started_at
            && let Some(current) = &slot.state
        {
            debug!(
                widget = W::CODEBLOCK,
                instance = %shared.id,
                key = %shared.key,
                "stale load discarded"
            );
            return current.clone();
        }

        let state = match saved {
            Some(state) => state,
            None => {
                let state = shared.widget.default_state(&shared.block);
                match self.persist(&state).await {
                    Ok(()) => debug!(
                        widget = W::CODEBLOCK,
                        key = %shared.key,
                        "default state persisted"
                    ),
                    Err(err) => warn!(
                        widget = W::CODEBLOCK,
                        key = %shared.key,
                        error = %err,
                        "failed to persist default state"
                    ),
                }
                state
            }
        };

        slot.state = Some(state.clone());
        self.paint(&state);
        state
    }

    /// Adopt `next`, persist it, and repaint.
    ///
    /// The new state is kept even when saving fails.
    pub async fn on_state_change(&self, next: W::State) {
        let mut slot = self.shared.slot.lock().await;
        self.commit(&mut slot, next).await;
    }

    /// Apply a user action to the current state.
    ///
    /// Actions that leave the state unchanged are not persisted.
    pub async fn dispatch(&self, action: W::Action) -> W::State {
        let widget = &self.shared.widget;
        let (state, changed) = self
            .update(|block, current| Some(widget.apply(block, current, &action)))
            .await;
        if !changed {
            trace!(widget = W::CODEBLOCK, ?action, "action left state unchanged");
        }
        state
    }

    /// Offer a reset event to this widget. Returns `true` if the state changed.
    pub async fn handle_event(&self, event: &str) -> bool {
        let widget = &self.shared.widget;
        let (_, changed) = self
            .update(|block, current| widget.on_event(block, current, event))
            .await;
        changed
    }

    /// Read, transition and commit under one slot lock, so concurrent
    /// actions on clones of this handle never lose an update.
    async fn update<F>(&self, transition: F) -> (W::State, bool)
    where
        F: FnOnce(&W::Block, &W::State) -> Option<W::State>,
    {
        let shared = &self.shared;
        let mut slot = shared.slot.lock().await;
        let current = match &slot.state {
            Some(state) => state.clone(),
            None => shared.widget.default_state(&shared.block),
        };

        match transition(&shared.block, &current) {
            Some(next) if next != current => {
                self.commit(&mut slot, next.clone()).await;
                (next, true)
            }
            _ => (current, false),
        }
    }

    async fn commit(&self, slot: &mut Slot<W::State>, next: W::State) {
        slot.revision += 1;
        slot.state = Some(next.clone());

        if let Err(err) = self.persist(&next).await {
            warn!(
                widget = W::CODEBLOCK,
                key = %self.shared.key,
                error = %err,
                "failed to save state"
            );
        }

        self.paint(&next);
    }

    /// Saved state, with load and decode failures logged and read as absent.
    async fn fetch(&self) -> Option<W::State> {
        let shared = &self.shared;
        match shared.store.get(&shared.key).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(state) => Some(state),
                Err(err) => {
                    warn!(
                        widget = W::CODEBLOCK,
                        key = %shared.key,
                        error = %err,
                        "saved state does not match this widget; using default"
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(
                    widget = W::CODEBLOCK,
                    key = %shared.key,
                    error = %err,
                    "failed to load state; using default"
                );
                None
            }
        }
    }

    async fn persist(&self, state: &W::State) -> Result<()> {
        let value = serde_json::to_value(state).map_err(RuntimeError::State)?;
        self.shared.store.set(&self.shared.key, value).await?;
        Ok(())
    }

    fn paint(&self, state: &W::State) {
        let html = self.shared.widget.present(&self.shared.block, state);
        self.shared.rendered.send_replace(html);
    }
}
