use std::sync::Arc;

use tracing::debug;

use super::{Widget, WidgetHandle};
use crate::api::{Result, RuntimeError};
use crate::store::KeyValueStore;

/// Mounts instances of one widget kind against a shared store.
pub struct WidgetController<W: Widget> {
    widget: Arc<W>,
    store: Arc<dyn KeyValueStore>,
}

impl<W: Widget> Clone for WidgetController<W> {
    fn clone(&self) -> Self {
        Self {
            widget: Arc::clone(&self.widget),
            store: Arc::clone(&self.store),
        }
    }
}

impl<W: Widget> WidgetController<W> {
    pub fn new(widget: W, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            widget: Arc::new(widget),
            store,
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Create an instance for `block` without touching the store.
    ///
    /// `index` is the block's position in its fenced block, reported when a
    /// per-item widget is missing its state key.
    pub fn attach(&self, block: W::Block, index: usize) -> Result<WidgetHandle<W>> {
        let key = self
            .widget
            .state_key(&block)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or(RuntimeError::MissingStateKey {
                codeblock: W::CODEBLOCK,
                index: W::PER_ITEM.then_some(index),
            })?;

        Ok(WidgetHandle::new(
            Arc::clone(&self.widget),
            Arc::clone(&self.store),
            block,
            key,
        ))
    }

    /// Attach an instance and run its initial load.
    pub async fn mount(&self, block: W::Block, index: usize) -> Result<WidgetHandle<W>> {
        let handle = self.attach(block, index)?;
        handle.load().await;
        Ok(handle)
    }

    /// Mount every instance declared in `source`.
    ///
    /// Each instance succeeds or fails on its own; one item without a state
    /// key does not stop its siblings from rendering.
    pub async fn render(&self, source: &str) -> Vec<Result<WidgetHandle<W>>> {
        let blocks = self.widget.parse(source);
        debug!(widget = W::CODEBLOCK, instances = blocks.len(), "parsed block");

        let mut handles = Vec::with_capacity(blocks.len());
        for (index, block) in blocks.into_iter().enumerate() {
            handles.push(self.mount(block, index).await);
        }
        handles
    }
}
