//! Block registry and document rendering.
//!
//! [`Plugin`] owns the store, the template engine, one controller per
//! stateful block kind, and the static views. Hosts hand it a note's text and
//! get one [`RenderedBlock`] per fenced block it recognises.
use std::sync::Arc;

use indexmap::IndexMap;
use sheet_content::{BlockParser, ConsumablesParser, Document};
use sheet_core::TemplateEngine;
use sheet_core::template::format_number;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::{Result, RuntimeError};
use crate::config::{PluginConfig, Settings};
use crate::html::error_fragment;
use crate::store::KeyValueStore;
use crate::views::{
    AbilityView, BadgesView, SavingThrowsView, SkillsView, StaticView, StatsView, ViewContext,
};
use crate::widget::{InstanceId, Widget, WidgetController, WidgetHandle};
use crate::widgets::{ConsumableWidget, HealthWidget, InitiativeWidget, label_width_em};

/// A live widget mounted from a rendered document.
#[derive(Clone, Debug)]
pub enum MountedWidget {
    Health(WidgetHandle<HealthWidget>),
    Consumable(WidgetHandle<ConsumableWidget>),
    Initiative(WidgetHandle<InitiativeWidget>),
}

impl MountedWidget {
    pub fn id(&self) -> InstanceId {
        match self {
            Self::Health(handle) => handle.id(),
            Self::Consumable(handle) => handle.id(),
            Self::Initiative(handle) => handle.id(),
        }
    }

    pub fn state_key(&self) -> &str {
        match self {
            Self::Health(handle) => handle.state_key(),
            Self::Consumable(handle) => handle.state_key(),
            Self::Initiative(handle) => handle.state_key(),
        }
    }

    pub fn rendered(&self) -> String {
        match self {
            Self::Health(handle) => handle.rendered(),
            Self::Consumable(handle) => handle.rendered(),
            Self::Initiative(handle) => handle.rendered(),
        }
    }

    /// Offer a reset event; returns `true` if the widget's state changed.
    pub async fn handle_event(&self, event: &str) -> bool {
        match self {
            Self::Health(handle) => handle.handle_event(event).await,
            Self::Consumable(handle) => handle.handle_event(event).await,
            Self::Initiative(handle) => handle.handle_event(event).await,
        }
    }
}

/// Output for one fenced block.
#[derive(Debug)]
pub struct RenderedBlock {
    pub language: String,
    /// Zero-based line of the opening fence.
    pub line: usize,
    /// HTML at render time. Live widgets repaint through their handles.
    pub html: String,
    pub widgets: Vec<MountedWidget>,
    /// Failures confined to this block; each is also shown inline in `html`.
    pub errors: Vec<RuntimeError>,
}

impl RenderedBlock {
    fn new(language: &str, line: usize) -> Self {
        Self {
            language: language.to_string(),
            line,
            html: String::new(),
            widgets: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn push_error(&mut self, err: RuntimeError) {
        warn!(
            codeblock = %self.language,
            line = self.line,
            error = %err,
            "block failed to render"
        );
        self.html.push_str(&error_fragment(&err.to_string()));
        self.errors.push(err);
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The character-sheet plugin.
pub struct Plugin {
    config: PluginConfig,
    settings: Settings,
    store: Arc<dyn KeyValueStore>,
    engine: TemplateEngine,
    health: WidgetController<HealthWidget>,
    consumables: WidgetController<ConsumableWidget>,
    initiative: WidgetController<InitiativeWidget>,
    views: Vec<Box<dyn StaticView>>,
    /// Live widgets by state key. Re-rendering a block replaces its entry, so
    /// reset events only reach the newest instance of each key.
    mounted: Mutex<IndexMap<String, MountedWidget>>,
}

impl Plugin {
    /// Create a new plugin builder.
    pub fn builder() -> PluginBuilder {
        PluginBuilder::new()
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the settings and save them.
    pub async fn update_settings(&mut self, settings: Settings) -> Result<()> {
        settings.save(self.store.as_ref()).await?;
        self.settings = settings;
        Ok(())
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// Every code block language this plugin renders, in registration order.
    pub fn codeblocks(&self) -> Vec<&'static str> {
        self.views
            .iter()
            .map(|view| view.codeblock())
            .chain([
                HealthWidget::CODEBLOCK,
                ConsumableWidget::CODEBLOCK,
                InitiativeWidget::CODEBLOCK,
            ])
            .collect()
    }

    pub fn handles(&self, language: &str) -> bool {
        self.codeblocks()
            .iter()
            .any(|codeblock| *codeblock == language)
    }

    /// Render every recognised fenced block in `text`.
    ///
    /// Blocks render independently: a failing block carries its own error
    /// fragment and never affects the others. Unrecognised languages are
    /// skipped.
    pub async fn render_document(&self, text: &str) -> Vec<RenderedBlock> {
        let document = Document::parse(text);
        let template = document.template_context();
        let context = ViewContext {
            document: &document,
            template: &template,
            engine: &self.engine,
        };

        let mut rendered = Vec::new();
        for block in document.code_blocks() {
            if !self.handles(&block.language) {
                continue;
            }
            let mut output = RenderedBlock::new(&block.language, block.line);
            self.render_into(&mut output, &block.source, &context).await;
            rendered.push(output);
        }

        debug!(blocks = rendered.len(), "rendered document");
        rendered
    }

    /// Render a single block's `source` as part of `document`.
    pub async fn render_block(
        &self,
        language: &str,
        source: &str,
        document: &Document,
    ) -> Result<RenderedBlock> {
        if !self.handles(language) {
            return Err(RuntimeError::UnknownCodeblock(language.to_string()));
        }

        let template = document.template_context();
        let context = ViewContext {
            document,
            template: &template,
            engine: &self.engine,
        };
        let mut output = RenderedBlock::new(language, 0);
        self.render_into(&mut output, source, &context).await;
        Ok(output)
    }

    /// Apply a reset event (e.g. `long-rest`) to every mounted widget.
    ///
    /// Returns how many widgets changed.
    pub async fn broadcast_event(&self, event: &str) -> usize {
        let mounted = self.mounted().await;
        let mut changed = 0;
        for widget in &mounted {
            if widget.handle_event(event).await {
                changed += 1;
            }
        }
        debug!(event, changed, "broadcast reset event");
        changed
    }

    /// The newest instance of every mounted state key, in mount order.
    pub async fn mounted(&self) -> Vec<MountedWidget> {
        self.mounted.lock().await.values().cloned().collect()
    }

    /// Forget every mounted widget, e.g. when the host closes the note.
    pub async fn unmount_all(&self) {
        self.mounted.lock().await.clear();
    }

    async fn render_into(
        &self,
        output: &mut RenderedBlock,
        source: &str,
        context: &ViewContext<'_>,
    ) {
        if let Some(view) = self
            .views
            .iter()
            .find(|view| view.codeblock() == output.language)
        {
            output.html = view.render(source, context);
            return;
        }

        let language = output.language.clone();
        if language == HealthWidget::CODEBLOCK {
            self.mount_all(output, &self.health, source, MountedWidget::Health)
                .await;
        } else if language == ConsumableWidget::CODEBLOCK {
            let longest = ConsumablesParser::parse(source).max_label_len();
            let width = (label_width_em(longest) * 100.0).round() / 100.0;

            output.html.push_str(&format!(
                r#"<div class="consumables-column" style="--consumable-label-width: {}em">"#,
                format_number(width)
            ));
            self.mount_all(output, &self.consumables, source, MountedWidget::Consumable)
                .await;
            output.html.push_str("</div>");
        } else if language == InitiativeWidget::CODEBLOCK {
            self.mount_all(output, &self.initiative, source, MountedWidget::Initiative)
                .await;
        } else {
            output.push_error(RuntimeError::UnknownCodeblock(language));
        }
    }

    async fn mount_all<W: Widget>(
        &self,
        output: &mut RenderedBlock,
        controller: &WidgetController<W>,
        source: &str,
        wrap: fn(WidgetHandle<W>) -> MountedWidget,
    ) {
        for result in controller.render(source).await {
            match result {
                Ok(handle) => {
                    output.html.push_str(&handle.rendered());
                    let widget = wrap(handle);
                    let superseded = self
                        .mounted
                        .lock()
                        .await
                        .insert(widget.state_key().to_string(), widget.clone());
                    if let Some(old) = superseded {
                        debug!(
                            key = widget.state_key(),
                            old = %old.id(),
                            new = %widget.id(),
                            "replaced mounted widget"
                        );
                    }
                    output.widgets.push(widget);
                }
                Err(err) => output.push_error(err),
            }
        }
    }
}

/// Builder for [`Plugin`].
pub struct PluginBuilder {
    config: Option<PluginConfig>,
    store: Option<Arc<dyn KeyValueStore>>,
    engine: Option<TemplateEngine>,
}

impl PluginBuilder {
    fn new() -> Self {
        Self {
            config: None,
            store: None,
            engine: None,
        }
    }

    /// Override configuration (defaults to [`PluginConfig::from_env`]).
    pub fn config(mut self, config: PluginConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `store` instead of the one the configuration describes.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use `engine` instead of one with the default helpers.
    pub fn engine(mut self, engine: TemplateEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Open the store and load settings.
    pub async fn build(self) -> Result<Plugin> {
        let config = self.config.unwrap_or_else(PluginConfig::from_env);
        let store = match self.store {
            Some(store) => store,
            None => config.open_store().await?,
        };
        let settings = Settings::load(store.as_ref()).await;
        let engine = self
            .engine
            .unwrap_or_else(TemplateEngine::with_default_helpers);

        let views: Vec<Box<dyn StaticView>> = vec![
            Box::new(StatsView),
            Box::new(AbilityView),
            Box::new(SkillsView),
            Box::new(SavingThrowsView),
            Box::new(BadgesView),
        ];

        Ok(Plugin {
            health: WidgetController::new(HealthWidget, Arc::clone(&store)),
            consumables: WidgetController::new(ConsumableWidget, Arc::clone(&store)),
            initiative: WidgetController::new(InitiativeWidget, Arc::clone(&store)),
            config,
            settings,
            store,
            engine,
            views,
            mounted: Mutex::new(IndexMap::new()),
        })
    }
}
