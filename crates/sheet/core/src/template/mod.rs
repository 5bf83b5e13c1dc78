//! Handlebars templates for computed sheet text.
//!
//! `{{abilities.strength}}` reads a value from the [`TemplateContext`];
//! `{{add abilities.strength frontmatter.proficiency_bonus}}` calls a helper,
//! and helpers nest as subexpressions:
//! `{{add 10 (modifier abilities.dexterity)}}`. Helpers are registered on an
//! explicit [`TemplateEngine`] instance when it is constructed.
mod helpers;

use std::fmt;

use handlebars::{Handlebars, RenderError};
use serde_json::{Map, Value as Json, json};
use thiserror::Error;

use crate::abilities::{Ability, AbilityScores};
use crate::error::{ErrorSeverity, SheetError};
use crate::skills::SkillsBlock;

pub use helpers::{
    DEFAULT_HELPERS, HelperFn, as_number, format_number, number_value, strip_links,
};

/// Errors raised while rendering a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Malformed syntax, an unknown helper, or a helper rejecting its arguments.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl SheetError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Render(_) => "TEMPLATE_RENDER",
        }
    }
}

/// Values a template can reference.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateContext {
    /// Document frontmatter, usually an object.
    pub frontmatter: Json,
    /// Ability totals (score bonuses applied).
    pub abilities: AbilityScores,
    pub skills: SkillsBlock,
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self {
            frontmatter: Json::Object(Map::new()),
            abilities: AbilityScores::default(),
            skills: SkillsBlock::default(),
        }
    }
}

impl TemplateContext {
    pub fn new(frontmatter: Json, abilities: AbilityScores, skills: SkillsBlock) -> Self {
        Self {
            frontmatter,
            abilities,
            skills,
        }
    }

    /// Root value with `frontmatter`, `abilities` and `skills` keys.
    pub fn to_json(&self) -> Json {
        let abilities: Map<String, Json> = Ability::all()
            .map(|ability| (ability.to_string(), Json::from(self.abilities.get(ability))))
            .collect();

        let bonuses: Vec<Json> = self
            .skills
            .bonuses
            .iter()
            .map(|bonus| {
                json!({
                    "name": bonus.name,
                    "target": bonus.target,
                    "value": bonus.value,
                })
            })
            .collect();

        json!({
            "frontmatter": self.frontmatter,
            "abilities": abilities,
            "skills": {
                "proficiencies": self.skills.proficiencies,
                "expertise": self.skills.expertise,
                "half_proficiencies": self.skills.half_proficiencies,
                "bonuses": bonuses,
            },
        })
    }
}

/// True iff `text` contains both an opening `{{` and a closing `}}`.
pub fn has_template_variables(text: &str) -> bool {
    text.contains("{{") && text.contains("}}")
}

/// Template renderer owning its own handlebars registry.
///
/// Output is not HTML-escaped; presentation escapes whatever it embeds.
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateEngine").finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Engine with only the handlebars built-ins (`if`, `each`, ...).
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }

    /// Engine with the math and text helpers sheets use.
    pub fn with_default_helpers() -> Self {
        let mut engine = Self::new();
        for (name, helper) in DEFAULT_HELPERS {
            engine.register_helper(name, *helper);
        }
        engine
    }

    pub fn register_helper(&mut self, name: &str, helper: HelperFn) {
        self.registry
            .register_helper(name, Box::new(helpers::FnHelper::new(name, helper)));
    }

    /// Renders `text`, falling back to `text` itself when rendering fails.
    ///
    /// Callers that want to log the failure should use [`render`](Self::render).
    pub fn process(&self, text: &str, context: &TemplateContext) -> String {
        self.render(text, context)
            .unwrap_or_else(|_| text.to_string())
    }

    pub fn render(&self, text: &str, context: &TemplateContext) -> Result<String, TemplateError> {
        if !has_template_variables(text) {
            return Ok(text.to_string());
        }
        self.render_json(text, &context.to_json())
    }

    /// Renders `text` against an arbitrary root value.
    pub fn render_json(&self, text: &str, root: &Json) -> Result<String, TemplateError> {
        Ok(self.registry.render_template(text, root)?)
    }
}
