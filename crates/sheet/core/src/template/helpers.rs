//! Built-in template helpers.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason,
    ScopedJson,
};
use serde_json::{Number, Value as Json};

use crate::abilities::calculate_modifier;

/// Signature shared by every helper: positional arguments in, one value out.
///
/// The error is a message; the engine reports it as a render failure.
pub type HelperFn = fn(&str, &[Json]) -> Result<Json, String>;

/// `(name, helper)` pairs registered by [`TemplateEngine::with_default_helpers`].
///
/// [`TemplateEngine::with_default_helpers`]: super::TemplateEngine::with_default_helpers
pub const DEFAULT_HELPERS: &[(&str, HelperFn)] = &[
    ("add", add),
    ("subtract", subtract),
    ("multiply", multiply),
    ("divide", divide),
    ("floor", floor),
    ("ceil", ceil),
    ("round", round),
    ("modifier", modifier),
    ("strip-link", strip_link),
];

/// Adapts a [`HelperFn`] to handlebars. Returning a value from `call_inner`
/// lets the helper appear in subexpressions: `{{add 10 (modifier x)}}`.
pub(crate) struct FnHelper {
    name: String,
    apply: HelperFn,
}

impl FnHelper {
    pub(crate) fn new(name: impl Into<String>, apply: HelperFn) -> Self {
        Self {
            name: name.into(),
            apply,
        }
    }
}

impl HelperDef for FnHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let args: Vec<Json> = h.params().iter().map(|param| param.value().clone()).collect();
        (self.apply)(&self.name, &args)
            .map(ScopedJson::Derived)
            .map_err(|message| RenderErrorReason::Other(message).into())
    }
}

/// Numeric reading of a template value. Strings are parsed after trimming and
/// an empty string reads as 0. Null, arrays and objects have no numeric
/// reading.
pub fn as_number(value: &Json) -> Option<f64> {
    match value {
        Json::Number(n) => n.as_f64(),
        Json::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Json::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
        }
        Json::Null | Json::Array(_) | Json::Object(_) => None,
    }
}

/// Template value for a helper result. Integral values become integers so
/// they print as `5`, not `5.0`.
pub fn number_value(n: f64) -> Json {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        Json::from(n as i64)
    } else {
        Number::from_f64(n)
            .map(Json::Number)
            .unwrap_or_else(|| Json::String(format_number(n)))
    }
}

/// Renders a number the way sheets show it: integral values without a
/// fractional part (`5`, not `5.0`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n < 0.0 { "-" } else { "" };
        format!("{sign}Infinity")
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        // -0.0 prints as 0
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn number(helper: &str, args: &[Json], position: usize) -> Result<f64, String> {
    args.get(position)
        .and_then(as_number)
        .ok_or_else(|| format!("helper `{helper}` expects a number at argument {position}"))
}

/// Sum of every numeric argument; anything else is skipped.
fn add(_: &str, args: &[Json]) -> Result<Json, String> {
    Ok(number_value(args.iter().filter_map(as_number).sum()))
}

fn subtract(name: &str, args: &[Json]) -> Result<Json, String> {
    Ok(number_value(number(name, args, 0)? - number(name, args, 1)?))
}

fn multiply(name: &str, args: &[Json]) -> Result<Json, String> {
    Ok(number_value(number(name, args, 0)? * number(name, args, 1)?))
}

fn divide(name: &str, args: &[Json]) -> Result<Json, String> {
    Ok(number_value(number(name, args, 0)? / number(name, args, 1)?))
}

fn floor(name: &str, args: &[Json]) -> Result<Json, String> {
    Ok(number_value(number(name, args, 0)?.floor()))
}

fn ceil(name: &str, args: &[Json]) -> Result<Json, String> {
    Ok(number_value(number(name, args, 0)?.ceil()))
}

/// Halves round toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
fn round(name: &str, args: &[Json]) -> Result<Json, String> {
    Ok(number_value((number(name, args, 0)? + 0.5).floor()))
}

fn modifier(name: &str, args: &[Json]) -> Result<Json, String> {
    let score = number(name, args, 0)?.floor() as i32;
    Ok(Json::from(calculate_modifier(score)))
}

fn strip_link(name: &str, args: &[Json]) -> Result<Json, String> {
    let text = args
        .first()
        .and_then(Json::as_str)
        .ok_or_else(|| format!("helper `{name}` expects text at argument 0"))?;
    Ok(Json::String(strip_links(text)))
}

/// Replaces every aliased wiki link `[[target|Label]]` with `Label`.
/// Links without an alias are left alone.
pub fn strip_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("[[") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match aliased_link(after_open) {
            Some((label, consumed)) => {
                out.push_str(label);
                rest = &after_open[consumed..];
            }
            None => {
                out.push('[');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parses `target|Label]]` at the start of `s`, returning the label and the
/// number of bytes consumed.
fn aliased_link(s: &str) -> Option<(&str, usize)> {
    let pipe = s.find('|')?;
    let target = &s[..pipe];
    if target.is_empty() {
        return None;
    }
    let tail = &s[pipe + 1..];
    let close = tail.find(']')?;
    let label = &tail[..close];
    if label.is_empty() || !tail[close..].starts_with("]]") {
        return None;
    }
    Some((label, pipe + 1 + close + 2))
}
