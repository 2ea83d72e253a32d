//! Placeholder substitution for display templates.
//!
//! Templates carry named placeholders of the form `{{.Name}}`. Values come
//! from an ordered list of parameter maps of which only the first one is
//! consulted; a placeholder the first map does not satisfy renders as
//! [`NO_VALUE`]. Substitution never fails.

use serde_json::Value;

/// Marker rendered for a placeholder without a value.
pub const NO_VALUE: &str = "<no value>";

/// Parameter values keyed by placeholder name.
pub type ParamMap = serde_json::Map<String, Value>;

/// Build a [`ParamMap`] from `"Name" => value` pairs.
///
/// ```
/// use clidisplay::params;
///
/// let map = params! { "AppName" => "dora", "Instances" => 3 };
/// assert_eq!(map["AppName"], "dora");
/// assert_eq!(map["Instances"], 3);
/// ```
#[macro_export]
macro_rules! params {
    () => { $crate::ParamMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::ParamMap::new();
        $( map.insert(::std::string::String::from($key), $crate::Value::from($value)); )+
        map
    }};
}

/// One parsed piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Split a template into literal text and placeholder names.
///
/// Anything between braces that is not `.Identifier` stays literal, as does
/// an unclosed `{{`.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };

        let inner = after_open[..close].trim();
        let end = open + 2 + close + 2;
        match placeholder_name(inner) {
            Some(name) => {
                if open > 0 {
                    out.push(Segment::Literal(&rest[..open]));
                }
                out.push(Segment::Placeholder(name));
            }
            None => out.push(Segment::Literal(&rest[..end])),
        }
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        out.push(Segment::Literal(rest));
    }
    out
}

fn placeholder_name(inner: &str) -> Option<&str> {
    let name = inner.strip_prefix('.')?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_');
    valid.then_some(name)
}

/// Render a parameter value for display.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => NO_VALUE.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Substitute placeholders using only the first of `maps`.
///
/// # Example
///
/// ```
/// use clidisplay::{params, substitute};
///
/// let first = params! { "Name" => "first" };
/// let second = params! { "Name" => "second", "Other" => "ignored" };
/// assert_eq!(
///     substitute("{{.Name}} and {{.Other}}", &[first, second]),
///     "first and <no value>"
/// );
/// ```
pub fn substitute(template: &str, maps: &[ParamMap]) -> String {
    substitute_with(template, maps, |value| value.to_string())
}

/// Substitute placeholders, passing every found value through `decorate`.
///
/// The [`NO_VALUE`] marker is emitted as-is and never decorated.
pub fn substitute_with(
    template: &str,
    maps: &[ParamMap],
    decorate: impl Fn(&str) -> String,
) -> String {
    let params = maps.first();
    let mut out = String::with_capacity(template.len());

    for segment in segments(template) {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => match params.and_then(|p| p.get(name)) {
                Some(Value::Null) | None => out.push_str(NO_VALUE),
                Some(value) => out.push_str(&decorate(&display_value(value))),
            },
        }
    }
    out
}

/// Names referenced by `template` that the first of `maps` does not provide.
pub fn missing_placeholders<'a>(template: &'a str, maps: &[ParamMap]) -> Vec<&'a str> {
    let params = maps.first();
    segments(template)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(name)
                if !params.is_some_and(|p| p.get(name).is_some_and(|v| !v.is_null())) =>
            {
                Some(name)
            }
            _ => None,
        })
        .collect()
}
