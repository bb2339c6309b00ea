//! Attribute parsing
//!
//! [XSL 1.1 § 5.9 Expressions](https://www.w3.org/TR/xsl11/)
//!
//! Turns the text of an FO attribute into a [`Value`] of the shape its
//! property accepts, and stores it on a [`PropertyList`]. Only literal
//! values are supported; expression arithmetic is out of scope.
//!
//! Unknown attribute names and units are not errors: they are reported once
//! through [`warn_once`] and skipped, like an unsupported feature would be.

use std::str::FromStr;

use folio_common::warning::warn_once;
use folio_dom::AttributesMap;

use crate::error::{ResolutionError, Result};
use crate::property::PropertyId;
use crate::property_list::PropertyList;
use crate::resolver::Resolver;
use crate::values::{Color, Component, Keyword, Length, Value};

const INHERIT: &str = "inherit";

/// Parse literal text without reference to any property.
///
/// Whitespace- or comma-separated text becomes a list. Returns `None` for
/// empty text, malformed colors and lengths with an unknown unit.
#[must_use]
pub fn parse_literal(text: &str) -> Option<Value> {
    let tokens = tokenize(text);
    match tokens.as_slice() {
        [] => None,
        [single] => parse_token(single),
        many => many
            .iter()
            .map(|token| parse_token(token))
            .collect::<Option<Vec<_>>>()
            .map(Value::list),
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    let mut quote = None;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => {
                if let Some(s) = start.take() {
                    tokens.push(&text[s..=i]);
                }
                quote = None;
            }
            (Some(_), _) => {}
            (None, '"' | '\'') => {
                if let Some(s) = start.take() {
                    tokens.push(&text[s..i]);
                }
                start = Some(i);
                quote = Some(c);
            }
            (None, c) if c.is_whitespace() || c == ',' => {
                if let Some(s) = start.take() {
                    tokens.push(&text[s..i]);
                }
            }
            (None, _) => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}

fn parse_token(token: &str) -> Option<Value> {
    if let Some(inner) = unquote(token) {
        return Some(Value::string(inner));
    }
    if token.starts_with('#') {
        return Color::from_hex(token).map(Value::color);
    }
    if starts_numeric(token) {
        return parse_number(token);
    }
    if let Ok(keyword) = Keyword::from_str(token) {
        return Some(Value::keyword(keyword));
    }
    if let Some(color) = Color::from_named(token) {
        return Some(Value::color(color));
    }
    Some(Value::string(token))
}

fn unquote(token: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|q| {
        token
            .strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}

fn starts_numeric(token: &str) -> bool {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    unsigned
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.')
        && unsigned.chars().any(|c| c.is_ascii_digit())
}

fn parse_number(token: &str) -> Option<Value> {
    let split = token
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '+' || *c == '-'))))
        .map_or(token.len(), |(i, _)| i);
    let (number, unit) = token.split_at(split);
    let number: f64 = number.parse().ok()?;
    if unit.is_empty() {
        return Some(Value::number(number));
    }
    let length = Length::from_unit(number, unit);
    if length.is_none() {
        let _ = warn_once("Parse", &format!("unsupported unit '{unit}' in '{token}'"));
    }
    length.map(Value::length)
}

/// Parse the text of attribute `id` on the node owning `list`.
///
/// `inherit` takes the parent's computed value (the initial value at the
/// root). Anything else is parsed literally and converted to the property's
/// accepted shape: names go through the enumerated table, then keyword
/// substitution (`thin` → `0.5pt`), and a scalar given to a compound
/// property fills the components it sets. The result remembers `text`.
///
/// # Errors
///
/// [`ResolutionError::InvalidValue`] if the text cannot be converted.
pub fn parse_specified(
    resolver: &Resolver<'_>,
    list: &PropertyList,
    id: PropertyId,
    text: &str,
) -> Result<Value> {
    let entry = resolver.registry().lookup(id)?;
    let trimmed = text.trim();
    let invalid = |reason: String| ResolutionError::InvalidValue {
        property: id,
        value: text.to_string(),
        reason,
    };

    if trimmed == INHERIT {
        let inherited = match list.parent() {
            Some(parent) => resolver.resolve(id, parent, true, true),
            None => resolver.resolve(id, list, false, true),
        }?;
        return Ok(inherited.with_specified(text));
    }

    let literal = parse_literal(trimmed).ok_or_else(|| invalid("unrecognized value".into()))?;
    let value = entry.convert(&literal).ok_or_else(|| {
        invalid(format!(
            "expected {}",
            entry
                .accepts()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or ")
        ))
    })?;
    if entry.percent_base().is_none() && has_percentage(&value) {
        return Err(invalid("percentages are not allowed".into()));
    }
    Ok(value.with_specified(text))
}

fn has_percentage(value: &Value) -> bool {
    let mut found = false;
    let _ = value.try_map_lengths(&mut |length| {
        found |= matches!(length, Length::Percent(_));
        Ok::<_, ()>(length)
    });
    found
}

/// Apply one attribute to `list`.
///
/// `name` may address one component of a compound property
/// (`space-before.optimum`). Unknown property names are reported through
/// [`warn_once`] and ignored, as is `inherit` on a shorthand whose parent
/// has no value for it.
///
/// # Errors
///
/// [`ResolutionError::InvalidValue`] for text that cannot be converted or
/// an unknown component, [`ResolutionError::MismatchedValueKind`] for a
/// component value of the wrong datatype.
pub fn apply_attribute(
    resolver: &Resolver<'_>,
    list: &mut PropertyList,
    name: &str,
    text: &str,
) -> Result<()> {
    let (property_name, component_name) = match name.split_once('.') {
        Some((property, component)) => (property, Some(component)),
        None => (name, None),
    };
    let Ok(id) = PropertyId::from_str(property_name) else {
        let _ = warn_once(
            "Parse",
            &format!("unsupported property '{name}' on <{}>", list.element()),
        );
        return Ok(());
    };
    let registry = resolver.registry();

    let Some(component_name) = component_name else {
        let value = match parse_specified(resolver, list, id, text) {
            Ok(value) => value,
            // `inherit` on a shorthand the parent never set: leave it unset
            // so each component property resolves on its own.
            Err(ResolutionError::NoConversion { .. })
                if text.trim() == INHERIT
                    && registry
                        .lookup(id)
                        .is_ok_and(|entry| entry.shorthand().is_some()) =>
            {
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        return list.set_explicit(registry, id, value);
    };
    let component =
        Component::from_str(component_name).map_err(|_| ResolutionError::InvalidValue {
            property: id,
            value: text.to_string(),
            reason: format!("unknown component `.{component_name}`"),
        })?;
    let value = parse_literal(text.trim()).ok_or_else(|| ResolutionError::InvalidValue {
        property: id,
        value: text.to_string(),
        reason: "unrecognized value".into(),
    })?;
    list.set_component(registry, id, component, value.with_specified(text))
}

/// Apply every attribute of a node, in attribute-name order.
///
/// Whole-property attributes sort before their component attributes
/// (`space-before` before `space-before.optimum`), so components refine
/// rather than get overwritten. Returns the attributes that failed.
pub fn populate(
    resolver: &Resolver<'_>,
    list: &mut PropertyList,
    attrs: &AttributesMap,
) -> Vec<ResolutionError> {
    attrs
        .iter()
        .filter_map(|(name, text)| apply_attribute(resolver, list, name, text).err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(
            parse_literal("12pt"),
            Some(Value::length(Length::Millipoints(12_000)))
        );
        assert_eq!(
            parse_literal("-2mm").and_then(|v| v.as_length()),
            Length::from_unit(-2.0, "mm")
        );
        assert_eq!(parse_literal("1.5"), Some(Value::number(1.5)));
        assert_eq!(parse_literal("#ff0000"), Some(Value::color(Color::rgb(255, 0, 0))));
        assert_eq!(parse_literal("red"), Some(Value::color(Color::rgb(255, 0, 0))));
        assert_eq!(parse_literal("lr-tb"), Some(Value::keyword(Keyword::LrTb)));
        assert_eq!(parse_literal("-"), Some(Value::string("-")));
        assert_eq!(parse_literal("'Times New Roman'"), Some(Value::string("Times New Roman")));
        assert_eq!(parse_literal("   "), None);
    }

    #[test]
    fn test_lists() {
        let value = parse_literal("underline  overline").unwrap();
        let items: Vec<&Value> = value.as_list().unwrap().iter().collect();
        assert_eq!(
            items,
            vec![&Value::keyword(Keyword::Underline), &Value::keyword(Keyword::Overline)]
        );
        let families = parse_literal("\"DejaVu Sans\", serif").unwrap();
        assert_eq!(families.as_list().map(|l| l.len()), Some(2));
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        assert_eq!(parse_literal("2ex"), None);
        assert_eq!(parse_literal("1pt 2ex"), None);
    }
}
