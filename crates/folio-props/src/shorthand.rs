//! Shorthand expansion
//!
//! [XSL 1.1 § 7.31 Shorthand Properties](https://www.w3.org/TR/xsl11/)
//!
//! A shorthand is never resolved into all of its components at once.
//! Instead, when a component property finds a shorthand specified on its
//! node, it asks the shorthand's [`ShorthandKind`] for its own share of the
//! shorthand's value.
//!
//! Applying one value to every component needs no strategy of its own: it
//! is the one-value case of [`ShorthandKind::Positional`], and a
//! [`ByTypeSlot`] can list several targets that all receive the same token.

use crate::error::{ResolutionError, Result};
use crate::property::PropertyId;
use crate::registry::PropertyEntry;
use crate::resolver::Scope;
use crate::values::{Keyword, Value};

/// How a shorthand distributes its value over its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShorthandKind {
    /// CSS edge rule over `[top, right, bottom, left]`:
    /// one value sets all four edges, two set vertical then horizontal,
    /// three set top, horizontal, bottom, four set each edge in order.
    Positional([PropertyId; 4]),
    /// Each token goes to the first unfilled slot whose property accepts
    /// it, in any order (`border="solid 1pt red"`).
    ByType(&'static [ByTypeSlot]),
    /// A keyword maps to fixed values of other properties
    /// (`page-break-before="always"` is `break-before="page"`).
    KeywordMap(&'static [KeywordRule]),
}

/// One slot of a [`ShorthandKind::ByType`] shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByTypeSlot {
    /// The property whose entry decides whether a token fits this slot.
    pub accepts_as: PropertyId,
    /// The properties that receive the token assigned to this slot.
    pub targets: &'static [PropertyId],
}

/// One row of a [`ShorthandKind::KeywordMap`] shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    /// The shorthand's keyword.
    pub token: Keyword,
    /// The component property it sets.
    pub property: PropertyId,
    /// The keyword the component receives.
    pub value: Keyword,
}

impl ShorthandKind {
    /// Properties this shorthand can set.
    #[must_use]
    pub fn targets(&self) -> Vec<PropertyId> {
        match self {
            Self::Positional(sides) => sides.to_vec(),
            Self::ByType(slots) => slots
                .iter()
                .flat_map(|slot| slot.targets.iter().copied())
                .collect(),
            Self::KeywordMap(rules) => {
                let mut targets: Vec<PropertyId> = rules.iter().map(|rule| rule.property).collect();
                targets.sort_unstable();
                targets.dedup();
                targets
            }
        }
    }

    /// The value `shorthand="value"` gives the property `target`.
    ///
    /// Returns `Ok(None)` when the shorthand is well-formed but says nothing
    /// about `target` (`border="solid"` for `border-top-width`).
    ///
    /// # Errors
    ///
    /// [`ResolutionError::InvalidShorthandComponent`] if the value cannot be
    /// distributed: a wrong token count, or a token no component accepts.
    pub fn expand(
        &self,
        shorthand: PropertyId,
        value: &Value,
        target: &PropertyEntry,
        scope: &Scope<'_>,
    ) -> Result<Option<Value>> {
        let invalid = || ResolutionError::InvalidShorthandComponent {
            shorthand,
            property: target.id(),
            element: scope.list().element().to_string(),
            value: value
                .specified()
                .map_or_else(|| value.to_string(), str::to_string),
        };
        let tokens: Vec<&Value> = match value.as_list() {
            Some(list) => list.iter().collect(),
            None => vec![value],
        };

        match self {
            Self::Positional(sides) => {
                let Some(side) = sides.iter().position(|id| *id == target.id()) else {
                    return Ok(None);
                };
                let index = match (tokens.len(), side) {
                    (1, _) => 0,
                    (2, side) => side % 2,
                    (3, 3) => 1,
                    (3 | 4, side) => side,
                    _ => return Err(invalid()),
                };
                target.convert(tokens[index]).map(Some).ok_or_else(invalid)
            }
            Self::ByType(slots) => {
                let Some(wanted) = slots.iter().position(|slot| slot.targets.contains(&target.id()))
                else {
                    return Ok(None);
                };
                let registry = scope.registry();
                let mut filled = vec![false; slots.len()];
                let mut result = None;
                for token in tokens {
                    let slot = slots.iter().enumerate().position(|(i, slot)| {
                        !filled[i]
                            && registry
                                .lookup(slot.accepts_as)
                                .is_ok_and(|entry| entry.convert(token).is_some())
                    });
                    let Some(slot) = slot else {
                        return Err(invalid());
                    };
                    filled[slot] = true;
                    if slot == wanted {
                        result = Some(target.convert(token).ok_or_else(invalid)?);
                    }
                }
                Ok(result)
            }
            Self::KeywordMap(rules) => {
                let token = value.as_keyword().ok_or_else(invalid)?;
                let mut matching = rules.iter().filter(|rule| rule.token == token).peekable();
                if matching.peek().is_none() {
                    return Err(invalid());
                }
                matching
                    .find(|rule| rule.property == target.id())
                    .map(|rule| target.convert(&Value::keyword(rule.value)).ok_or_else(invalid))
                    .transpose()
            }
        }
    }
}
