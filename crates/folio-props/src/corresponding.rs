//! Corresponding properties
//!
//! [XSL 1.1 § 5.3 Computing the Values of Corresponding Properties](https://www.w3.org/TR/xsl11/)
//!
//! "Where there are relative and absolute properties for the same edge, the
//! computed value of the one that is not specified is derived from the one
//! that is." Both sides are ordinary registry entries; an [`EdgeFamily`]
//! binds them edge by edge through the node's writing mode.
//!
//! Which side wins on a node:
//!
//! 1. the absolute property, if specified explicitly
//! 2. the relative property, if specified
//! 3. the absolute property, if set through one of its shorthands
//!
//! If neither is specified both sides fall through to the normal cascade.

use crate::error::{ResolutionError, Result};
use crate::property::PropertyId;
use crate::registry::PropertyEntry;
use crate::resolver::Scope;
use crate::values::{Component, Compound, Keyword, Value};
use crate::writing_mode::{PhysicalSide, RelativeEdge};

/// Conversion from one side's value to the other's.
pub type ConvertFn = fn(&Value) -> Option<Value>;

/// The relative and absolute properties of one family
/// (padding, border width, margin and space).
#[derive(Debug)]
pub struct EdgeFamily {
    /// Relative properties indexed by [`RelativeEdge::index`]. Not every
    /// family has all four (there is no `space-start`).
    pub relative: [Option<PropertyId>; 4],
    /// Absolute properties indexed by [`PhysicalSide::index`].
    pub absolute: [PropertyId; 4],
    /// Converts an absolute value into the relative property's form.
    pub to_relative: ConvertFn,
    /// Converts a relative value into the absolute property's form.
    pub to_absolute: ConvertFn,
}

impl EdgeFamily {
    /// Every property of the family.
    pub fn members(&self) -> impl Iterator<Item = PropertyId> + '_ {
        self.relative
            .iter()
            .flatten()
            .copied()
            .chain(self.absolute.iter().copied())
    }
}

/// The edge a property describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// A writing-mode-relative edge.
    Relative(RelativeEdge),
    /// A physical side.
    Absolute(PhysicalSide),
}

/// Which side of a corresponding pair is authoritative on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The relative property (`padding-before`).
    Relative,
    /// The absolute property (`padding-top`).
    Absolute,
}

/// A property's membership in an [`EdgeFamily`].
#[derive(Debug, Clone, Copy)]
pub struct Correspondence {
    /// The family.
    pub family: &'static EdgeFamily,
    /// The edge this property describes.
    pub edge: Edge,
}

impl Correspondence {
    /// The `(relative, absolute)` pair this property belongs to on a node
    /// with the scope's writing mode.
    ///
    /// # Errors
    ///
    /// Propagates errors from resolving `writing-mode`.
    pub fn pair(&self, scope: &Scope<'_>) -> Result<(Option<PropertyId>, PropertyId)> {
        let writing_mode = scope.writing_mode()?;
        let (relative_edge, side) = match self.edge {
            Edge::Relative(edge) => (edge, writing_mode.physical(edge)),
            Edge::Absolute(side) => (writing_mode.relative(side), side),
        };
        Ok((
            self.family.relative[relative_edge.index()],
            self.family.absolute[side.index()],
        ))
    }

    /// Which side is authoritative on the scope's node, `None` if neither
    /// is specified. Evaluated fresh on every call.
    ///
    /// # Errors
    ///
    /// Propagates errors from resolving `writing-mode`.
    pub fn forced_side(&self, scope: &Scope<'_>) -> Result<Option<Side>> {
        let (relative, absolute) = self.pair(scope)?;
        let side = if scope.list().get_explicit(absolute).is_some() {
            Some(Side::Absolute)
        } else if relative.is_some_and(|id| scope.is_specified(id)) {
            Some(Side::Relative)
        } else if scope.is_set_by_shorthand(absolute) {
            Some(Side::Absolute)
        } else {
            None
        };
        Ok(side)
    }
}

/// The value of `entry`'s property taken from its counterpart, when the
/// counterpart is the authoritative side on the scope's node.
pub(crate) fn forced_value(scope: &Scope<'_>, entry: &PropertyEntry) -> Result<Option<Value>> {
    let Some(correspondence) = entry.corresponding() else {
        return Ok(None);
    };
    let Some(forced) = correspondence.forced_side(scope)? else {
        return Ok(None);
    };
    let (relative, absolute) = correspondence.pair(scope)?;
    let (counterpart, convert) = match (correspondence.edge, forced) {
        (Edge::Relative(_), Side::Absolute) => (absolute, correspondence.family.to_relative),
        (Edge::Absolute(_), Side::Relative) => match relative {
            Some(relative) => (relative, correspondence.family.to_absolute),
            None => return Ok(None),
        },
        _ => return Ok(None),
    };
    match scope.resolve_with(counterpart, false, false) {
        Ok(value) => Ok(convert(&value)),
        Err(ResolutionError::NoConversion { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Same value on both sides (`border-before-width` ↔ `border-top-width`).
#[must_use]
pub fn identity(value: &Value) -> Option<Value> {
    Some(value.clone())
}

/// `padding-top="4pt"` → `padding-before.length="4pt"`, discarded at breaks.
#[must_use]
pub fn length_to_conditional(value: &Value) -> Option<Value> {
    let length = value.as_length()?;
    Some(Value::compound(Compound::new([
        (Component::Length, Value::length(length)),
        (Component::Conditionality, Value::keyword(Keyword::Discard)),
    ])))
}

/// `padding-before.length` → `padding-top`.
#[must_use]
pub fn conditional_to_length(value: &Value) -> Option<Value> {
    match value.as_compound() {
        Some(compound) => compound.get(Component::Length).cloned(),
        None => value.as_length().map(Value::length),
    }
}

/// `margin-top="4pt"` → `space-before` with minimum, optimum and maximum
/// 4pt, `.precedence="force"` and `.conditionality="retain"`.
#[must_use]
pub fn margin_to_space(value: &Value) -> Option<Value> {
    let length = Value::length(value.as_length()?);
    Some(Value::compound(Compound::new([
        (Component::Minimum, length.clone()),
        (Component::Optimum, length.clone()),
        (Component::Maximum, length),
        (Component::Precedence, Value::keyword(Keyword::Force)),
        (Component::Conditionality, Value::keyword(Keyword::Retain)),
    ])))
}

/// `space-before.optimum` → `margin-top`.
#[must_use]
pub fn space_to_margin(value: &Value) -> Option<Value> {
    match value.as_compound() {
        Some(compound) => compound.get(Component::Optimum).cloned(),
        None => value.as_length().map(Value::length),
    }
}
