//! Property value resolution
//!
//! [XSL 1.1 § 5 Property Refinement / Resolution](https://www.w3.org/TR/xsl11/)
//!
//! [`Resolver::resolve`] walks the cascade for one property on one node:
//!
//! 1. the corresponding relative/absolute property, when that side is forced
//! 2. the explicit value on the node
//! 3. the property's computation rule
//! 4. shorthands set on the node, most specific first
//! 5. the parent node, for inherited properties
//! 6. the initial value
//!
//! Relative lengths found on a node are made absolute against that node
//! before they are returned, so an inherited value is the parent's computed
//! value and never re-resolved against the child.

use folio_dom::NodeId;

use crate::corresponding;
use crate::error::{ResolutionError, Result};
use crate::measure::Measurements;
use crate::property::PropertyId;
use crate::property_list::PropertyList;
use crate::registry::{DefaultValue, PercentBase, PropertyEntry, PropertyRegistry};
use crate::values::{Component, Length, Value};
use crate::writing_mode::WritingMode;

/// Font size used for em lengths when the registry has no `font-size`.
const MEDIUM_FONT_SIZE: i32 = 12_000;

/// Resolves properties against a sealed registry and a measurement source.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a PropertyRegistry,
    measurements: &'a dyn Measurements,
}

impl<'a> Resolver<'a> {
    /// A resolver over `registry`, asking `measurements` for geometric
    /// percentage bases.
    #[must_use]
    pub fn new(registry: &'a PropertyRegistry, measurements: &'a dyn Measurements) -> Self {
        Self {
            registry,
            measurements,
        }
    }

    /// The registry this resolver reads.
    #[must_use]
    pub const fn registry(&self) -> &'a PropertyRegistry {
        self.registry
    }

    /// Resolve `id` on the node owning `list`.
    ///
    /// With `try_inherit` false the parent is never consulted; with
    /// `try_default` false the initial value is never used, so a property
    /// nobody specified reports [`ResolutionError::NoConversion`].
    ///
    /// # Errors
    ///
    /// [`ResolutionError::NoConversion`] when the cascade yields nothing,
    /// [`ResolutionError::InvalidShorthandComponent`] for a malformed
    /// shorthand, [`ResolutionError::CorrespondingCycle`] when resolution
    /// re-enters the same property on the same node, and
    /// [`ResolutionError::UnregisteredProperty`] for a registry defect.
    pub fn resolve(
        &self,
        id: PropertyId,
        list: &PropertyList,
        try_inherit: bool,
        try_default: bool,
    ) -> Result<Value> {
        Scope {
            resolver: self,
            list,
            trail: None,
        }
        .resolve_with(id, try_inherit, try_default)
    }
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Properties currently being resolved, innermost first.
struct Trail<'t> {
    node: NodeId,
    property: PropertyId,
    outer: Option<&'t Trail<'t>>,
}

impl Trail<'_> {
    fn contains(&self, node: NodeId, property: PropertyId) -> bool {
        let mut frame = Some(self);
        while let Some(current) = frame {
            if current.node == node && current.property == property {
                return true;
            }
            frame = current.outer;
        }
        false
    }
}

/// One node's view of an in-progress resolution.
///
/// Computation rules receive a scope so they can resolve other properties
/// of the same node (or its parent) without losing track of what is already
/// being resolved.
pub struct Scope<'a> {
    resolver: &'a Resolver<'a>,
    list: &'a PropertyList,
    trail: Option<&'a Trail<'a>>,
}

impl Scope<'_> {
    /// The property list of the node in scope.
    #[must_use]
    pub const fn list(&self) -> &PropertyList {
        self.list
    }

    /// The registry being resolved against.
    #[must_use]
    pub const fn registry(&self) -> &PropertyRegistry {
        self.resolver.registry
    }

    /// The parent node's scope, `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Scope<'_>> {
        self.list.parent().map(|list| Scope {
            resolver: self.resolver,
            list,
            trail: self.trail,
        })
    }

    /// Resolve `id` on this node with inheritance and initial values.
    ///
    /// # Errors
    ///
    /// As [`Resolver::resolve`].
    pub fn resolve(&self, id: PropertyId) -> Result<Value> {
        self.resolve_with(id, true, true)
    }

    /// Resolve `id` on this node.
    ///
    /// # Errors
    ///
    /// As [`Resolver::resolve`].
    pub fn resolve_with(
        &self,
        id: PropertyId,
        try_inherit: bool,
        try_default: bool,
    ) -> Result<Value> {
        let node = self.list.owning_node();
        if self.trail.is_some_and(|trail| trail.contains(node, id)) {
            return Err(ResolutionError::CorrespondingCycle {
                property: id,
                element: self.list.element().to_string(),
            });
        }
        let entry = self.resolver.registry.lookup(id)?;
        let frame = Trail {
            node,
            property: id,
            outer: self.trail,
        };
        let scope = Scope {
            resolver: self.resolver,
            list: self.list,
            trail: Some(&frame),
        };

        let found = match scope.find(entry, try_inherit)? {
            Some(value) => Some(value),
            None if try_default => scope.initial_value(entry)?,
            None => None,
        };
        found.ok_or_else(|| ResolutionError::NoConversion {
            property: id,
            element: self.list.element().to_string(),
        })
    }

    /// Check whether `id` is specified on this node, explicitly or through
    /// one of its shorthands.
    #[must_use]
    pub fn is_specified(&self, id: PropertyId) -> bool {
        self.list.get_explicit(id).is_some() || self.is_set_by_shorthand(id)
    }

    /// Check whether one of `id`'s shorthands is specified on this node.
    #[must_use]
    pub fn is_set_by_shorthand(&self, id: PropertyId) -> bool {
        self.registry().lookup(id).is_ok_and(|entry| {
            entry
                .shorthands()
                .iter()
                .any(|shorthand| self.list.get_explicit(*shorthand).is_some())
        })
    }

    /// The node's writing mode (`lr-tb` when the registry has no
    /// `writing-mode`).
    ///
    /// # Errors
    ///
    /// Propagates errors from resolving `writing-mode`.
    pub fn writing_mode(&self) -> Result<WritingMode> {
        if !self.registry().contains(PropertyId::WritingMode) {
            return Ok(WritingMode::default());
        }
        let value = self.resolve(PropertyId::WritingMode)?;
        Ok(value
            .as_keyword()
            .and_then(WritingMode::from_keyword)
            .unwrap_or_default())
    }

    /// The node's computed font size in millipoints.
    ///
    /// # Errors
    ///
    /// Propagates errors from resolving `font-size`.
    pub fn font_size(&self) -> Result<i32> {
        if !self.registry().contains(PropertyId::FontSize) {
            return Ok(MEDIUM_FONT_SIZE);
        }
        let value = self.resolve(PropertyId::FontSize)?;
        Ok(value
            .as_length()
            .map_or(MEDIUM_FONT_SIZE, |length| length.millipoints_or_zero()))
    }

    /// The parent's computed font size; the initial font size at the root.
    ///
    /// # Errors
    ///
    /// Propagates errors from resolving `font-size`.
    pub fn inherited_font_size(&self) -> Result<i32> {
        if let Some(parent) = self.parent() {
            return parent.font_size();
        }
        let Ok(entry) = self.registry().lookup(PropertyId::FontSize) else {
            return Ok(MEDIUM_FONT_SIZE);
        };
        Ok(self
            .initial_value(entry)?
            .and_then(|value| value.as_length())
            .map_or(MEDIUM_FONT_SIZE, |length| length.millipoints_or_zero()))
    }

    fn find(&self, entry: &PropertyEntry, try_inherit: bool) -> Result<Option<Value>> {
        if let Some(value) = corresponding::forced_value(self, entry)? {
            return Ok(Some(value));
        }
        if let Some(value) = self.list.get_explicit(entry.id()) {
            return self.absolutize(entry, value).map(Some);
        }
        if let Some(value) = self.computed(entry)? {
            return Ok(Some(value));
        }
        if let Some(value) = self.from_shorthands(entry)? {
            return Ok(Some(value));
        }
        if try_inherit {
            return self.inherited(entry);
        }
        Ok(None)
    }

    fn computed(&self, entry: &PropertyEntry) -> Result<Option<Value>> {
        let Some(rule) = entry.computation else {
            return Ok(None);
        };
        rule(self)?
            .map(|value| self.absolutize(entry, &value))
            .transpose()
    }

    fn from_shorthands(&self, entry: &PropertyEntry) -> Result<Option<Value>> {
        for &shorthand in entry.shorthands() {
            let Some(specified) = self.list.get_explicit(shorthand) else {
                continue;
            };
            let Some(kind) = self.registry().lookup(shorthand)?.shorthand() else {
                continue;
            };
            if let Some(value) = kind.expand(shorthand, specified, entry, self)? {
                return self.absolutize(entry, &value).map(Some);
            }
        }
        Ok(None)
    }

    /// The nearest ancestor's specified or computed value. Ancestors never
    /// fall back to their initial value; that is evaluated on this node.
    fn inherited(&self, entry: &PropertyEntry) -> Result<Option<Value>> {
        if !entry.is_inherited() {
            return Ok(None);
        }
        let Some(parent) = self.parent() else {
            return Ok(None);
        };
        match parent.resolve_with(entry.id(), true, false) {
            Ok(value) => Ok(Some(value)),
            Err(ResolutionError::NoConversion { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn initial_value(&self, entry: &PropertyEntry) -> Result<Option<Value>> {
        match entry.default_value() {
            None => Ok(None),
            Some(DefaultValue::FromProperty(source)) => self.resolve(*source).map(Some),
            Some(DefaultValue::Value(value)) if entry.is_context_dependent() => {
                self.absolutize(entry, value).map(Some)
            }
            Some(DefaultValue::Value(value)) => {
                if let Some(cached) = self.list.cached_default(entry.id()) {
                    return Ok(Some(cached));
                }
                Ok(Some(self.list.cache_default(entry.id(), value.clone())))
            }
        }
    }

    /// Make every em and percentage length in `value` absolute for this node.
    fn absolutize(&self, entry: &PropertyEntry, value: &Value) -> Result<Value> {
        value.try_map_lengths(&mut |length| self.absolute_length(entry, length))
    }

    fn absolute_length(&self, entry: &PropertyEntry, length: Length) -> Result<Length> {
        let base = entry.percent_base();
        match length {
            Length::Millipoints(_) => Ok(length),
            Length::Em(_) if base == Some(PercentBase::InheritedFontSize) => {
                Ok(length.resolve_em(self.inherited_font_size()?))
            }
            Length::Em(_) => Ok(length.resolve_em(self.font_size()?)),
            Length::Percent(_) => match base {
                None => Ok(length),
                Some(PercentBase::FontSize) => Ok(length.resolve_percent(self.font_size()?)),
                Some(PercentBase::InheritedFontSize) => {
                    Ok(length.resolve_percent(self.inherited_font_size()?))
                }
                Some(geometric) => Ok(self
                    .resolver
                    .measurements
                    .absolute_measurement(geometric, self.list.owning_node())
                    .and_then(|measured| measured.millipoints())
                    .map_or(length, |mpt| length.resolve_percent(mpt))),
            },
        }
    }
}

/// Replace one component of a compound value.
///
/// A non-compound `base` is treated as an empty compound.
#[must_use]
pub fn set_component(base: &Value, component: Component, value: Value) -> Value {
    let compound = base.as_compound().cloned().unwrap_or_default();
    Value::compound(compound.with(component, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::NoMeasurements;
    use crate::registry::{PropertyEntry, RegistryBuilder};
    use crate::values::{Color, ValueKind};

    fn registry() -> PropertyRegistry {
        let mut builder = RegistryBuilder::new();
        let _ = builder
            .register(
                PropertyEntry::builder(PropertyId::Color)
                    .inherited()
                    .accepts(&[ValueKind::Color])
                    .default_value(Value::color(Color::BLACK))
                    .build(),
            )
            .register(
                PropertyEntry::builder(PropertyId::BorderTopColor)
                    .accepts(&[ValueKind::Color])
                    .default_from(PropertyId::Color)
                    .build(),
            );
        builder.seal_partial().unwrap()
    }

    #[test]
    fn test_default_from_other_property() {
        let registry = registry();
        let resolver = Resolver::new(&registry, &NoMeasurements);
        let mut list = PropertyList::new(NodeId::ROOT, "fo:block", None);
        list.set_explicit(&registry, PropertyId::Color, Value::color(Color::rgb(0, 0, 255)))
            .unwrap();

        assert_eq!(
            resolver.resolve(PropertyId::BorderTopColor, &list, true, true),
            Ok(Value::color(Color::rgb(0, 0, 255)))
        );
    }

    #[test]
    fn test_default_is_cached_and_invalidated() {
        let registry = registry();
        let resolver = Resolver::new(&registry, &NoMeasurements);
        let mut list = PropertyList::new(NodeId::ROOT, "fo:root", None);

        let first = resolver.resolve(PropertyId::Color, &list, true, true).unwrap();
        assert_eq!(list.cached_default(PropertyId::Color), Some(first));

        list.set_explicit(&registry, PropertyId::Color, Value::color(Color::rgb(255, 0, 0)))
            .unwrap();
        assert_eq!(list.cached_default(PropertyId::Color), None);
    }

    #[test]
    fn test_context_dependent_default_is_not_cached() {
        let registry = registry();
        let resolver = Resolver::new(&registry, &NoMeasurements);
        let list = PropertyList::new(NodeId::ROOT, "fo:root", None);

        let _ = resolver
            .resolve(PropertyId::BorderTopColor, &list, true, true)
            .unwrap();
        assert_eq!(list.cached_default(PropertyId::BorderTopColor), None);
    }

    #[test]
    fn test_set_component_on_non_compound() {
        let updated = set_component(
            &Value::length(Length::ZERO),
            Component::Optimum,
            Value::length(Length::from_points(3.0)),
        );
        assert_eq!(
            updated.as_compound().and_then(|c| c.get(Component::Optimum)),
            Some(&Value::length(Length::from_points(3.0)))
        );
    }
}
