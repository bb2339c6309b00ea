//! Property registry
//!
//! [XSL 1.1 § 5.1 Specified, Computed, and Actual Values, and Inheritance](https://www.w3.org/TR/xsl11/)
//!
//! One [`PropertyEntry`] per [`PropertyId`] describes everything the resolver
//! needs to know about a property as data: its initial value, whether it is
//! inherited, which datatypes and keywords it accepts, which shorthands can
//! set it and how it corresponds to its relative/absolute counterpart.
//!
//! Entries are collected by a [`RegistryBuilder`] and frozen by
//! [`RegistryBuilder::seal`]. The sealed [`PropertyRegistry`] has no
//! mutators; it is shared read-only by every property list.

use std::str::FromStr;

use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::Display;

use crate::corresponding::Correspondence;
use crate::error::{ResolutionError, Result};
use crate::parse::parse_literal;
use crate::property::PropertyId;
use crate::resolver::Scope;
use crate::shorthand::ShorthandKind;
use crate::values::{Component, Compound, Keyword, Length, Value, ValueData, ValueKind};

/// The measurement a percentage (and, for fonts, an em length) is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PercentBase {
    /// The node's own `font-size` (`line-height`).
    FontSize,
    /// The parent's `font-size` (`font-size` itself).
    InheritedFontSize,
    /// Width of the containing block, supplied by layout.
    ContainingBlockWidth,
    /// Height of the containing block, supplied by layout.
    ContainingBlockHeight,
}

impl PercentBase {
    /// Check whether the base is a font size, which the resolver can compute
    /// itself, as opposed to a geometric measurement only layout knows.
    #[must_use]
    pub const fn is_font_relative(self) -> bool {
        matches!(self, Self::FontSize | Self::InheritedFontSize)
    }
}

/// Where a property's initial value comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A literal value.
    Value(Value),
    /// The resolved value of another property on the same node
    /// (`border-top-color` starts as the node's `color`).
    FromProperty(PropertyId),
}

/// Computation rule for properties derived from other properties of the
/// same node. `Ok(None)` means the rule does not apply to this node.
pub type ComputeFn = fn(&Scope<'_>) -> Result<Option<Value>>;

/// One component of a compound property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentSpec {
    /// The component.
    pub component: Component,
    /// Datatypes the component accepts.
    pub accepts: &'static [ValueKind],
    /// Keywords the component accepts.
    pub enums: &'static [Keyword],
    /// Whether a single scalar given for the whole property sets this
    /// component (`space-before="6pt"` sets `.minimum`, `.optimum` and
    /// `.maximum` but not `.precedence`).
    pub from_scalar: bool,
}

impl ComponentSpec {
    /// Fit `value` to this component, or `None` if the component rejects it.
    #[must_use]
    pub fn fit(&self, value: &Value) -> Option<Value> {
        match value.data() {
            ValueData::Keyword(keyword) => self.enums.contains(keyword).then(|| value.clone()),
            ValueData::Number(n)
                if *n == 0.0
                    && !self.accepts.contains(&ValueKind::Number)
                    && self.accepts.contains(&ValueKind::Length) =>
            {
                Some(Value::length(Length::ZERO))
            }
            data => self.accepts.contains(&data.kind()).then(|| value.clone()),
        }
    }
}

/// Resolver descriptor for one property.
#[derive(Debug, Clone)]
pub struct PropertyEntry {
    pub(crate) id: PropertyId,
    pub(crate) inherited: bool,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) accepts: Vec<ValueKind>,
    pub(crate) percent_base: Option<PercentBase>,
    pub(crate) enums: Vec<Keyword>,
    pub(crate) keywords: Vec<(&'static str, &'static str)>,
    pub(crate) shorthands: Vec<PropertyId>,
    pub(crate) shorthand: Option<ShorthandKind>,
    pub(crate) components: &'static [ComponentSpec],
    pub(crate) corresponding: Option<Correspondence>,
    pub(crate) computation: Option<ComputeFn>,
    pub(crate) context_dependent: bool,
}

impl PropertyEntry {
    /// Start describing `id`.
    pub fn builder(id: PropertyId) -> EntryBuilder {
        EntryBuilder {
            entry: Self {
                id,
                inherited: false,
                default: None,
                accepts: Vec::new(),
                percent_base: None,
                enums: Vec::new(),
                keywords: Vec::new(),
                shorthands: Vec::new(),
                shorthand: None,
                components: &[],
                corresponding: None,
                computation: None,
                context_dependent: false,
            },
        }
    }

    /// The property this entry describes.
    #[must_use]
    pub const fn id(&self) -> PropertyId {
        self.id
    }

    /// Whether the property is inherited.
    #[must_use]
    pub const fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// The initial value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// Datatypes an explicit value may have.
    #[must_use]
    pub fn accepts(&self) -> &[ValueKind] {
        &self.accepts
    }

    /// Percentage base, if percentages are allowed.
    #[must_use]
    pub const fn percent_base(&self) -> Option<PercentBase> {
        self.percent_base
    }

    /// Shorthands that can set this property, most specific first.
    #[must_use]
    pub fn shorthands(&self) -> &[PropertyId] {
        &self.shorthands
    }

    /// Expansion strategy, when this property is itself a shorthand.
    #[must_use]
    pub const fn shorthand(&self) -> Option<&ShorthandKind> {
        self.shorthand.as_ref()
    }

    /// Component layout, for compound properties.
    #[must_use]
    pub const fn components(&self) -> &'static [ComponentSpec] {
        self.components
    }

    /// Linkage to the relative/absolute counterpart.
    #[must_use]
    pub const fn corresponding(&self) -> Option<&Correspondence> {
        self.corresponding.as_ref()
    }

    /// Whether the initial value depends on the node it is evaluated for,
    /// which disables caching it.
    #[must_use]
    pub const fn is_context_dependent(&self) -> bool {
        self.context_dependent
    }

    /// Check whether an explicit value of datatype `kind` is acceptable.
    #[must_use]
    pub fn accepts_kind(&self, kind: ValueKind) -> bool {
        self.accepts.contains(&kind)
    }

    /// The component layout entry for `component`.
    #[must_use]
    pub fn component(&self, component: Component) -> Option<&'static ComponentSpec> {
        self.components.iter().find(|spec| spec.component == component)
    }

    /// Look `token` up in the enumerated-keyword table.
    #[must_use]
    pub fn enum_keyword(&self, token: &str) -> Option<Keyword> {
        Keyword::from_str(token)
            .ok()
            .filter(|keyword| self.enums.contains(keyword))
    }

    /// Look `token` up in the keyword-substitution table (`thin` → `0.5pt`).
    #[must_use]
    pub fn substitution(&self, token: &str) -> Option<&'static str> {
        self.keywords
            .iter()
            .find_map(|(alias, text)| (*alias == token).then_some(*text))
    }

    /// Convert a parsed value to a value this property accepts.
    ///
    /// Names are looked up in the enumerated table first, then in the
    /// substitution table. A scalar given to a compound property fills the
    /// components that take a scalar, starting from the initial compound.
    #[must_use]
    pub fn convert(&self, value: &Value) -> Option<Value> {
        if let Some(token) = value.name_token() {
            if let Some(keyword) = self.enum_keyword(token) {
                return self.fit(&carry_specified(Value::keyword(keyword), value));
            }
            if let Some(text) = self.substitution(token) {
                let substituted = parse_literal(text)?;
                return self.fit(&carry_specified(substituted, value));
            }
        }
        self.fit(value)
    }

    fn fit(&self, value: &Value) -> Option<Value> {
        match value.data() {
            ValueData::Keyword(keyword) => {
                if self.accepts_kind(ValueKind::Keyword) && self.enums.contains(keyword) {
                    Some(value.clone())
                } else if self.accepts_kind(ValueKind::Compound) {
                    self.wrap_scalar(value)
                } else if self.accepts_kind(ValueKind::String) {
                    Some(carry_specified(Value::string(keyword.name()), value))
                } else {
                    None
                }
            }
            data if self.accepts_kind(data.kind()) => Some(value.clone()),
            ValueData::String(text)
                if self.accepts_kind(ValueKind::Character) && text.chars().count() == 1 =>
            {
                text.chars()
                    .next()
                    .map(|c| carry_specified(Value::character(c), value))
            }
            ValueData::Number(n) if *n == 0.0 && self.accepts_kind(ValueKind::Length) => {
                Some(carry_specified(Value::length(Length::ZERO), value))
            }
            _ if self.accepts_kind(ValueKind::Compound) => self.wrap_scalar(value),
            _ => None,
        }
    }

    fn wrap_scalar(&self, value: &Value) -> Option<Value> {
        let mut compound = self.initial_compound();
        let mut filled = false;
        for spec in self.components.iter().filter(|spec| spec.from_scalar) {
            if let Some(component_value) = spec.fit(value) {
                compound = compound.with(spec.component, component_value);
                filled = true;
            }
        }
        filled.then(|| carry_specified(Value::compound(compound), value))
    }

    /// The literal initial value as a compound, or an empty compound.
    #[must_use]
    pub fn initial_compound(&self) -> Compound {
        match &self.default {
            Some(DefaultValue::Value(value)) => value.as_compound().cloned().unwrap_or_default(),
            _ => Compound::default(),
        }
    }
}

fn carry_specified(value: Value, from: &Value) -> Value {
    match from.specified() {
        Some(text) => value.with_specified(text),
        None => value,
    }
}

fn has_relative_length(value: &Value) -> bool {
    let mut relative = false;
    let _ = value.try_map_lengths(&mut |length| {
        relative |= !length.is_absolute();
        Ok::<_, ()>(length)
    });
    relative
}

/// Builder for a [`PropertyEntry`].
#[derive(Debug, Clone)]
#[must_use]
pub struct EntryBuilder {
    entry: PropertyEntry,
}

impl EntryBuilder {
    /// Mark the property as inherited.
    pub const fn inherited(mut self) -> Self {
        self.entry.inherited = true;
        self
    }

    /// Literal initial value.
    pub fn default_value(mut self, value: Value) -> Self {
        self.entry.default = Some(DefaultValue::Value(value));
        self
    }

    /// Initial value taken from another property of the same node.
    pub fn default_from(mut self, source: PropertyId) -> Self {
        self.entry.default = Some(DefaultValue::FromProperty(source));
        self
    }

    /// Datatypes an explicit value may have.
    pub fn accepts(mut self, kinds: &[ValueKind]) -> Self {
        self.entry.accepts = kinds.to_vec();
        self
    }

    /// Allow percentages relative to `base`.
    pub const fn percent_base(mut self, base: PercentBase) -> Self {
        self.entry.percent_base = Some(base);
        self
    }

    /// Enumerated keywords the property accepts.
    pub fn enums(mut self, keywords: &[Keyword]) -> Self {
        self.entry.enums = keywords.to_vec();
        self
    }

    /// Add a keyword substitution: `alias` is parsed as `text`.
    pub fn keyword(mut self, alias: &'static str, text: &'static str) -> Self {
        self.entry.keywords.push((alias, text));
        self
    }

    /// Shorthands that can set this property, most specific first.
    pub fn shorthands(mut self, shorthands: &[PropertyId]) -> Self {
        self.entry.shorthands = shorthands.to_vec();
        self
    }

    /// Make this property a shorthand expanded with `kind`.
    pub fn shorthand(mut self, kind: ShorthandKind) -> Self {
        self.entry.shorthand = Some(kind);
        self
    }

    /// Component layout of a compound property.
    pub fn components(mut self, components: &'static [ComponentSpec]) -> Self {
        self.entry.components = components;
        if !self.entry.accepts.contains(&ValueKind::Compound) {
            self.entry.accepts.push(ValueKind::Compound);
        }
        self
    }

    /// Link the property to its relative/absolute counterpart.
    pub const fn corresponding(mut self, correspondence: Correspondence) -> Self {
        self.entry.corresponding = Some(correspondence);
        self
    }

    /// Derive the value from other properties of the same node.
    pub fn computed(mut self, rule: ComputeFn) -> Self {
        self.entry.computation = Some(rule);
        self
    }

    /// Finish the entry.
    #[must_use]
    pub fn build(mut self) -> PropertyEntry {
        self.entry.context_dependent = match &self.entry.default {
            Some(DefaultValue::FromProperty(_)) => true,
            Some(DefaultValue::Value(value)) => has_relative_length(value),
            None => false,
        };
        self.entry
    }
}

/// Collects entries before sealing.
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    entries: Vec<Option<PropertyEntry>>,
    duplicates: Vec<PropertyId>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![None; PropertyId::COUNT],
            duplicates: Vec::new(),
        }
    }

    /// Register an entry. Registering the same property twice is reported
    /// by [`Self::seal`].
    pub fn register(&mut self, entry: PropertyEntry) -> &mut Self {
        let slot = &mut self.entries[entry.id.index()];
        if slot.is_some() {
            self.duplicates.push(entry.id);
        } else {
            *slot = Some(entry);
        }
        self
    }

    /// Freeze the registry, requiring an entry for every [`PropertyId`].
    ///
    /// # Errors
    ///
    /// [`ResolutionError::DuplicateRegistration`] for a property registered
    /// twice, [`ResolutionError::UnregisteredProperty`] for a missing one,
    /// [`ResolutionError::InconsistentRegistry`] for an entry referring to
    /// something the registry cannot satisfy.
    pub fn seal(self) -> Result<PropertyRegistry> {
        if let Some(property) = self.duplicates.first().copied() {
            return Err(ResolutionError::DuplicateRegistration { property });
        }
        if let Some(missing) = PropertyId::iter().find(|id| self.entries[id.index()].is_none()) {
            return Err(ResolutionError::UnregisteredProperty { property: missing });
        }
        self.seal_partial()
    }

    /// Freeze a registry that covers only some properties. Lookups of the
    /// others fail with [`ResolutionError::UnregisteredProperty`].
    ///
    /// # Errors
    ///
    /// As [`Self::seal`], except that missing properties are allowed.
    pub fn seal_partial(self) -> Result<PropertyRegistry> {
        if let Some(property) = self.duplicates.first().copied() {
            return Err(ResolutionError::DuplicateRegistration { property });
        }
        let registry = PropertyRegistry {
            entries: self.entries,
        };
        for entry in registry.iter() {
            registry.check(entry)?;
        }
        Ok(registry)
    }
}

/// Sealed, read-only property table.
#[derive(Debug, Clone)]
pub struct PropertyRegistry {
    entries: Vec<Option<PropertyEntry>>,
}

impl PropertyRegistry {
    /// The entry for `id`.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::UnregisteredProperty`] if `id` was not registered.
    pub fn lookup(&self, id: PropertyId) -> Result<&PropertyEntry> {
        self.entries
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(ResolutionError::UnregisteredProperty { property: id })
    }

    /// Check whether `id` has an entry.
    #[must_use]
    pub fn contains(&self, id: PropertyId) -> bool {
        self.lookup(id).is_ok()
    }

    /// Registered entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyEntry> {
        self.entries.iter().flatten()
    }

    fn check(&self, entry: &PropertyEntry) -> Result<()> {
        let inconsistent = |reason: String| ResolutionError::InconsistentRegistry {
            property: entry.id,
            reason,
        };
        for shorthand in &entry.shorthands {
            let target = self
                .lookup(*shorthand)
                .map_err(|_| inconsistent(format!("shorthand `{shorthand}` is not registered")))?;
            if target.shorthand.is_none() {
                return Err(inconsistent(format!(
                    "`{shorthand}` is listed as a shorthand but has no expansion"
                )));
            }
        }
        let targets = entry.shorthand.map(|kind| kind.targets()).unwrap_or_default();
        for target in targets {
            let listed = self
                .lookup(target)
                .is_ok_and(|component| component.shorthands.contains(&entry.id));
            if !listed {
                return Err(inconsistent(format!(
                    "`{target}` does not list this shorthand"
                )));
            }
        }
        let dangling_default = match &entry.default {
            Some(DefaultValue::FromProperty(source)) => {
                Some(*source).filter(|s| !self.contains(*s))
            }
            _ => None,
        };
        if let Some(source) = dangling_default {
            return Err(inconsistent(format!("default source `{source}` is not registered")));
        }
        let dangling_counterpart = entry.corresponding.as_ref().and_then(|correspondence| {
            correspondence
                .family
                .members()
                .find(|member| !self.contains(*member))
        });
        if let Some(missing) = dangling_counterpart {
            return Err(inconsistent(format!(
                "corresponding property `{missing}` is not registered"
            )));
        }
        if !entry.components.is_empty() {
            match &entry.default {
                Some(DefaultValue::Value(value)) if value.as_compound().is_some() => {}
                _ => {
                    return Err(inconsistent(
                        "compound property needs a compound initial value".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width_entry() -> PropertyEntry {
        PropertyEntry::builder(PropertyId::BorderTopWidth)
            .accepts(&[ValueKind::Length])
            .keyword("thin", "0.5pt")
            .default_value(Value::length(Length::from_points(1.0)))
            .build()
    }

    #[test]
    fn test_duplicate_registration_reported_on_seal() {
        let mut builder = RegistryBuilder::new();
        let _ = builder.register(width_entry()).register(width_entry());
        assert_eq!(
            builder.seal_partial().err(),
            Some(ResolutionError::DuplicateRegistration {
                property: PropertyId::BorderTopWidth
            })
        );
    }

    #[test]
    fn test_full_seal_requires_every_property() {
        let mut builder = RegistryBuilder::new();
        let _ = builder.register(width_entry());
        assert!(matches!(
            builder.seal(),
            Err(ResolutionError::UnregisteredProperty { .. })
        ));
    }

    #[test]
    fn test_lookup_unknown_property() {
        let mut builder = RegistryBuilder::new();
        let _ = builder.register(width_entry());
        let registry = builder.seal_partial().unwrap();
        assert!(registry.lookup(PropertyId::BorderTopWidth).is_ok());
        assert_eq!(
            registry.lookup(PropertyId::Color).err(),
            Some(ResolutionError::UnregisteredProperty {
                property: PropertyId::Color
            })
        );
    }

    #[test]
    fn test_dangling_shorthand_is_inconsistent() {
        let mut builder = RegistryBuilder::new();
        let _ = builder.register(
            PropertyEntry::builder(PropertyId::MarginTop)
                .accepts(&[ValueKind::Length])
                .shorthands(&[PropertyId::Margin])
                .build(),
        );
        assert!(matches!(
            builder.seal_partial(),
            Err(ResolutionError::InconsistentRegistry { .. })
        ));
    }

    #[test]
    fn test_convert_substitutes_keywords() {
        let entry = width_entry();
        assert_eq!(
            entry.convert(&Value::string("thin")),
            Some(Value::length(Length::Millipoints(500)))
        );
        assert_eq!(
            entry.convert(&Value::number(0.0)),
            Some(Value::length(Length::ZERO))
        );
        assert_eq!(entry.convert(&Value::string("wide")), None);
    }

    #[test]
    fn test_context_dependence() {
        let from_color = PropertyEntry::builder(PropertyId::BorderTopColor)
            .accepts(&[ValueKind::Color])
            .default_from(PropertyId::Color)
            .build();
        assert!(from_color.is_context_dependent());
        assert!(!width_entry().is_context_dependent());
    }
}
