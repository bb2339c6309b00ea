//! Compound and list values
//!
//! [XSL 1.1 § 5.11 Property Datatypes: `<space>`, `<keep>`, `<length-conditional>`](https://www.w3.org/TR/xsl11/)

use serde::ser::{Serialize, SerializeMap, Serializer};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::Value;

/// A named component of a compound datatype.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Component {
    /// `.minimum` of a space or length-range.
    Minimum,
    /// `.optimum` of a space or length-range.
    Optimum,
    /// `.maximum` of a space or length-range.
    Maximum,
    /// `.precedence` of a space.
    Precedence,
    /// `.conditionality` of a space or conditional length.
    Conditionality,
    /// `.length` of a conditional length.
    Length,
    /// `.within-line` of a keep.
    WithinLine,
    /// `.within-column` of a keep.
    WithinColumn,
    /// `.within-page` of a keep.
    WithinPage,
}

/// An ordered record of component values.
///
/// Component order is the order the registry declares, and is preserved by
/// [`Compound::with`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound(Vec<(Component, Value)>);

impl Compound {
    /// Build a compound from `(component, value)` pairs.
    #[must_use]
    pub fn new(components: impl IntoIterator<Item = (Component, Value)>) -> Self {
        Self(components.into_iter().collect())
    }

    /// A compound where every listed component holds `value`.
    #[must_use]
    pub fn uniform(components: &[Component], value: &Value) -> Self {
        Self(components.iter().map(|c| (*c, value.clone())).collect())
    }

    /// The value of `component`, if present.
    #[must_use]
    pub fn get(&self, component: Component) -> Option<&Value> {
        self.0
            .iter()
            .find_map(|(c, v)| (*c == component).then_some(v))
    }

    /// A copy of this compound with `component` replaced (or appended).
    #[must_use]
    pub fn with(&self, component: Component, value: Value) -> Self {
        let mut components = self.0.clone();
        match components.iter_mut().find(|(c, _)| *c == component) {
            Some(slot) => slot.1 = value,
            None => components.push((component, value)),
        }
        Self(components)
    }

    /// Iterate over `(component, value)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (Component, &Value)> {
        self.0.iter().map(|(c, v)| (*c, v))
    }

    /// Apply `f` to every component value, failing if any call fails.
    pub(crate) fn try_map<E>(
        &self,
        mut f: impl FnMut(&Value) -> Result<Value, E>,
    ) -> Result<Self, E> {
        self.0
            .iter()
            .map(|(c, v)| Ok((*c, f(v)?)))
            .collect::<Result<Vec<_>, E>>()
            .map(Self)
    }
}

impl Serialize for Compound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (component, value) in &self.0 {
            let key: &'static str = component.into();
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// An ordered sequence of values (`text-decoration="underline overline"`,
/// the tokens of a shorthand).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueList(Vec<Value>);

impl ValueList {
    /// Wrap a sequence of values.
    #[must_use]
    pub const fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Iterate over the items. Each call starts from the beginning.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn try_map<E>(&self, f: impl FnMut(&Value) -> Result<Value, E>) -> Result<Self, E> {
        self.0.iter().map(f).collect::<Result<Vec<_>, E>>().map(Self)
    }
}

impl Serialize for ValueList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.0)
    }
}

impl<'a> IntoIterator for &'a ValueList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
