//! Per-node property lists
//!
//! [XSL 1.1 § 5.1 Specified, Computed, and Actual Values, and Inheritance](https://www.w3.org/TR/xsl11/)
//!
//! A [`PropertyList`] holds what the author wrote on one formatting object,
//! and links to the list of its parent for inheritance. It is filled while
//! the node's attributes are parsed and only read afterwards, apart from the
//! cache of initial values.

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;
use folio_dom::NodeId;

use crate::error::{ResolutionError, Result};
use crate::property::PropertyId;
use crate::registry::PropertyRegistry;
use crate::resolver::set_component;
use crate::values::{Component, Value, ValueKind};

/// Explicit values of one node, plus the link to its parent's list.
#[derive(Debug)]
pub struct PropertyList {
    node: NodeId,
    element: String,
    parent: Option<Arc<PropertyList>>,
    explicit: BTreeMap<PropertyId, Value>,
    /// Initial values computed for this node, for context-independent
    /// properties only.
    defaults: DashMap<PropertyId, Value>,
}

impl PropertyList {
    /// An empty list for `node` (an `element`), below `parent`.
    #[must_use]
    pub fn new(node: NodeId, element: impl Into<String>, parent: Option<Arc<Self>>) -> Self {
        Self {
            node,
            element: element.into(),
            parent,
            explicit: BTreeMap::new(),
            defaults: DashMap::new(),
        }
    }

    /// Store an explicit value for `id`.
    ///
    /// Only the datatype is checked; converting authored text into a value
    /// of the right shape is the parser's job.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::UnregisteredProperty`] if `id` has no entry,
    /// [`ResolutionError::MismatchedValueKind`] if the entry does not accept
    /// the value's datatype.
    pub fn set_explicit(
        &mut self,
        registry: &PropertyRegistry,
        id: PropertyId,
        value: Value,
    ) -> Result<()> {
        let entry = registry.lookup(id)?;
        if !entry.accepts_kind(value.kind()) {
            return Err(ResolutionError::MismatchedValueKind {
                property: id,
                expected: join_kinds(entry.accepts()),
                found: value.kind(),
            });
        }
        let _ = self.defaults.remove(&id);
        let _ = self.explicit.insert(id, value);
        Ok(())
    }

    /// Set one component of a compound property (`space-before.optimum`).
    ///
    /// The other components come from the explicit value already set on
    /// this node, or from the property's initial value.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::InvalidValue`] if the property has no such
    /// component, [`ResolutionError::MismatchedValueKind`] if the component
    /// does not accept the value.
    pub fn set_component(
        &mut self,
        registry: &PropertyRegistry,
        id: PropertyId,
        component: Component,
        value: Value,
    ) -> Result<()> {
        let entry = registry.lookup(id)?;
        let spec = entry
            .component(component)
            .ok_or_else(|| ResolutionError::InvalidValue {
                property: id,
                value: value.to_string(),
                reason: format!("`{id}` has no `.{component}` component"),
            })?;
        let fitted = spec
            .fit(&value)
            .ok_or_else(|| ResolutionError::MismatchedValueKind {
                property: id,
                expected: join_kinds(spec.accepts),
                found: value.kind(),
            })?;
        let base = self
            .explicit
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Value::compound(entry.initial_compound()));
        self.set_explicit(registry, id, set_component(&base, component, fitted))
    }

    /// The value authored for `id` on this node.
    #[must_use]
    pub fn get_explicit(&self, id: PropertyId) -> Option<&Value> {
        self.explicit.get(&id)
    }

    /// Explicitly set properties, in identifier order.
    pub fn explicit(&self) -> impl Iterator<Item = (PropertyId, &Value)> {
        self.explicit.iter().map(|(id, value)| (*id, value))
    }

    /// The parent node's list, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    /// The node this list belongs to.
    #[must_use]
    pub const fn owning_node(&self) -> NodeId {
        self.node
    }

    /// Element name of the owning node, for diagnostics.
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    pub(crate) fn cached_default(&self, id: PropertyId) -> Option<Value> {
        self.defaults.get(&id).map(|cached| cached.value().clone())
    }

    /// Insert `value` unless another thread got there first; either way the
    /// cached value is returned.
    pub(crate) fn cache_default(&self, id: PropertyId, value: Value) -> Value {
        self.defaults.entry(id).or_insert(value).clone()
    }
}

fn join_kinds(kinds: &[ValueKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
