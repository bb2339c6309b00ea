//! Percentage bases supplied by layout.
//!
//! [XSL 1.1 § 5.9.13 Definitions of Units of Measure](https://www.w3.org/TR/xsl11/)
//!
//! "percentage: a percentage of a property-specific base". Font-relative
//! bases are resolved by the resolver itself; geometric bases depend on
//! layout state this crate does not own, so they are asked for through
//! [`Measurements`].

use std::collections::BTreeMap;

use folio_dom::NodeId;

use crate::registry::PercentBase;
use crate::values::Length;

/// Geometry interface for resolving percentages.
///
/// Implementors answer with the absolute measurement a percentage on `node`
/// is relative to, or `None` if layout has not determined it yet. In that
/// case the percentage is returned unresolved. Implementations must be pure
/// for a given layout state and must not block.
pub trait Measurements: Send + Sync {
    /// The absolute measurement for `base` on `node`.
    fn absolute_measurement(&self, base: PercentBase, node: NodeId) -> Option<Length>;
}

/// Measurements before layout: every geometric base is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeasurements;

impl Measurements for NoMeasurements {
    fn absolute_measurement(&self, _base: PercentBase, _node: NodeId) -> Option<Length> {
        None
    }
}

/// A fixed table of measurements, per node with a tree-wide fallback.
///
/// This is used by the CLI (page size from the command line) and in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedMeasurements {
    fallback: BTreeMap<PercentBase, Length>,
    per_node: BTreeMap<(NodeId, PercentBase), Length>,
}

impl FixedMeasurements {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `length` for `base` on every node without a node-specific entry.
    #[must_use]
    pub fn with(mut self, base: PercentBase, length: Length) -> Self {
        let _ = self.fallback.insert(base, length);
        self
    }

    /// Use `length` for `base` on `node`.
    #[must_use]
    pub fn with_node(mut self, node: NodeId, base: PercentBase, length: Length) -> Self {
        let _ = self.per_node.insert((node, base), length);
        self
    }
}

impl Measurements for FixedMeasurements {
    fn absolute_measurement(&self, base: PercentBase, node: NodeId) -> Option<Length> {
        self.per_node
            .get(&(node, base))
            .or_else(|| self.fallback.get(&base))
            .copied()
    }
}
