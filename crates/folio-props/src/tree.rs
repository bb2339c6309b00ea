//! Property lists for a whole formatting-object tree.

use std::sync::Arc;

use folio_dom::{FoTree, NodeId};
use rayon::prelude::*;
use serde::Serialize;

use crate::error::ResolutionError;
use crate::parse::populate;
use crate::property::PropertyId;
use crate::property_list::PropertyList;
use crate::resolver::Resolver;
use crate::values::Value;

/// An attribute that could not be applied while building a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeError {
    /// The node carrying the attribute.
    pub node: NodeId,
    /// What went wrong.
    pub error: ResolutionError,
}

/// Resolved values of one node.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedNode {
    /// The node.
    #[serde(serialize_with = "serialize_node")]
    pub node: NodeId,
    /// Element name.
    pub element: String,
    /// Resolved values in identifier order. Properties without a value
    /// (shorthands nobody set) are left out.
    pub values: Vec<(PropertyId, Value)>,
    /// Properties whose resolution failed.
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<(PropertyId, ResolutionError)>,
}

fn serialize_node<S: serde::Serializer>(
    node: &NodeId,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(node)
}

fn serialize_errors<S: serde::Serializer>(
    errors: &[(PropertyId, ResolutionError)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(errors.iter().map(|(id, err)| (id, err.to_string())))
}

/// One [`PropertyList`] per node of an [`FoTree`], indexed by [`NodeId`].
#[derive(Debug)]
pub struct PropertyTree {
    lists: Vec<Arc<PropertyList>>,
}

impl PropertyTree {
    /// Parse every node's attributes into property lists, parents first.
    ///
    /// Attributes that fail to parse are skipped and returned alongside the
    /// tree; the rest of the node is still populated.
    #[must_use]
    pub fn build(tree: &FoTree, resolver: &Resolver<'_>) -> (Self, Vec<AttributeError>) {
        let mut slots: Vec<Option<Arc<PropertyList>>> = vec![None; tree.len()];
        let mut errors = Vec::new();

        for id in tree.descendants(tree.root()) {
            let Some(node) = tree.get(id) else { continue };
            let parent = node
                .parent
                .and_then(|parent| slots.get(parent.0).cloned().flatten());
            let mut list = PropertyList::new(id, node.name.as_str(), parent);
            errors.extend(
                populate(resolver, &mut list, &node.attrs)
                    .into_iter()
                    .map(|error| AttributeError { node: id, error }),
            );
            slots[id.0] = Some(Arc::new(list));
        }

        let lists = slots.into_iter().flatten().collect();
        (Self { lists }, errors)
    }

    /// The list of `node`.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&PropertyList> {
        self.lists.get(node.0).map(Arc::as_ref)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Check whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Resolve `ids` on `node`, or `None` if the node is not in the tree.
    ///
    /// Failures are collected per property; properties without any value
    /// are left out.
    #[must_use]
    pub fn resolve_node(
        &self,
        resolver: &Resolver<'_>,
        node: NodeId,
        ids: &[PropertyId],
    ) -> Option<ResolvedNode> {
        let list = self.get(node)?;
        let mut values = Vec::new();
        let mut errors = Vec::new();
        for &id in ids {
            match resolver.resolve(id, list, true, true) {
                Ok(value) => values.push((id, value)),
                Err(ResolutionError::NoConversion { .. }) => {}
                Err(err) => errors.push((id, err)),
            }
        }
        Some(ResolvedNode {
            node,
            element: list.element().to_string(),
            values,
            errors,
        })
    }

    /// Resolve `ids` on every node, nodes in parallel. Results are in
    /// node order.
    #[must_use]
    pub fn resolve_all(&self, resolver: &Resolver<'_>, ids: &[PropertyId]) -> Vec<ResolvedNode> {
        self.lists
            .par_iter()
            .filter_map(|list| self.resolve_node(resolver, list.owning_node(), ids))
            .collect()
    }
}
