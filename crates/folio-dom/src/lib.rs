//! Formatting-object tree for the Folio property engine.
//!
//! This crate provides an arena-based tree of formatting objects (`fo:root`,
//! `fo:block`, `fo:inline`, ...). It is the node collaborator of the property
//! engine: it owns the parent/child structure and the raw attribute text,
//! while `folio-props` owns the parsed values.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Nodes can
//! only be attached below an existing parent, so the tree is acyclic by
//! construction.

use std::collections::BTreeMap;
use std::fmt;

/// Map of attribute names to their specified text, ordered by name.
///
/// Ordered so that shorthand attributes (`border`) are applied before
/// the component attributes that refine them (`border.width`), regardless of
/// the order the caller inserted them.
pub type AttributesMap = BTreeMap<String, String>;

/// A type-safe index into the formatting-object tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root formatting object is always at index 0.
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A formatting object with its tree links.
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct FoNode {
    /// Qualified element name, e.g. `fo:block`.
    pub name: String,
    /// Attributes exactly as authored.
    pub attrs: AttributesMap,
    /// Parent formatting object; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// The node immediately following this one among its parent's children.
    pub next_sibling: Option<NodeId>,
    /// The node immediately preceding this one among its parent's children.
    pub prev_sibling: Option<NodeId>,
}

/// Arena-based formatting-object tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent/sibling traversal
/// - No borrowing issues (indices instead of references)
#[derive(Debug, Clone)]
pub struct FoTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The root formatting object is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<FoNode>,
}

impl FoTree {
    /// Create a new tree holding only the root formatting object.
    #[must_use]
    pub fn new(root_name: &str, root_attrs: AttributesMap) -> Self {
        Self {
            nodes: vec![FoNode {
                name: root_name.to_string(),
                attrs: root_attrs,
                parent: None,
                children: Vec::new(),
                next_sibling: None,
                prev_sibling: None,
            }],
        }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&FoNode> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it always holds at least the root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new formatting object below `parent` and return its ID.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        name: &str,
        attrs: AttributesMap,
    ) -> Option<NodeId> {
        let prev_last_child = self.get(parent)?.children.last().copied();

        let id = NodeId(self.nodes.len());
        self.nodes.push(FoNode {
            name: name.to_string(),
            attrs,
            parent: Some(parent),
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: prev_last_child,
        });

        self.nodes[parent.0].children.push(id);
        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(id);
        }
        Some(id)
    }

    /// Set (or replace) an attribute on an existing node.
    ///
    /// Returns the previous text of the attribute, if any.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Option<String> {
        self.nodes
            .get_mut(id.0)?
            .attrs
            .insert(name.to_string(), value.to_string())
    }

    /// Get the element name of a node.
    #[must_use]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[][..], |n| n.children.as_slice())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Number of ancestors between `id` and the root (the root has depth 0).
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and its descendants in document (pre-)order.
    ///
    /// Every node is yielded after its parent, which is the order property
    /// lists must be built in.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        DescendantIterator {
            tree: self,
            stack: if self.get(id).is_some() { vec![id] } else { Vec::new() },
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a FoTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantIterator<'a> {
    tree: &'a FoTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push in reverse so the first child is visited next.
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
