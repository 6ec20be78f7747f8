// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree linker: derives a flat, pre-ordered arena from caller input.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;

use crate::accessor::NodeAccessor;
use crate::error::RoseError;
use crate::types::{NodeId, TreeNode, Wedge};

/// Derived per-node state.
///
/// Created by [`RoseTree::link`]; the wedge is filled in by [`layout`](crate::layout::layout).
#[derive(Clone, Debug)]
pub struct RoseNode {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) depth: u32,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) values: Vec<f64>,
    pub(crate) count: Option<usize>,
    pub(crate) category: bool,
    pub(crate) wedge: Wedge,
}

impl RoseNode {
    /// Stable identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Name copied from the input.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Depth in the hierarchy; the root is `0`.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Per-frame samples copied from the input.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The input's `category` field.
    pub fn category(&self) -> bool {
        self.category
    }

    /// True for the root hub.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Child count used for angular partitioning: the explicit override if present,
    /// otherwise the number of children.
    pub fn child_count(&self) -> usize {
        self.count.unwrap_or(self.children.len())
    }

    /// Angular range assigned by the layout engine.
    pub fn wedge(&self) -> Wedge {
        self.wedge
    }

    /// Largest value across all frames, or `0` for an empty series.
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Linked hierarchy.
///
/// Nodes are stored in depth-first pre-order, so the arena doubles as the flat
/// traversal list. Index `0` is the root.
#[derive(Clone, Debug)]
pub struct RoseTree {
    pub(crate) nodes: Vec<RoseNode>,
    ids: BTreeMap<NodeId, usize>,
}

impl RoseTree {
    /// Link `root`: assign depth, parent back-references and identifiers.
    ///
    /// The input is copied, never mutated. Nodes are appended to the flat list before
    /// their children are visited; identifiers are assigned after a node's whole subtree
    /// has been visited, so generated identifiers follow post-order.
    ///
    /// Fails with [`RoseError::DuplicateId`] if two input nodes carry the same identifier.
    pub fn link(root: &TreeNode) -> Result<Self, RoseError> {
        let mut claimed = BTreeSet::new();
        collect_ids(root, &mut claimed)?;

        let mut linker = Linker {
            nodes: Vec::new(),
            claimed: &claimed,
            next_id: 0,
        };
        linker.visit(root, None, 0);

        let ids = linker
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, n)| (n.id, idx))
            .collect();
        Ok(Self {
            nodes: linker.nodes,
            ids,
        })
    }

    /// Check values of every non-root node.
    ///
    /// Values must be finite and non-negative; a node that is not a category node must
    /// have at least one value.
    pub fn validate(&self, is_category: &NodeAccessor<bool>) -> Result<(), RoseError> {
        for node in self.nodes.iter().skip(1) {
            for (frame, &value) in node.values.iter().enumerate() {
                if !value.is_finite() {
                    return Err(RoseError::NonFiniteValue { id: node.id, frame });
                }
                if value < 0.0 {
                    return Err(RoseError::NegativeValue {
                        id: node.id,
                        frame,
                        value,
                    });
                }
            }
            if node.values.is_empty() && !is_category.resolve(node) {
                return Err(RoseError::MissingValues { id: node.id });
            }
        }
        Ok(())
    }

    /// The root hub.
    pub fn root(&self) -> &RoseNode {
        &self.nodes[0]
    }

    /// All nodes in pre-order, root first.
    pub fn nodes(&self) -> &[RoseNode] {
        &self.nodes
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a linked tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by identifier.
    pub fn node(&self, id: NodeId) -> Option<&RoseNode> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    /// Parent of `node`, `None` for the root.
    pub fn parent(&self, node: &RoseNode) -> Option<&RoseNode> {
        node.parent.map(|p| &self.nodes[p])
    }

    /// Children of `node` in input order.
    pub fn children<'a>(&'a self, node: &'a RoseNode) -> impl Iterator<Item = &'a RoseNode> + 'a {
        node.children.iter().map(|&c| &self.nodes[c])
    }

    /// Identifiers from the root to `id` (inclusive). Empty if `id` is unknown.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.index_of(id);
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            out.push(node.id);
            cursor = node.parent;
        }
        out.reverse();
        out
    }

    /// Number of depth levels, root level included.
    pub fn depth_count(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0)
    }

    /// Number of frames: the longest value series among non-root nodes.
    ///
    /// Every non-category node must cover this whole range; a shorter series makes
    /// [`build`](crate::segment::build) fail with [`RoseError::FrameOutOfRange`].
    pub fn frame_count(&self) -> usize {
        self.nodes
            .iter()
            .skip(1)
            .map(|n| n.values.len())
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<usize> {
        self.ids.get(&id).copied()
    }
}

fn collect_ids(node: &TreeNode, claimed: &mut BTreeSet<NodeId>) -> Result<(), RoseError> {
    if let Some(id) = node.id {
        if !claimed.insert(id) {
            return Err(RoseError::DuplicateId { id });
        }
    }
    for child in &node.children {
        collect_ids(child, claimed)?;
    }
    Ok(())
}

struct Linker<'a> {
    nodes: Vec<RoseNode>,
    claimed: &'a BTreeSet<NodeId>,
    next_id: u32,
}

impl Linker<'_> {
    fn visit(&mut self, src: &TreeNode, parent: Option<usize>, depth: u32) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(RoseNode {
            // Placeholder until the subtree has been visited.
            id: NodeId(u32::MAX),
            name: src.name.clone(),
            depth,
            parent,
            children: Vec::with_capacity(src.children.len()),
            values: src.values.clone(),
            count: src.count,
            category: src.category,
            wedge: Wedge::default(),
        });
        for child in &src.children {
            let c = self.visit(child, Some(idx), depth + 1);
            self.nodes[idx].children.push(c);
        }
        self.nodes[idx].id = match src.id {
            Some(id) => id,
            None => self.fresh_id(),
        };
        idx
    }

    fn fresh_id(&mut self) -> NodeId {
        while self.claimed.contains(&NodeId(self.next_id)) {
            self.next_id += 1;
        }
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}
