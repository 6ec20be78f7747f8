// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angular layout: partitions the circle into one wedge per node.

use crate::tree::RoseTree;
use crate::types::Wedge;

/// Assign a [`Wedge`] to every node of `tree`.
///
/// The root spans the full circle. A node's children form one contiguous group of
/// `child_count` slots, centered on the node's angular midpoint; each child takes one
/// slot in input order.
///
/// The slot width is the node's width divided by its own child count, or, with
/// `fixed_grid`, by the largest child count among the node and its siblings. The latter
/// gives every sibling group at a level the same slot width.
///
/// Nodes with a zero child count are left unsubdivided, with or without `fixed_grid`;
/// any children they have keep an empty wedge and are not rendered.
pub fn layout(tree: &mut RoseTree, fixed_grid: bool) {
    for node in &mut tree.nodes {
        node.wedge = Wedge::default();
    }
    let Some(root) = tree.nodes.first_mut() else {
        return;
    };
    root.wedge = Wedge::FULL;

    // Pre-order storage: a parent's wedge is final before its children are visited.
    for idx in 0..tree.nodes.len() {
        let node = &tree.nodes[idx];
        if node.children.is_empty() {
            continue;
        }
        let count = node.child_count();
        if count == 0 {
            log::trace!("node {} has a zero child count; not subdivided", node.id);
            continue;
        }
        let group_count = match node.parent {
            Some(p) if fixed_grid => tree.nodes[p]
                .children
                .iter()
                .map(|&s| tree.nodes[s].child_count())
                .max()
                .unwrap_or(count),
            _ => count,
        };

        let wedge = node.wedge;
        let slot = wedge.width() / group_count as f64;
        let group = slot * count as f64;
        let start = wedge.mid() - group * 0.5;
        let children = node.children.clone();
        for (i, c) in children.into_iter().enumerate() {
            let s = start + slot * i as f64;
            tree.nodes[c].wedge = Wedge::new(s, s + slot);
        }
    }
}
