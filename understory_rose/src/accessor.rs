// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constant-or-function providers for chart options.
//!
//! Every option accepts either a constant or a function of a context. Passes resolve
//! accessors once per node (or per node and frame) into plain values before any
//! geometry is generated; see [`SegmentParams`](crate::segment::SegmentParams).

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::tree::{RoseNode, RoseTree};

/// Context handed to per-frame accessors.
#[derive(Copy, Clone, Debug)]
pub struct FrameContext<'a> {
    /// The node being resolved.
    pub node: &'a RoseNode,
    /// Frame index.
    pub frame: usize,
}

/// A per-node option.
pub enum NodeAccessor<T> {
    /// Same value for every node.
    Const(T),
    /// Computed from the node.
    Fn(Box<dyn Fn(&RoseNode) -> T>),
}

impl<T: Clone> NodeAccessor<T> {
    /// Wrap a function.
    pub fn from_fn(f: impl Fn(&RoseNode) -> T + 'static) -> Self {
        Self::Fn(Box::new(f))
    }

    /// Resolve for `node`.
    pub fn resolve(&self, node: &RoseNode) -> T {
        match self {
            Self::Const(v) => v.clone(),
            Self::Fn(f) => f(node),
        }
    }
}

impl NodeAccessor<bool> {
    /// Category predicate reading [`TreeNode::category`](crate::TreeNode::category).
    pub fn default_category() -> Self {
        Self::from_fn(RoseNode::category)
    }
}

impl<T> From<T> for NodeAccessor<T> {
    fn from(value: T) -> Self {
        Self::Const(value)
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for NodeAccessor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Const(v) => f.debug_tuple("Const").field(v).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// A per-node, per-frame option.
pub enum FrameAccessor<T> {
    /// Same value everywhere.
    Const(T),
    /// Computed from node and frame.
    Fn(Box<dyn Fn(FrameContext<'_>) -> T>),
}

impl<T: Clone> FrameAccessor<T> {
    /// Wrap a function.
    pub fn from_fn(f: impl Fn(FrameContext<'_>) -> T + 'static) -> Self {
        Self::Fn(Box::new(f))
    }

    /// Resolve for `node` at `frame`.
    pub fn resolve(&self, node: &RoseNode, frame: usize) -> T {
        match self {
            Self::Const(v) => v.clone(),
            Self::Fn(f) => f(FrameContext { node, frame }),
        }
    }
}

impl FrameAccessor<f64> {
    /// Radial scale source reading the node's own values.
    ///
    /// Frames past the end of the series read as `0`.
    pub fn default_scale() -> Self {
        Self::from_fn(|ctx| ctx.node.values().get(ctx.frame).copied().unwrap_or(0.0))
    }
}

impl<T> From<T> for FrameAccessor<T> {
    fn from(value: T) -> Self {
        Self::Const(value)
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for FrameAccessor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Const(v) => f.debug_tuple("Const").field(v).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// Which frames are shown, and in which stacking order.
#[derive(Default)]
pub enum FrameDomain {
    /// Every frame, in numeric order.
    #[default]
    All,
    /// An explicit list; its order is the stacking order.
    Frames(Vec<usize>),
    /// Computed from the tree's frame count.
    Fn(Box<dyn Fn(usize) -> Vec<usize>>),
}

impl FrameDomain {
    /// Wrap a function of the frame count.
    pub fn from_fn(f: impl Fn(usize) -> Vec<usize> + 'static) -> Self {
        Self::Fn(Box::new(f))
    }

    /// Resolve against a tree with `frame_count` frames.
    pub fn resolve(&self, frame_count: usize) -> Vec<usize> {
        match self {
            Self::All => (0..frame_count).collect(),
            Self::Frames(frames) => frames.clone(),
            Self::Fn(f) => f(frame_count),
        }
    }
}

impl core::fmt::Debug for FrameDomain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Frames(frames) => f.debug_tuple("Frames").field(frames).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// Depth levels hidden from display.
pub enum DepthSet {
    /// A fixed set.
    Depths(BTreeSet<u32>),
    /// Computed from the linked tree.
    Fn(Box<dyn Fn(&RoseTree) -> BTreeSet<u32>>),
}

impl DepthSet {
    /// No depth excluded.
    pub fn none() -> Self {
        Self::Depths(BTreeSet::new())
    }

    /// Wrap a function of the tree.
    pub fn from_fn(f: impl Fn(&RoseTree) -> BTreeSet<u32> + 'static) -> Self {
        Self::Fn(Box::new(f))
    }

    /// Resolve against `tree`.
    pub fn resolve(&self, tree: &RoseTree) -> BTreeSet<u32> {
        match self {
            Self::Depths(depths) => depths.clone(),
            Self::Fn(f) => f(tree),
        }
    }
}

impl Default for DepthSet {
    fn default() -> Self {
        Self::none()
    }
}

impl From<BTreeSet<u32>> for DepthSet {
    fn from(depths: BTreeSet<u32>) -> Self {
        Self::Depths(depths)
    }
}

impl<const N: usize> From<[u32; N]> for DepthSet {
    fn from(depths: [u32; N]) -> Self {
        Self::Depths(depths.into_iter().collect())
    }
}

impl core::fmt::Debug for DepthSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Depths(depths) => f.debug_tuple("Depths").field(depths).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}
