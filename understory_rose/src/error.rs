// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by linking, building, and displaying a chart.

use crate::types::NodeId;

/// Failure of a chart pass.
///
/// Every error is local to the [`RoseChart::commit`](crate::RoseChart::commit) call that
/// produced it. Inputs are deterministic, so retrying without changing them fails the same way.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RoseError {
    /// A non-category node has no values at all.
    #[error("node {id} has no values but is not a category node")]
    MissingValues {
        /// Offending node.
        id: NodeId,
    },
    /// A value is NaN or infinite.
    #[error("node {id} has a non-finite value at frame {frame}")]
    NonFiniteValue {
        /// Offending node.
        id: NodeId,
        /// Frame index of the value.
        frame: usize,
    },
    /// A value is below zero.
    #[error("node {id} has negative value {value} at frame {frame}")]
    NegativeValue {
        /// Offending node.
        id: NodeId,
        /// Frame index of the value.
        frame: usize,
        /// The value itself.
        value: f64,
    },
    /// Two caller-supplied nodes share an identifier.
    #[error("identifier {id} is used by more than one node")]
    DuplicateId {
        /// The shared identifier.
        id: NodeId,
    },
    /// An option resolved to a value geometry cannot use: not finite, or a negative
    /// thickness.
    #[error("node {id} resolved {option} to unusable value {value} at frame {frame}")]
    InvalidOption {
        /// Node the option was resolved for.
        id: NodeId,
        /// Option name, such as `"thickness"`.
        option: &'static str,
        /// Frame index; `0` for per-node options.
        frame: usize,
        /// The resolved value.
        value: f64,
    },
    /// A frame index does not address a node's values (or the tree's frame range).
    ///
    /// Segments are built for every frame of the tree, so each non-category node needs a
    /// value for every frame up to [`RoseTree::frame_count`](crate::RoseTree::frame_count),
    /// whatever the visible frame domain.
    #[error("frame {frame} is out of range for node {id} with {len} frames")]
    FrameOutOfRange {
        /// Node whose values were addressed.
        id: NodeId,
        /// Requested frame.
        frame: usize,
        /// Number of frames available.
        len: usize,
    },
}
