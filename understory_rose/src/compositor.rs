// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame compositor: decides which segments are shown and stacks them.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::backend::{SceneHost, Solid};
use crate::error::RoseError;
use crate::segment::Segment;
use crate::tree::RoseTree;

/// Attach visible segments to `host`, stacked along the depth axis.
///
/// Everything previously attached is detached first. For each non-root node whose depth
/// is not in `excluded`, the segments of `frames` are attached in the order given, the
/// first at offset `0` and each following one directly on top of the previous
/// (offset += thickness). Returns the number of attached solids.
///
/// Every entry of `frames` must be below `tree.frame_count()`; otherwise nothing is
/// detached or attached and [`RoseError::FrameOutOfRange`] is returned.
pub fn display<S: Solid, H: SceneHost<S>>(
    tree: &RoseTree,
    segments: &mut [Vec<Segment<S>>],
    frames: &[usize],
    excluded: &BTreeSet<u32>,
    host: &mut H,
) -> Result<usize, RoseError> {
    let len = tree.frame_count();
    if let Some(&frame) = frames.iter().find(|&&f| f >= len) {
        return Err(RoseError::FrameOutOfRange {
            id: tree.root().id(),
            frame,
            len,
        });
    }

    host.detach_all();
    let mut attached = 0;
    for (node, node_segments) in tree.nodes().iter().zip(segments.iter_mut()).skip(1) {
        if excluded.contains(&node.depth()) {
            log::trace!("node {} hidden with depth {}", node.id(), node.depth());
            continue;
        }
        let mut z = 0.0;
        for &frame in frames {
            let Some(seg) = node_segments.get_mut(frame) else {
                continue;
            };
            seg.stack_offset = z;
            seg.solid.set_position(z);
            host.attach(&seg.solid);
            attached += 1;
            z += seg.thickness;
        }
    }
    Ok(attached)
}
