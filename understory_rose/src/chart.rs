// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart: configuration, derived state, and the batched update.

use alloc::vec::Vec;

use crate::accessor::{DepthSet, FrameAccessor, FrameDomain, NodeAccessor};
use crate::backend::{Extruder, SceneHost, Solid};
use crate::compositor::display;
use crate::dirty::Changes;
use crate::error::RoseError;
use crate::layout::layout;
use crate::segment::{Segment, SegmentAccessors, build, recolor};
use crate::tree::RoseTree;
use crate::types::{Color, NodeId, TreeNode};

/// What a [`RoseChart::commit`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// The input tree was re-linked and validated.
    pub linked: bool,
    /// Wedges were recomputed.
    pub laid_out: bool,
    /// Number of new segments (and extruded solids).
    pub segments_built: usize,
    /// Number of segments whose color was rewritten in place.
    pub segments_recolored: usize,
    /// Number of solids attached to the host; `0` when display did not run.
    pub solids_attached: usize,
}

/// Radial chart over a time-indexed hierarchy.
///
/// Setters only record what changed; [`commit`](Self::commit) runs the minimal set of
/// passes (see [`dirty`](crate::dirty)). The first commit always runs all of them.
#[derive(Debug)]
pub struct RoseChart<S> {
    data: TreeNode,
    accessors: SegmentAccessors,
    frames: FrameDomain,
    excluded: DepthSet,
    fixed_grid: bool,
    pending: Changes,
    tree: Option<RoseTree>,
    segments: Vec<Vec<Segment<S>>>,
}

impl<S> Default for RoseChart<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RoseChart<S> {
    /// Create an empty chart with default options.
    pub fn new() -> Self {
        Self {
            data: TreeNode::default(),
            accessors: SegmentAccessors::default(),
            frames: FrameDomain::All,
            excluded: DepthSet::none(),
            fixed_grid: false,
            pending: Changes::empty(),
            tree: None,
            segments: Vec::new(),
        }
    }

    /// Create a chart over `data`.
    pub fn with_data(data: TreeNode) -> Self {
        Self {
            data,
            ..Self::new()
        }
    }

    /// Replace the input tree. The chart keeps its own copy.
    pub fn set_data(&mut self, data: TreeNode) {
        self.data = data;
        self.pending |= Changes::DATA;
    }

    /// Replace the category predicate.
    pub fn set_category(&mut self, category: impl Into<NodeAccessor<bool>>) {
        self.accessors.category = category.into();
        self.pending |= Changes::DATA;
    }

    /// Toggle fixed-grid partitioning.
    pub fn set_fixed_grid(&mut self, fixed_grid: bool) {
        if self.fixed_grid != fixed_grid {
            self.fixed_grid = fixed_grid;
            self.pending |= Changes::LAYOUT;
        }
    }

    /// Replace the arc subdivision count.
    pub fn set_resolution(&mut self, resolution: impl Into<NodeAccessor<u32>>) {
        self.accessors.resolution = resolution.into();
        self.pending |= Changes::GEOMETRY;
    }

    /// Replace the radial scale source.
    pub fn set_scale(&mut self, scale: impl Into<FrameAccessor<f64>>) {
        self.accessors.scale = scale.into();
        self.pending |= Changes::GEOMETRY;
    }

    /// Replace the radius offset.
    pub fn set_radius_offset(&mut self, radius_offset: impl Into<NodeAccessor<f64>>) {
        self.accessors.radius_offset = radius_offset.into();
        self.pending |= Changes::GEOMETRY;
    }

    /// Replace the per-frame thickness.
    pub fn set_thickness(&mut self, thickness: impl Into<FrameAccessor<f64>>) {
        self.accessors.thickness = thickness.into();
        self.pending |= Changes::GEOMETRY;
    }

    /// Replace the per-frame color.
    pub fn set_color(&mut self, color: impl Into<FrameAccessor<Color>>) {
        self.accessors.color = color.into();
        self.pending |= Changes::COLOR;
    }

    /// Replace the visible frame domain.
    pub fn set_frames(&mut self, frames: FrameDomain) {
        self.frames = frames;
        self.pending |= Changes::DISPLAY;
    }

    /// Replace the set of hidden depth levels.
    pub fn set_excluded_depths(&mut self, excluded: impl Into<DepthSet>) {
        self.excluded = excluded.into();
        self.pending |= Changes::DISPLAY;
    }

    /// Record changes made through a channel the setters do not cover.
    pub fn invalidate(&mut self, changes: Changes) {
        self.pending |= changes;
    }

    /// Changes recorded since the last successful commit.
    pub fn pending(&self) -> Changes {
        self.pending
    }

    /// The chart's copy of the input tree.
    pub fn data(&self) -> &TreeNode {
        &self.data
    }

    /// Derived tree, once a commit has succeeded.
    pub fn tree(&self) -> Option<&RoseTree> {
        self.tree.as_ref()
    }

    /// Built segments of node `id`, indexed by frame.
    pub fn segments(&self, id: NodeId) -> Option<&[Segment<S>]> {
        let idx = self.tree.as_ref()?.index_of(id)?;
        self.segments.get(idx).map(Vec::as_slice)
    }

    /// Iterate all built segments in node pre-order.
    pub fn all_segments(&self) -> impl Iterator<Item = &Segment<S>> + '_ {
        self.segments.iter().flatten()
    }
}

impl<S: Solid> RoseChart<S> {
    /// Apply pending changes.
    ///
    /// New solids come from `extruder` and visible ones are attached to `host`. On error
    /// the chart keeps its previous derived state and its pending changes, so a later
    /// commit with corrected inputs picks up where this one failed.
    pub fn commit<E, H>(&mut self, extruder: &mut E, host: &mut H) -> Result<UpdateReport, RoseError>
    where
        E: Extruder<Solid = S>,
        H: SceneHost<S>,
    {
        let changes = if self.tree.is_none() {
            Changes::all()
        } else {
            self.pending
        };
        if changes.is_empty() {
            log::trace!("commit: nothing pending");
            return Ok(UpdateReport::default());
        }
        let plan = changes.plan();
        log::debug!("commit: {changes:?} -> {plan:?}");
        let mut report = UpdateReport::default();

        let mut staged_tree = None;
        if plan.link {
            let tree = RoseTree::link(&self.data)?;
            tree.validate(&self.accessors.category)?;
            log::debug!(
                "linked {} nodes, {} levels, {} frames",
                tree.len(),
                tree.depth_count(),
                tree.frame_count()
            );
            report.linked = true;
            staged_tree = Some(tree);
        }
        if plan.layout {
            let mut tree = match (staged_tree.take(), &self.tree) {
                (Some(tree), _) => tree,
                (None, Some(current)) => current.clone(),
                (None, None) => RoseTree::link(&self.data)?,
            };
            layout(&mut tree, self.fixed_grid);
            report.laid_out = true;
            staged_tree = Some(tree);
        }
        let Some(tree) = staged_tree.as_ref().or(self.tree.as_ref()) else {
            return Ok(report);
        };

        let mut staged_segments = None;
        if plan.build {
            let segments = build(tree, &self.accessors, extruder)?;
            report.segments_built = segments.iter().map(Vec::len).sum();
            log::debug!("built {} segments", report.segments_built);
            staged_segments = Some(segments);
        } else if plan.recolor {
            report.segments_recolored = recolor(tree, &mut self.segments, &self.accessors.color);
            log::debug!("recolored {} segments", report.segments_recolored);
        }

        if plan.display {
            let frames = self.frames.resolve(tree.frame_count());
            let excluded = self.excluded.resolve(tree);
            let segments = staged_segments.as_mut().unwrap_or(&mut self.segments);
            report.solids_attached = display(tree, segments, &frames, &excluded, host)?;
            log::debug!(
                "displayed {} solids over {} frames",
                report.solids_attached,
                frames.len()
            );
        }

        if let Some(tree) = staged_tree {
            self.tree = Some(tree);
        }
        if let Some(segments) = staged_segments {
            self.segments = segments;
        }
        self.pending = Changes::empty();
        Ok(report)
    }
}
