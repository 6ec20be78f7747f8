// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segment builder: ring-segment outlines and per-frame solids.
//!
//! Each non-root node gets one [`Segment`] per frame. A segment's outline is an
//! annulus sector bounded by the node's wedge and two radii:
//!
//! - `radius_inner = radius_offset + (depth - 1) * RING_WIDTH`
//! - `radius_outer = radius_inner + max(r, 1)`, where `r` is the frame's value relative
//!   to the node's largest value, scaled to [`RING_WIDTH`] (category nodes use
//!   `RING_WIDTH` directly).
//!
//! The `max(r, 1)` floor keeps every ring strictly non-empty, including zero samples.

use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, Vec2};

use crate::accessor::{FrameAccessor, NodeAccessor};
use crate::backend::{Extruder, Solid};
use crate::error::RoseError;
use crate::tree::{RoseNode, RoseTree};
use crate::types::{Color, Point3, Wedge};

/// Radial extent of one depth level.
pub const RING_WIDTH: f64 = 100.0;

/// Default arc subdivision count.
pub const DEFAULT_RESOLUTION: u32 = 32;

/// Default extrusion depth per frame.
pub const DEFAULT_THICKNESS: f64 = 10.0;

/// Closed 2D polygon in the chart plane.
///
/// The last point connects back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    points: Vec<Point>,
}

impl Outline {
    /// Outline of the annulus sector covering `wedge` between `radius_inner` and
    /// `radius_outer`.
    ///
    /// The outer arc runs from `wedge.start` to `wedge.end` in `resolution` equal steps
    /// (`resolution + 1` points). With a non-zero inner radius the inner arc follows in
    /// reverse, then one point returns to the outer arc's start. With `radius_inner == 0`
    /// the arc is closed through the center instead, giving a pie slice.
    ///
    /// A `resolution` of `0` is treated as `1`.
    pub fn annulus_sector(wedge: Wedge, radius_inner: f64, radius_outer: f64, resolution: u32) -> Self {
        let steps = resolution.max(1);
        let step = wedge.width() / f64::from(steps);
        let at = |i: u32, r: f64| Point::ORIGIN + Vec2::from_angle(wedge.start + step * f64::from(i)) * r;

        let pie = radius_inner == 0.0;
        let cap = if pie { steps as usize + 2 } else { 2 * steps as usize + 3 };
        let mut points = Vec::with_capacity(cap);
        points.extend((0..=steps).map(|i| at(i, radius_outer)));
        if pie {
            points.push(Point::ORIGIN);
        } else {
            points.extend((0..=steps).rev().map(|i| at(i, radius_inner)));
            points.push(points[0]);
        }
        Self { points }
    }

    /// Polygon vertices in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The outline as a closed polyline path.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut it = self.points.iter().copied();
        if let Some(first) = it.next() {
            path.move_to(first);
            for p in it {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }

    /// Axis-aligned bounds of the vertices. [`Rect::ZERO`] when empty.
    pub fn bounding_box(&self) -> Rect {
        let mut it = self.points.iter().copied();
        let Some(first) = it.next() else {
            return Rect::ZERO;
        };
        it.fold(Rect::from_points(first, first), |acc, p| acc.union_pt(p))
    }
}

/// One frame of one node, as built and displayed.
#[derive(Clone, Debug)]
pub struct Segment<S> {
    /// Frame index.
    pub frame: usize,
    /// Outline handed to the extruder.
    pub outline: Outline,
    /// Rendered solid.
    pub solid: S,
    /// Current surface color.
    pub color: Color,
    /// Position along the stacking axis; set by display.
    pub stack_offset: f64,
    /// Label anchor in segment-local space: mid-angle, mid-radius, half thickness.
    pub label_anchor: Point3,
    /// Wedge the outline covers.
    pub wedge: Wedge,
    /// Inner radius.
    pub radius_inner: f64,
    /// Outer radius.
    pub radius_outer: f64,
    /// Extrusion depth; the stack advances by this much.
    pub thickness: f64,
}

impl<S> Segment<S> {
    /// Label anchor in chart space, including the stack offset.
    pub fn world_label_anchor(&self) -> Point3 {
        Point3 {
            z: self.label_anchor.z + self.stack_offset,
            ..self.label_anchor
        }
    }
}

/// Configurable providers used by [`build`].
#[derive(Debug)]
pub struct SegmentAccessors {
    /// Arc subdivision count per node.
    pub resolution: NodeAccessor<u32>,
    /// Value used as the numerator of a frame's radial extent.
    pub scale: FrameAccessor<f64>,
    /// Radius added to every ring of a node.
    pub radius_offset: NodeAccessor<f64>,
    /// Extrusion depth per node and frame.
    pub thickness: FrameAccessor<f64>,
    /// Surface color per node and frame.
    pub color: FrameAccessor<Color>,
    /// Whether a node has a fixed radial extent.
    pub category: NodeAccessor<bool>,
}

impl Default for SegmentAccessors {
    fn default() -> Self {
        Self {
            resolution: NodeAccessor::Const(DEFAULT_RESOLUTION),
            scale: FrameAccessor::default_scale(),
            radius_offset: NodeAccessor::Const(0.0),
            thickness: FrameAccessor::Const(DEFAULT_THICKNESS),
            color: FrameAccessor::Const(Color::default()),
            category: NodeAccessor::default_category(),
        }
    }
}

/// Per-frame part of [`SegmentParams`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameParams {
    /// Scale numerator.
    pub scale: f64,
    /// Extrusion depth.
    pub thickness: f64,
    /// Surface color.
    pub color: Color,
}

/// Accessor values resolved for one node, ready for geometry generation.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentParams {
    /// Arc subdivision count.
    pub resolution: u32,
    /// Radius offset.
    pub radius_offset: f64,
    /// Category status.
    pub category: bool,
    /// Largest value of the node across all frames.
    pub max_value: f64,
    /// One entry per frame.
    pub frames: Vec<FrameParams>,
}

impl SegmentParams {
    /// Resolve `accessors` for `node` over frames `0..frame_count`.
    ///
    /// Non-category nodes must have a value for every frame. Resolved scale and radius
    /// offset must be finite, and thickness finite and non-negative.
    pub fn resolve(
        node: &RoseNode,
        accessors: &SegmentAccessors,
        frame_count: usize,
    ) -> Result<Self, RoseError> {
        let category = accessors.category.resolve(node);
        if !category && node.values().len() < frame_count {
            return Err(RoseError::FrameOutOfRange {
                id: node.id(),
                frame: node.values().len(),
                len: node.values().len(),
            });
        }
        let check = |option: &'static str, frame: usize, value: f64, usable: bool| {
            if usable {
                Ok(())
            } else {
                Err(RoseError::InvalidOption {
                    id: node.id(),
                    option,
                    frame,
                    value,
                })
            }
        };
        let radius_offset = accessors.radius_offset.resolve(node);
        check("radius_offset", 0, radius_offset, radius_offset.is_finite())?;
        let frames = (0..frame_count)
            .map(|frame| -> Result<FrameParams, RoseError> {
                let scale = accessors.scale.resolve(node, frame);
                check("scale", frame, scale, scale.is_finite())?;
                let thickness = accessors.thickness.resolve(node, frame);
                check("thickness", frame, thickness, thickness.is_finite() && thickness >= 0.0)?;
                Ok(FrameParams {
                    scale,
                    thickness,
                    color: accessors.color.resolve(node, frame),
                })
            })
            .collect::<Result<Vec<_>, RoseError>>()?;
        Ok(Self {
            resolution: accessors.resolution.resolve(node),
            radius_offset,
            category,
            max_value: node.max_value(),
            frames,
        })
    }

    /// Radial extent of `frame` before the minimum-width floor.
    pub fn extent(&self, frame: usize) -> f64 {
        if self.category {
            RING_WIDTH
        } else if self.max_value > 0.0 {
            self.frames[frame].scale / self.max_value * RING_WIDTH
        } else {
            0.0
        }
    }
}

/// Build every segment of `tree` for frames `0..tree.frame_count()`.
///
/// Nodes are processed in pre-order, all frames of a node before its children; the
/// root is never built. The result is indexed like [`RoseTree::nodes`], with
/// `result[i][f].frame == f`. Nodes with a degenerate wedge get no segments.
pub fn build<E: Extruder>(
    tree: &RoseTree,
    accessors: &SegmentAccessors,
    extruder: &mut E,
) -> Result<Vec<Vec<Segment<E::Solid>>>, RoseError> {
    let frame_count = tree.frame_count();
    let mut out = Vec::with_capacity(tree.len());
    out.push(Vec::new());
    for node in tree.nodes().iter().skip(1) {
        if node.wedge().is_degenerate() {
            log::trace!("node {} occupies no angular space; skipped", node.id());
            out.push(Vec::new());
            continue;
        }
        let params = SegmentParams::resolve(node, accessors, frame_count)?;
        out.push(build_node(node, &params, extruder));
    }
    Ok(out)
}

fn build_node<E: Extruder>(
    node: &RoseNode,
    params: &SegmentParams,
    extruder: &mut E,
) -> Vec<Segment<E::Solid>> {
    let wedge = node.wedge();
    let radius_inner = params.radius_offset + f64::from(node.depth() - 1) * RING_WIDTH;
    let steps = params.resolution.max(1);
    let step = wedge.width() / f64::from(steps);
    let label_angle = wedge.start + f64::from(steps) / 2.0 * step;

    params
        .frames
        .iter()
        .enumerate()
        .map(|(frame, fp)| {
            let radius_outer = radius_inner + params.extent(frame).max(1.0);
            let outline = Outline::annulus_sector(wedge, radius_inner, radius_outer, steps);
            let mut solid = extruder.extrude(&outline, fp.thickness);
            solid.set_color(fp.color);
            let anchor = Vec2::from_angle(label_angle) * ((radius_inner + radius_outer) * 0.5);
            Segment {
                frame,
                outline,
                solid,
                color: fp.color,
                stack_offset: 0.0,
                label_anchor: Point3::new(anchor.x, anchor.y, fp.thickness * 0.5),
                wedge,
                radius_inner,
                radius_outer,
                thickness: fp.thickness,
            }
        })
        .collect()
}

/// Rewrite segment colors in place from `color`. Returns the number of segments touched.
pub fn recolor<S: Solid>(
    tree: &RoseTree,
    segments: &mut [Vec<Segment<S>>],
    color: &FrameAccessor<Color>,
) -> usize {
    let mut touched = 0;
    for (node, node_segments) in tree.nodes().iter().zip(segments.iter_mut()) {
        for seg in node_segments {
            let c = color.resolve(node, seg.frame);
            seg.color = c;
            seg.solid.set_color(c);
            touched += 1;
        }
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::doubles::CountingExtruder;
    use crate::layout::layout;
    use crate::types::TreeNode;
    use alloc::vec;
    use core::f64::consts::{FRAC_PI_2, PI};
    use kurbo::Shape;

    const EPS: f64 = 1e-9;

    fn linked(input: &TreeNode) -> RoseTree {
        let mut tree = RoseTree::link(input).unwrap();
        layout(&mut tree, false);
        tree
    }

    #[test]
    fn annulus_outline_shape() {
        let outline = Outline::annulus_sector(Wedge::new(0.0, FRAC_PI_2), 100.0, 150.0, 4);
        assert_eq!(outline.len(), 2 * 5 + 1);
        let pts = outline.points();
        assert!((pts[0] - Point::new(150.0, 0.0)).hypot() < EPS);
        assert!((pts[4] - Point::new(0.0, 150.0)).hypot() < EPS);
        // Inner arc walks backward from the end angle.
        assert!((pts[5] - Point::new(0.0, 100.0)).hypot() < EPS);
        assert!((pts[9] - Point::new(100.0, 0.0)).hypot() < EPS);
        assert_eq!(pts[10], pts[0]);

        // Polygon area converges to the true sector area.
        let area = outline.to_path().area().abs();
        let exact = 0.25 * PI * (150.0 * 150.0 - 100.0 * 100.0);
        assert!(area < exact && area > 0.9 * exact);
    }

    #[test]
    fn pie_outline_closes_through_center() {
        let outline = Outline::annulus_sector(Wedge::new(0.0, PI), 0.0, 50.0, 8);
        assert_eq!(outline.len(), 8 + 2);
        assert_eq!(*outline.points().last().unwrap(), Point::ORIGIN);
        let bb = outline.bounding_box();
        assert!((bb.width() - 100.0).abs() < EPS);
        assert!((bb.height() - 50.0).abs() < EPS);
    }

    #[test]
    fn zero_resolution_is_one_chord() {
        let outline = Outline::annulus_sector(Wedge::new(0.0, 1.0), 10.0, 20.0, 0);
        assert_eq!(outline.len(), 5);
    }

    #[test]
    fn radii_follow_depth_and_value() {
        let input = TreeNode::new("root", vec![]).with_child(
            TreeNode::new("a", vec![2.0, 4.0]).with_child(TreeNode::new("a1", vec![1.0, 3.0])),
        );
        let tree = linked(&input);
        let accessors = SegmentAccessors {
            radius_offset: NodeAccessor::Const(20.0),
            ..Default::default()
        };
        let segments = build(&tree, &accessors, &mut CountingExtruder::default()).unwrap();
        assert!(segments[0].is_empty(), "root is never built");

        let a = &segments[1];
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].radius_inner, 20.0);
        assert!((a[0].radius_outer - 70.0).abs() < EPS);
        assert!((a[1].radius_outer - 120.0).abs() < EPS);

        let a1 = &segments[2];
        assert_eq!(a1[0].radius_inner, 120.0);
        assert!((a1[0].radius_outer - (120.0 + 100.0 / 3.0)).abs() < EPS);
        for (f, seg) in a1.iter().enumerate() {
            assert_eq!(seg.frame, f);
            assert!(seg.radius_outer > seg.radius_inner);
        }
    }

    #[test]
    fn zero_values_get_unit_ring() {
        let input = TreeNode::new("root", vec![]).with_children([
            TreeNode::new("z", vec![0.0, 0.0]),
            TreeNode::new("v", vec![1.0, 0.0]),
        ]);
        let tree = linked(&input);
        let segments = build(&tree, &SegmentAccessors::default(), &mut CountingExtruder::default()).unwrap();
        for seg in &segments[1] {
            assert_eq!(seg.radius_outer, seg.radius_inner + 1.0);
        }
        assert_eq!(segments[2][1].radius_outer, segments[2][1].radius_inner + 1.0);
    }

    #[test]
    fn category_nodes_use_full_ring() {
        let input = TreeNode::new("root", vec![])
            .with_child(TreeNode::new("c", vec![]).as_category())
            .with_child(TreeNode::new("v", vec![5.0, 1.0]));
        let tree = linked(&input);
        let segments = build(&tree, &SegmentAccessors::default(), &mut CountingExtruder::default()).unwrap();
        assert_eq!(segments[1].len(), 2);
        for seg in &segments[1] {
            assert_eq!(seg.radius_outer - seg.radius_inner, RING_WIDTH);
        }
    }

    #[test]
    fn short_series_is_out_of_range() {
        let input = TreeNode::new("root", vec![]).with_children([
            TreeNode::new("long", vec![1.0, 2.0, 3.0]),
            TreeNode::new("short", vec![1.0]).with_id(42),
        ]);
        let tree = linked(&input);
        let err = build(&tree, &SegmentAccessors::default(), &mut CountingExtruder::default()).unwrap_err();
        assert_eq!(
            err,
            RoseError::FrameOutOfRange {
                id: crate::NodeId(42),
                frame: 1,
                len: 1,
            }
        );
    }

    #[test]
    fn unusable_option_values_fail() {
        let input = TreeNode::new("root", vec![]).with_child(TreeNode::new("a", vec![1.0, 2.0, 3.0]));
        let tree = linked(&input);
        let mut extruder = CountingExtruder::default();

        let nan_thickness = SegmentAccessors {
            thickness: FrameAccessor::Const(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            build(&tree, &nan_thickness, &mut extruder),
            Err(RoseError::InvalidOption { option: "thickness", frame: 0, .. })
        ));

        let negative_late = SegmentAccessors {
            thickness: FrameAccessor::from_fn(|ctx| if ctx.frame == 2 { -1.0 } else { 5.0 }),
            ..Default::default()
        };
        assert!(matches!(
            build(&tree, &negative_late, &mut extruder),
            Err(RoseError::InvalidOption { option: "thickness", frame: 2, .. })
        ));

        let infinite_scale = SegmentAccessors {
            scale: FrameAccessor::Const(f64::INFINITY),
            ..Default::default()
        };
        assert!(matches!(
            build(&tree, &infinite_scale, &mut extruder),
            Err(RoseError::InvalidOption { option: "scale", .. })
        ));

        let nan_offset = SegmentAccessors {
            radius_offset: NodeAccessor::Const(f64::NAN),
            ..Default::default()
        };
        assert!(matches!(
            build(&tree, &nan_offset, &mut extruder),
            Err(RoseError::InvalidOption { option: "radius_offset", .. })
        ));
        assert_eq!(extruder.made, 0, "nothing is extruded before resolution succeeds");

        let zero_thickness = SegmentAccessors {
            thickness: FrameAccessor::Const(0.0),
            ..Default::default()
        };
        assert!(build(&tree, &zero_thickness, &mut extruder).is_ok());
    }

    #[test]
    fn degenerate_wedges_are_skipped() {
        let input = TreeNode::new("root", vec![]).with_child(
            TreeNode::new("p", vec![1.0])
                .with_count(0)
                .with_child(TreeNode::new("hidden", vec![1.0])),
        );
        let tree = linked(&input);
        let mut extruder = CountingExtruder::default();
        let segments = build(&tree, &SegmentAccessors::default(), &mut extruder).unwrap();
        assert_eq!(segments[1].len(), 1);
        assert!(segments[2].is_empty());
        assert_eq!(extruder.made, 1);
    }

    #[test]
    fn label_anchor_sits_mid_angle_mid_radius() {
        let input = TreeNode::new("root", vec![])
            .with_child(TreeNode::new("a", vec![1.0]))
            .with_child(TreeNode::new("b", vec![1.0]));
        let tree = linked(&input);
        let accessors = SegmentAccessors {
            resolution: NodeAccessor::Const(7),
            thickness: FrameAccessor::Const(4.0),
            ..Default::default()
        };
        let segments = build(&tree, &accessors, &mut CountingExtruder::default()).unwrap();
        let seg = &segments[1][0];
        // Wedge [0, PI), radii [0, 100].
        assert!((seg.label_anchor.x - 0.0).abs() < EPS);
        assert!((seg.label_anchor.y - 50.0).abs() < EPS);
        assert_eq!(seg.label_anchor.z, 2.0);
        assert_eq!(seg.solid.depth, 4.0);
        assert_eq!(seg.solid.points, 7 + 2);
    }

    #[test]
    fn recolor_touches_every_segment() {
        let input = TreeNode::new("root", vec![])
            .with_child(TreeNode::new("a", vec![1.0, 2.0]))
            .with_child(TreeNode::new("b", vec![1.0, 2.0]));
        let tree = linked(&input);
        let mut extruder = CountingExtruder::default();
        let mut segments = build(&tree, &SegmentAccessors::default(), &mut extruder).unwrap();
        let red = Color::rgb(0xff, 0, 0);
        let touched = recolor(&tree, &mut segments, &FrameAccessor::Const(red));
        assert_eq!(touched, 4);
        assert_eq!(extruder.made, 4);
        for seg in segments.iter().flatten() {
            assert_eq!(seg.color, red);
            assert_eq!(seg.solid.color, red);
        }
    }
}
