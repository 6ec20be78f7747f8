// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Rose: a Kurbo-native radial (rose/sunburst) chart core for time-indexed hierarchies.
//!
//! Every node of a hierarchy carries a series of non-negative samples, one per frame.
//! The chart gives each node an angular wedge and a concentric ring per depth level, and
//! each frame becomes one extruded ring segment. The segments of a node are stacked along
//! the depth axis in frame order, so a time series reads as a growing column of slices.
//!
//! - Derives a flat, pre-ordered view of caller data with stable identifiers ([`RoseTree`]).
//! - Partitions the circle into contiguous, non-overlapping wedges ([`layout()`]).
//! - Builds annulus-sector outlines and requests solids from an [`Extruder`] ([`build()`]).
//! - Attaches visible segments to a [`SceneHost`], stacked per node ([`display()`]).
//! - Batches option changes and runs only the passes they need ([`RoseChart::commit`]).
//!
//! ## Not a renderer
//!
//! This crate computes geometry, colors, and stack offsets. Turning an [`Outline`] into a
//! mesh and owning it in a scene graph is the integration's job; see [`backend`].
//!
//! ## API overview
//!
//! - [`RoseChart`]: options, derived state, and the batched [`commit`](RoseChart::commit).
//! - [`TreeNode`]: caller-owned input node. The chart never mutates it.
//! - [`NodeAccessor`] / [`FrameAccessor`]: constant-or-function options.
//! - [`FrameDomain`] and [`DepthSet`]: which frames and depth levels are shown.
//! - [`Changes`]: what a setter invalidated; [`UpdateReport`]: what a commit did.
//!
//! The passes are also usable on their own: [`RoseTree::link`], [`layout()`],
//! [`build()`], [`recolor()`], and [`display()`].
//!
//! ## Geometry
//!
//! Each depth level `d >= 1` owns a ring of width [`RING_WIDTH`] starting at
//! `radius_offset + (d - 1) * RING_WIDTH`. Within it a frame's segment reaches out by its
//! value relative to the node's largest value, and never less than one unit.
//!
//! # Example
//!
//! ```rust
//! use understory_rose::{Color, Extruder, Outline, RoseChart, SceneHost, Solid, TreeNode};
//!
//! #[derive(Debug)]
//! struct Mesh { points: usize, z: f64, color: Color }
//!
//! impl Solid for Mesh {
//!     fn set_position(&mut self, z: f64) { self.z = z; }
//!     fn set_color(&mut self, color: Color) { self.color = color; }
//! }
//!
//! struct Meshes;
//!
//! impl Extruder for Meshes {
//!     type Solid = Mesh;
//!     fn extrude(&mut self, outline: &Outline, _depth: f64) -> Mesh {
//!         Mesh { points: outline.len(), z: 0.0, color: Color::default() }
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Group(Vec<f64>);
//!
//! impl SceneHost<Mesh> for Group {
//!     fn attach(&mut self, solid: &Mesh) { self.0.push(solid.z); }
//!     fn detach_all(&mut self) { self.0.clear(); }
//! }
//!
//! let data = TreeNode::new("root", vec![]).with_children([
//!     TreeNode::new("a", vec![3.0, 1.0])
//!         .with_child(TreeNode::new("a1", vec![1.0, 2.0])),
//!     TreeNode::new("b", vec![2.0, 2.0]),
//! ]);
//!
//! let mut chart = RoseChart::with_data(data);
//! let mut group = Group::default();
//! let report = chart.commit(&mut Meshes, &mut group).unwrap();
//! assert_eq!(report.segments_built, 6);
//! assert_eq!(group.0, [0.0, 10.0, 0.0, 10.0, 0.0, 10.0]);
//!
//! // Colors are rewritten in place; nothing is extruded or re-attached.
//! chart.set_color(Color::rgb(0x33, 0x66, 0x99));
//! let report = chart.commit(&mut Meshes, &mut group).unwrap();
//! assert_eq!(report.segments_built, 0);
//! assert_eq!(report.segments_recolored, 6);
//! ```
//!
//! See the `rose_basics` and `rose_selective` demos for runnable versions with printed output.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod accessor;
pub mod backend;
pub mod chart;
pub mod compositor;
pub mod dirty;
pub mod error;
pub mod layout;
pub mod segment;
pub mod tree;
pub mod types;

pub use accessor::{DepthSet, FrameAccessor, FrameContext, FrameDomain, NodeAccessor};
pub use backend::{Extruder, SceneHost, Solid};
pub use chart::{RoseChart, UpdateReport};
pub use compositor::display;
pub use dirty::{Changes, Plan};
pub use error::RoseError;
pub use layout::layout;
pub use segment::{
    FrameParams, Outline, RING_WIDTH, Segment, SegmentAccessors, SegmentParams, build, recolor,
};
pub use tree::{RoseNode, RoseTree};
pub use types::{Color, NodeId, Point3, TreeNode, Wedge};
