// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the rose chart: node identifiers, caller input, wedges, and colors.

use alloc::string::String;
use alloc::vec::Vec;

/// Stable identifier for a node in the chart hierarchy.
///
/// Identifiers come from two places:
///
/// - A caller may supply one on [`TreeNode::id`]; it is kept verbatim.
/// - Otherwise [`RoseTree::link`](crate::RoseTree::link) assigns one from a post-order
///   counter that skips every identifier already claimed by the caller.
///
/// Re-linking a tree with unchanged structure yields the same identifiers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(pub u32);

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Caller-supplied hierarchy node.
///
/// This is plain input data. The chart never mutates it; linking copies what it needs
/// into a [`RoseTree`](crate::RoseTree).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TreeNode {
    /// Display name. Not interpreted by the layout.
    pub name: String,
    /// Optional stable identifier. See [`NodeId`] for how missing ones are filled.
    pub id: Option<NodeId>,
    /// One sample per frame.
    pub values: Vec<f64>,
    /// Child-count override used only for angular partitioning.
    pub count: Option<usize>,
    /// Default source for the category predicate: a category node has a fixed radial extent.
    pub category: bool,
    /// Ordered children.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a node with a name and per-frame values.
    pub fn new(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            values: values.into(),
            ..Default::default()
        }
    }

    /// Builder: append a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: replace the children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Builder: set an explicit identifier.
    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(NodeId(id));
        self
    }

    /// Builder: override the child count used for angular partitioning.
    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    /// Builder: mark as a category node.
    #[must_use]
    pub fn as_category(mut self) -> Self {
        self.category = true;
        self
    }
}

/// Angular interval `[start, end)` in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Wedge {
    /// Start angle (radians).
    pub start: f64,
    /// End angle (radians).
    pub end: f64,
}

impl Wedge {
    /// The full circle `[0, 2π)`.
    pub const FULL: Self = Self {
        start: 0.0,
        end: core::f64::consts::TAU,
    };

    /// Create a wedge.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Angular width. Negative for inverted wedges.
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    /// Angular midpoint.
    pub fn mid(self) -> f64 {
        (self.start + self.end) * 0.5
    }

    /// True when the wedge covers no angular space (`start >= end`).
    pub fn is_degenerate(self) -> bool {
        self.start >= self.end
    }
}

/// 8-bit sRGB color with alpha.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Mid grey, the default segment color.
    pub const GREY: Self = Self::from_rgb_u32(0x80_80_80);

    /// Opaque color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Opaque color from a packed `0xRRGGBB` value.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Each channel is masked to 8 bits before narrowing."
    )]
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as u8,
            ((rgb >> 8) & 0xff) as u8,
            (rgb & 0xff) as u8,
        )
    }

    /// Packed `0xRRGGBB` value (alpha dropped).
    pub const fn to_rgb_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREY
    }
}

/// A point in chart space. `x`/`y` lie in the chart plane, `z` runs along the stacking axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate (stacking axis).
    pub z: f64,
}

impl Point3 {
    /// Create a point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
