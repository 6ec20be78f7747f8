// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract for the rendering side: extrusion and the scene host.
//!
//! The chart computes outlines, colors, and stack offsets. Turning an outline into a
//! renderable solid and owning that solid in a scene graph is left to the integration:
//!
//! - [`Extruder`] turns a closed [`Outline`] and a depth into a [`Solid`].
//! - [`Solid`] is an opaque handle whose position and surface color the chart mutates.
//! - [`SceneHost`] receives solids to show. The chart only ever calls
//!   [`SceneHost::attach`] and [`SceneHost::detach_all`], and `detach_all` is expected to
//!   drop only what the chart attached, leaving unrelated host children alone.
//!
//! # Update loop sketch
//!
//! ```rust,ignore
//! chart.set_color(FrameAccessor::from_fn(|ctx| palette(ctx.node.depth())));
//! // Colors are rewritten in place; nothing is extruded or re-attached.
//! let report = chart.commit(&mut extruder, &mut group)?;
//! assert_eq!(report.segments_built, 0);
//! ```

use crate::segment::Outline;
use crate::types::Color;

/// A rendered solid produced by an [`Extruder`].
pub trait Solid {
    /// Move the solid along the stacking axis.
    fn set_position(&mut self, z: f64);

    /// Replace the surface color.
    fn set_color(&mut self, color: Color);
}

/// Produces solids from closed 2D outlines.
pub trait Extruder {
    /// Handle type for produced solids.
    type Solid: Solid;

    /// Extrude `outline` along the stacking axis by `depth`.
    fn extrude(&mut self, outline: &Outline, depth: f64) -> Self::Solid;
}

/// The part of a scene graph the chart attaches its solids to.
pub trait SceneHost<S> {
    /// Show `solid`.
    fn attach(&mut self, solid: &S);

    /// Remove every solid previously attached by the chart.
    fn detach_all(&mut self);
}
