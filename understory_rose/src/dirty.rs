// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change tracking for selective invalidation.
//!
//! Every [`RoseChart`](crate::RoseChart) setter records one [`Changes`] bit. At
//! [`commit`](crate::RoseChart::commit) the accumulated set is turned into a [`Plan`]:
//!
//! | Bit | Passes |
//! |---|---|
//! | [`DATA`](Changes::DATA) | link, layout, build, display |
//! | [`LAYOUT`](Changes::LAYOUT) | layout, build, display |
//! | [`GEOMETRY`](Changes::GEOMETRY) | build, display |
//! | [`COLOR`](Changes::COLOR) | recolor in place |
//! | [`DISPLAY`](Changes::DISPLAY) | display |
//!
//! Coarser bits dominate: a rebuild always redisplays, and freshly built segments
//! already carry resolved colors, so recoloring is dropped.

bitflags::bitflags! {
    /// Kinds of pending chart changes.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Changes: u8 {
        /// Input tree or category predicate changed.
        const DATA     = 0b0000_0001;
        /// Angular partitioning mode changed.
        const LAYOUT   = 0b0000_0010;
        /// Resolution, scale, radius offset, or thickness changed.
        const GEOMETRY = 0b0000_0100;
        /// Color changed.
        const COLOR    = 0b0000_1000;
        /// Visible frames or excluded depths changed.
        const DISPLAY  = 0b0001_0000;
    }
}

/// Passes a commit runs, derived from [`Changes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    /// Re-link and re-validate the input tree.
    pub link: bool,
    /// Recompute wedges.
    pub layout: bool,
    /// Discard segments and build new ones.
    pub build: bool,
    /// Rewrite colors of existing segments.
    pub recolor: bool,
    /// Detach and re-attach solids.
    pub display: bool,
}

impl Changes {
    /// The passes needed to apply these changes.
    pub fn plan(self) -> Plan {
        let link = self.contains(Self::DATA);
        let layout = link || self.contains(Self::LAYOUT);
        let build = layout || self.contains(Self::GEOMETRY);
        Plan {
            link,
            layout,
            build,
            recolor: !build && self.contains(Self::COLOR),
            display: build || self.contains(Self::DISPLAY),
        }
    }
}
