// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rose chart basics.
//!
//! Link a small hierarchy, lay it out, build segments, and print what a renderer would get.
//!
//! Run:
//! - `cargo run -p understory_rose_demos --example rose_basics`

use kurbo::Shape;
use understory_rose::{
    Color, Extruder, FrameAccessor, Outline, RoseChart, SceneHost, Solid, TreeNode,
};

/// Stand-in for a mesh: keeps the extruded footprint and where it was placed.
#[derive(Debug)]
struct Prism {
    area: f64,
    depth: f64,
    z: f64,
    color: Color,
}

impl Solid for Prism {
    fn set_position(&mut self, z: f64) {
        self.z = z;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

struct PrismExtruder;

impl Extruder for PrismExtruder {
    type Solid = Prism;

    fn extrude(&mut self, outline: &Outline, depth: f64) -> Prism {
        Prism {
            area: outline.to_path().area().abs(),
            depth,
            z: 0.0,
            color: Color::default(),
        }
    }
}

#[derive(Default)]
struct Group {
    shown: usize,
}

impl SceneHost<Prism> for Group {
    fn attach(&mut self, solid: &Prism) {
        self.shown += 1;
        println!(
            "  attach  z={:>5.1} depth={:>4.1} area={:>9.1} color=#{:06x}",
            solid.z,
            solid.depth,
            solid.area,
            solid.color.to_rgb_u32()
        );
    }

    fn detach_all(&mut self) {
        self.shown = 0;
    }
}

fn main() {
    let data = TreeNode::new("sales", vec![]).with_children([
        TreeNode::new("north", vec![40.0, 55.0, 70.0]).with_children([
            TreeNode::new("oslo", vec![10.0, 20.0, 25.0]),
            TreeNode::new("bergen", vec![30.0, 35.0, 45.0]),
        ]),
        TreeNode::new("south", vec![60.0, 50.0, 30.0])
            .with_child(TreeNode::new("rome", vec![60.0, 50.0, 30.0])),
    ]);

    let mut chart = RoseChart::with_data(data);
    chart.set_color(FrameAccessor::from_fn(|ctx| {
        let shade = 0x40 + 0x30 * ctx.frame as u8;
        Color::rgb(shade, 0x80, 0xff - shade)
    }));

    let mut group = Group::default();
    let report = chart
        .commit(&mut PrismExtruder, &mut group)
        .expect("valid input");
    println!("{report:?}");

    let tree = chart.tree().expect("committed");
    for node in tree.nodes().iter().skip(1) {
        let wedge = node.wedge();
        println!(
            "{:<8} id={} depth={} wedge=[{:.3}, {:.3}]",
            node.name(),
            node.id(),
            node.depth(),
            wedge.start,
            wedge.end
        );
        for seg in chart.segments(node.id()).unwrap_or_default() {
            let label = seg.world_label_anchor();
            println!(
                "    frame {} radii [{:>5.1}, {:>5.1}] bbox {:?} label ({:.1}, {:.1}, {:.1})",
                seg.frame,
                seg.radius_inner,
                seg.radius_outer,
                seg.outline.bounding_box(),
                label.x,
                label.y,
                label.z
            );
        }
    }
    println!("path to rome: {:?}", {
        let rome = tree.nodes().iter().find(|n| n.name() == "rome").expect("present");
        tree.path_to_root(rome.id())
    });
    println!("{} solids shown", group.shown);
}
