// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selective updates.
//!
//! Change one option at a time and print which passes each commit ran.
//!
//! Run:
//! - `cargo run -p understory_rose_demos --example rose_selective`

use understory_rose::{
    Color, Extruder, FrameDomain, NodeAccessor, Outline, RoseChart, SceneHost, Solid, TreeNode,
};

struct Token;

impl Solid for Token {
    fn set_position(&mut self, _z: f64) {}

    fn set_color(&mut self, _color: Color) {}
}

#[derive(Default)]
struct Counter {
    extruded: usize,
}

impl Extruder for Counter {
    type Solid = Token;

    fn extrude(&mut self, _outline: &Outline, _depth: f64) -> Token {
        self.extruded += 1;
        Token
    }
}

#[derive(Default)]
struct Host {
    attached: usize,
}

impl SceneHost<Token> for Host {
    fn attach(&mut self, _solid: &Token) {
        self.attached += 1;
    }

    fn detach_all(&mut self) {
        self.attached = 0;
    }
}

fn main() {
    let leaves = |prefix: &str, n: usize| {
        (0..n)
            .map(|i| TreeNode::new(format!("{prefix}{i}"), vec![1.0 + i as f64, 2.0]))
            .collect::<Vec<_>>()
    };
    let data = TreeNode::new("root", vec![]).with_children([
        TreeNode::new("a", vec![3.0, 1.0]).with_children(leaves("a", 3)),
        TreeNode::new("b", vec![2.0, 2.0]).with_children(leaves("b", 1)),
    ]);

    let mut chart = RoseChart::with_data(data);
    let mut extruder = Counter::default();
    let mut host = Host::default();

    let mut step = |label: &str, chart: &mut RoseChart<Token>| {
        let pending = chart.pending();
        match chart.commit(&mut extruder, &mut host) {
            Ok(report) => println!(
                "{label:<16} pending={pending:?}\n{:>16} {report:?} (extruded so far: {}, shown: {})",
                "", extruder.extruded, host.attached
            ),
            Err(err) => println!("{label:<16} failed: {err}"),
        }
    };

    step("initial", &mut chart);

    chart.set_color(Color::rgb(0x20, 0xa0, 0x60));
    step("color", &mut chart);

    chart.set_frames(FrameDomain::Frames(vec![1]));
    step("frames", &mut chart);

    chart.set_excluded_depths([1_u32]);
    step("excluded depth", &mut chart);

    chart.set_resolution(NodeAccessor::from_fn(|n| 8 * n.depth()));
    step("resolution", &mut chart);

    chart.set_fixed_grid(true);
    step("fixed grid", &mut chart);

    chart.set_frames(FrameDomain::Frames(vec![0, 7]));
    step("bad frames", &mut chart);

    chart.set_frames(FrameDomain::All);
    step("recovered", &mut chart);
}
