// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rose::{
    Color, Extruder, FrameAccessor, FrameDomain, Outline, RoseChart, SceneHost, Solid, TreeNode,
};

struct Handle {
    points: usize,
    z: f64,
    color: Color,
}

impl Solid for Handle {
    fn set_position(&mut self, z: f64) {
        self.z = z;
    }

    fn set_color(&mut self, color: Color) {
        self.color = black_box(color);
    }
}

struct Null;

impl Extruder for Null {
    type Solid = Handle;

    fn extrude(&mut self, outline: &Outline, _depth: f64) -> Handle {
        Handle {
            points: outline.len(),
            z: 0.0,
            color: Color::default(),
        }
    }
}

#[derive(Default)]
struct Sink(usize);

impl SceneHost<Handle> for Sink {
    fn attach(&mut self, solid: &Handle) {
        black_box(solid.z);
        self.0 = self
            .0
            .wrapping_add(solid.points)
            .wrapping_add(black_box(solid.color.to_rgb_u32()) as usize);
    }

    fn detach_all(&mut self) {
        self.0 = 0;
    }
}

/// `fanout^depth` leaves with `frames` samples each.
fn gen_tree(fanout: usize, depth: usize, frames: usize) -> TreeNode {
    fn level(name: String, fanout: usize, left: usize, frames: usize, seed: &mut u64) -> TreeNode {
        let values = (0..frames)
            .map(|_| {
                *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((*seed >> 33) % 100) as f64
            })
            .collect::<Vec<_>>();
        let node = TreeNode::new(name.clone(), values);
        if left == 0 {
            return node;
        }
        node.with_children(
            (0..fanout).map(|i| level(format!("{name}.{i}"), fanout, left - 1, frames, seed)),
        )
    }
    let mut seed = 0x1234_5678;
    let children = (0..fanout).map(|i| level(format!("{i}"), fanout, depth - 1, frames, &mut seed));
    TreeNode::new("root", vec![]).with_children(children.collect::<Vec<_>>())
}

fn committed(data: &TreeNode) -> (RoseChart<Handle>, Sink) {
    let mut chart = RoseChart::with_data(data.clone());
    let mut sink = Sink::default();
    chart.commit(&mut Null, &mut sink).unwrap();
    (chart, sink)
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("rose_update");
    for &(fanout, depth, frames) in &[(4_usize, 3_usize, 8_usize), (8, 3, 16)] {
        let data = gen_tree(fanout, depth, frames);
        let nodes: usize = (1..=depth).map(|d| fanout.pow(d as u32)).sum();
        group.throughput(Throughput::Elements((nodes * frames) as u64));
        let tag = format!("{fanout}x{depth}_{frames}f");

        group.bench_function(format!("full_{tag}"), |b| {
            b.iter_batched(
                || RoseChart::<Handle>::with_data(data.clone()),
                |mut chart| {
                    let mut sink = Sink::default();
                    let report = chart.commit(&mut Null, &mut sink).unwrap();
                    black_box(report.segments_built);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("recolor_{tag}"), |b| {
            let (mut chart, mut sink) = committed(&data);
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let color = if flip { Color::rgb(0xff, 0, 0) } else { Color::GREY };
                chart.set_color(FrameAccessor::Const(color));
                let report = chart.commit(&mut Null, &mut sink).unwrap();
                black_box(report.segments_recolored);
            });
        });

        group.bench_function(format!("redisplay_{tag}"), |b| {
            let (mut chart, mut sink) = committed(&data);
            b.iter(|| {
                chart.set_frames(FrameDomain::from_fn(|n| (0..n).rev().collect()));
                let report = chart.commit(&mut Null, &mut sink).unwrap();
                black_box(report.solids_attached);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
