// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmark of whole-view and picked-line dimensioning on synthetic grid layouts.
//!
//! Run with: cargo bench -p datum-dims-engine --bench dimensioning

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datum_dims_core::{Datum, DatumTarget, DimensionConfig, DimensionScope, ViewKind};
use datum_dims_engine::{
    build_automatic_dimensions, build_dimension_along_line, AlongLineOptions, PickLine, Scene,
    SceneView,
};
use datum_dims_geometry::{CropBox, Point2, Point3, ViewFrame};

const SPACING: f64 = 7.5;

/// Square layout of `n` vertical and `n` horizontal grids, plus a few diagonals.
fn layout(n: usize) -> Scene {
    let extent = SPACING * n as f64;
    let frame = ViewFrame::plan(Point3::origin(), 100.0).unwrap();
    let crop = CropBox::new(Point2::new(-5.0, -5.0), Point2::new(extent + 5.0, extent + 5.0)).unwrap();
    let mut scene = Scene::new(SceneView::new("bench", ViewKind::FloorPlan, frame).with_crop(crop));

    for i in 0..n {
        let at = SPACING * i as f64;
        scene = scene
            .with_grid(Datum::grid(
                format!("V{i}"),
                Point3::new(at, 0.0, 0.0),
                Point3::new(at, extent, 0.0),
            ))
            .with_grid(Datum::grid(
                format!("H{i}"),
                Point3::new(0.0, at, 0.0),
                Point3::new(extent, at, 0.0),
            ));
    }
    for i in 0..(n / 4).max(1) {
        let at = SPACING * i as f64;
        scene = scene.with_grid(Datum::grid(
            format!("D{i}"),
            Point3::new(at, 0.0, 0.0),
            Point3::new(at + extent / 2.0, extent / 2.0, 0.0),
        ));
    }
    scene
}

fn bench_automatic(c: &mut Criterion) {
    let mut group = c.benchmark_group("automatic");
    let config = DimensionConfig::default();

    for n in [8usize, 32, 128] {
        let scene = layout(n);
        group.throughput(Throughput::Elements(scene.grids().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &scene, |b, scene| {
            b.iter(|| {
                build_automatic_dimensions(
                    Some(scene.view()),
                    scene,
                    DimensionScope::Grids,
                    black_box(&config),
                )
            })
        });
    }
    group.finish();
}

fn bench_along_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("along_line");
    let config = DimensionConfig::default();
    let options = AlongLineOptions {
        include_overall: true,
    };

    for n in [8usize, 32, 128] {
        let scene = layout(n);
        let mid = SPACING * n as f64 / 2.0 + 1.0;
        let pick = PickLine::new(
            Point3::new(-2.0, mid, 0.0),
            Point3::new(SPACING * n as f64 + 2.0, mid, 0.0),
        )
        .unwrap();
        group.throughput(Throughput::Elements(scene.grids().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &scene, |b, scene| {
            b.iter(|| {
                build_dimension_along_line(
                    Some(scene.view()),
                    scene,
                    black_box(&pick),
                    DatumTarget::Grids,
                    &options,
                    &config,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_automatic, bench_along_line);
criterion_main!(benches);
