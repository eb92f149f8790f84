// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end dimensioning scenarios against the in-memory host.

use approx::assert_relative_eq;
use datum_dims_core::{
    ChainKind, Datum, DatumCategory, DatumGeometry, DatumId, DatumTarget, DimensionChain,
    DimensionConfig, DimensionScope, Error, GridCurve, ViewKind,
};
use datum_dims_engine::{
    build_automatic_dimensions, build_dimension_along_line, dimension_along_picked_line,
    dimension_view, AlongLineOptions, PickLine, RecordingDocument, Scene, SceneView,
    ScriptedPicker,
};
use datum_dims_geometry::{CropBox, Point2, Point3, SkipReason, Vector3, ViewFrame};

const MM_PER_FOOT: f64 = 304.8;

fn plan_view(scale: f64) -> SceneView {
    let frame = ViewFrame::plan(Point3::origin(), scale).unwrap();
    let crop = CropBox::new(Point2::new(-10.0, 0.0), Point2::new(30.0, 50.0)).unwrap();
    SceneView::new("plan-1", ViewKind::FloorPlan, frame).with_crop(crop)
}

fn section_view() -> SceneView {
    let frame = ViewFrame::from_right_up(Point3::origin(), Vector3::x(), Vector3::z(), 100.0)
        .unwrap();
    let crop = CropBox::new(Point2::new(-10.0, -5.0), Point2::new(40.0, 35.0)).unwrap();
    SceneView::new("section-1", ViewKind::Section, frame).with_crop(crop)
}

fn vgrid(id: &str, x: f64) -> Datum {
    Datum::grid(id, Point3::new(x, 0.0, 0.0), Point3::new(x, 50.0, 0.0))
}

fn hgrid(id: &str, y: f64) -> Datum {
    Datum::grid(id, Point3::new(-5.0, y, 0.0), Point3::new(25.0, y, 0.0))
}

fn ids(chain: &DimensionChain) -> Vec<&str> {
    chain.references.iter().map(DatumId::as_str).collect()
}

fn s1_scene(scale: f64) -> Scene {
    Scene::new(plan_view(scale))
        .with_grid(vgrid("2", 20.0))
        .with_grid(vgrid("1", 0.0))
}

#[test]
fn s1_vertical_grids_get_individual_and_overall_chains() {
    let scene = s1_scene(100.0);
    let config = DimensionConfig::default();
    let chains =
        build_automatic_dimensions(Some(scene.view()), &scene, DimensionScope::Grids, &config)
            .unwrap();

    assert_eq!(chains.len(), 2);
    let individual = &chains[0];
    let overall = &chains[1];
    assert_eq!(individual.kind, ChainKind::Individual);
    assert_eq!(ids(individual), vec!["1", "2"]);

    let gap = 8.0 / MM_PER_FOOT * 100.0;
    assert_relative_eq!(individual.anchor.start.y, 50.0 + gap, epsilon = 1e-9);
    assert_relative_eq!(individual.anchor.end.y, 50.0 + gap, epsilon = 1e-9);
    assert_relative_eq!(individual.anchor.start.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(individual.anchor.end.x, 20.0, epsilon = 1e-9);

    assert_eq!(overall.kind, ChainKind::Overall);
    assert_eq!(ids(overall), vec!["1", "2"]);
    let overall_gap = gap + 6.0 / MM_PER_FOOT * 100.0;
    assert_relative_eq!(overall.anchor.start.y, 50.0 + overall_gap, epsilon = 1e-9);
}

#[test]
fn s2_parallel_pick_collects_all_horizontal_grids() {
    let scene = Scene::new(plan_view(100.0))
        .with_grid(hgrid("C", 20.0))
        .with_grid(hgrid("A", 0.0))
        .with_grid(hgrid("B", 10.0));
    let pick = PickLine::new(Point3::new(-5.0, 5.0, 0.0), Point3::new(25.0, 5.0, 0.0)).unwrap();
    let chains = build_dimension_along_line(
        Some(scene.view()),
        &scene,
        &pick,
        DatumTarget::Grids,
        &AlongLineOptions::default(),
        &DimensionConfig::default(),
    )
    .unwrap();

    assert_eq!(chains.len(), 1);
    assert_eq!(ids(&chains[0]), vec!["A", "B", "C"]);
    assert_eq!(chains[0].positions, vec![0.0, 10.0, 20.0]);
}

#[test]
fn s3_levels_inside_picked_elevation_range() {
    let scene = Scene::new(section_view())
        .with_level(Datum::level("L30", 30.0))
        .with_level(Datum::level("L0", 0.0))
        .with_level(Datum::level("L20", 20.0))
        .with_level(Datum::level("L10", 10.0));
    let pick = PickLine::new(Point3::new(5.0, 0.0, 8.0), Point3::new(5.0, 0.0, 22.0)).unwrap();
    let chains = build_dimension_along_line(
        Some(scene.view()),
        &scene,
        &pick,
        DatumTarget::Levels,
        &AlongLineOptions::default(),
        &DimensionConfig::default(),
    )
    .unwrap();

    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].category, DatumCategory::Level);
    assert_eq!(ids(&chains[0]), vec!["L10", "L20"]);
    assert_relative_eq!(chains[0].anchor.start, Point3::new(5.0, 0.0, 10.0));
    assert_relative_eq!(chains[0].anchor.end, Point3::new(5.0, 0.0, 20.0));
}

#[test]
fn s4_zero_length_grid_is_skipped_not_fatal() {
    let scene = s1_scene(100.0).with_grid(Datum::grid(
        "X",
        Point3::new(5.0, 5.0, 0.0),
        Point3::new(5.0, 5.0, 0.0),
    ));
    let mut doc = RecordingDocument::new();
    let report = dimension_view(
        Some(scene.view()),
        &scene,
        &mut doc,
        DimensionScope::Grids,
        &DimensionConfig::default(),
    )
    .unwrap();

    assert_eq!(report.chains.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id.as_str(), "X");
    assert_eq!(report.skipped[0].reason, SkipReason::ZeroLengthDirection);
    assert_eq!(doc.dimensions().len(), 2);
}

#[test]
fn s4_zero_sweep_arc_is_skipped() {
    let arc = Datum {
        id: DatumId::new("ARC0"),
        name: None,
        geometry: DatumGeometry::Grid(GridCurve::Arc {
            center: Point3::new(10.0, 25.0, 0.0),
            radius: 10.0,
            start_angle: 0.0,
            end_angle: 0.0,
        }),
    };
    let scene = Scene::new(plan_view(100.0))
        .with_grid(arc)
        .with_grid(vgrid("G", 0.0));

    let err = build_automatic_dimensions(
        Some(scene.view()),
        &scene,
        DimensionScope::Grids,
        &DimensionConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::InsufficientCandidates { found: 1 }));
}

#[test]
fn s5_tied_groups_resolve_deterministically() {
    // Two diagonal families at +45 and -45 degrees; a pick along +X scores
    // both at 0.707.
    let scene = Scene::new(plan_view(100.0))
        .with_grid(Datum::grid("P2", Point3::new(0.0, 10.0, 0.0), Point3::new(20.0, 30.0, 0.0)))
        .with_grid(Datum::grid("P1", Point3::new(0.0, 0.0, 0.0), Point3::new(20.0, 20.0, 0.0)))
        .with_grid(Datum::grid("N1", Point3::new(0.0, 30.0, 0.0), Point3::new(20.0, 10.0, 0.0)))
        .with_grid(Datum::grid("N2", Point3::new(0.0, 40.0, 0.0), Point3::new(30.0, 10.0, 0.0)));
    let pick = PickLine::new(Point3::new(-2.0, 15.0, 0.0), Point3::new(32.0, 15.0, 0.0)).unwrap();

    let run = || {
        build_dimension_along_line(
            Some(scene.view()),
            &scene,
            &pick,
            DatumTarget::Grids,
            &AlongLineOptions::default(),
            &DimensionConfig::default(),
        )
        .unwrap()
    };
    let first = run();
    for _ in 0..10 {
        assert_eq!(run(), first);
    }
    // Equal score and size: the group holding "N1" wins over "P1".
    assert_eq!(ids(&first[0]), vec!["N1", "N2"]);
}

#[test]
fn overall_chain_spans_individual_ends() {
    let scene = Scene::new(plan_view(100.0))
        .with_grid(vgrid("3", 25.0))
        .with_grid(vgrid("1", 0.0))
        .with_grid(vgrid("2", 10.0))
        .with_grid(hgrid("B", 40.0))
        .with_grid(hgrid("A", 5.0));
    let chains = build_automatic_dimensions(
        Some(scene.view()),
        &scene,
        DimensionScope::Grids,
        &DimensionConfig::default(),
    )
    .unwrap();

    assert_eq!(chains.len(), 4);
    for pair in chains.chunks(2) {
        let (individual, overall) = (&pair[0], &pair[1]);
        assert_eq!(individual.kind, ChainKind::Individual);
        assert_eq!(overall.kind, ChainKind::Overall);
        assert_eq!(overall.references.len(), 2);
        assert_eq!(overall.first(), individual.first());
        assert_eq!(overall.last(), individual.last());
    }
}

#[test]
fn chains_are_monotonic_and_never_short() {
    let scene = Scene::new(plan_view(100.0))
        .with_grid(vgrid("b", 17.5))
        .with_grid(vgrid("a", -3.0))
        .with_grid(vgrid("d", 29.0))
        .with_grid(vgrid("c", 17.5))
        .with_grid(hgrid("solo", 12.0));
    let chains = build_automatic_dimensions(
        Some(scene.view()),
        &scene,
        DimensionScope::Grids,
        &DimensionConfig::default(),
    )
    .unwrap();

    // The single horizontal grid produces nothing.
    assert_eq!(chains.len(), 2);
    for chain in &chains {
        assert!(chain.len() >= 2);
        assert!(chain.positions.windows(2).all(|w| w[0] <= w[1]));
    }
    assert_eq!(ids(&chains[0]), vec!["a", "b", "c", "d"]);
}

#[test]
fn single_grid_is_insufficient() {
    let scene = Scene::new(plan_view(100.0)).with_grid(vgrid("1", 0.0));
    let err = build_automatic_dimensions(
        Some(scene.view()),
        &scene,
        DimensionScope::Grids,
        &DimensionConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err, Error::InsufficientCandidates { found: 1 });
}

#[test]
fn doubling_scale_doubles_offsets_and_keeps_orientation() {
    let config = DimensionConfig::default();
    let at = |scale: f64| {
        let scene = s1_scene(scale);
        build_automatic_dimensions(Some(scene.view()), &scene, DimensionScope::Grids, &config)
            .unwrap()
    };
    let base = at(100.0);
    let doubled = at(200.0);

    for (a, b) in base.iter().zip(&doubled) {
        assert_relative_eq!(
            b.anchor.start.y - 50.0,
            2.0 * (a.anchor.start.y - 50.0),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            b.anchor.direction().unwrap(),
            a.anchor.direction().unwrap(),
            epsilon = 1e-12
        );
    }
}

#[test]
fn rotated_view_dimensions_in_view_frame() {
    let angle: f64 = 0.4;
    let right = Vector3::new(angle.cos(), angle.sin(), 0.0);
    let up = Vector3::new(-angle.sin(), angle.cos(), 0.0);
    let frame = ViewFrame::from_right_up(Point3::new(2.0, 3.0, 0.0), right, up, 100.0).unwrap();
    let crop = CropBox::new(Point2::new(-10.0, 0.0), Point2::new(30.0, 50.0)).unwrap();
    let local = |x: f64, y: f64| frame.to_model_2d(&Point2::new(x, y));

    let scene = Scene::new(SceneView::new("rotated", ViewKind::FloorPlan, frame.clone()).with_crop(crop))
        .with_grid(Datum::grid("2", local(20.0, 0.0), local(20.0, 50.0)))
        .with_grid(Datum::grid("1", local(0.0, 0.0), local(0.0, 50.0)));
    let chains = build_automatic_dimensions(
        Some(scene.view()),
        &scene,
        DimensionScope::Grids,
        &DimensionConfig::default(),
    )
    .unwrap();

    let gap = 8.0 / MM_PER_FOOT * 100.0;
    let start = frame.to_local(&chains[0].anchor.start);
    let end = frame.to_local(&chains[0].anchor.end);
    assert_relative_eq!(start.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(end.x, 20.0, epsilon = 1e-9);
    assert_relative_eq!(start.y, 50.0 + gap, epsilon = 1e-9);
    assert_relative_eq!(end.y, 50.0 + gap, epsilon = 1e-9);
}

#[test]
fn section_view_dimensions_grids_and_levels() {
    let scene = Scene::new(section_view())
        .with_grid(Datum::grid("1", Point3::new(0.0, 0.0, -5.0), Point3::new(0.0, 0.0, 35.0)))
        .with_grid(Datum::grid("2", Point3::new(12.0, 0.0, -5.0), Point3::new(12.0, 0.0, 35.0)))
        .with_level(Datum::level("L1", 0.0))
        .with_level(Datum::level("L2", 15.0));
    let chains = build_automatic_dimensions(
        Some(scene.view()),
        &scene,
        DimensionScope::Both,
        &DimensionConfig::default(),
    )
    .unwrap();

    assert_eq!(chains.len(), 4);
    let levels = &chains[2];
    assert_eq!(levels.category, DatumCategory::Level);
    let gap = 8.0 / MM_PER_FOOT * 100.0;
    assert_relative_eq!(levels.anchor.start, Point3::new(-10.0 - gap, 0.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(levels.anchor.end, Point3::new(-10.0 - gap, 0.0, 15.0), epsilon = 1e-9);
}

#[test]
fn view_preconditions_are_checked_in_order() {
    let config = DimensionConfig::default();
    let scene = s1_scene(100.0);

    assert_eq!(
        build_automatic_dimensions(None, &scene, DimensionScope::Grids, &config),
        Err(Error::NoActiveView)
    );

    let template = Scene::new(plan_view(100.0).as_template());
    assert_eq!(
        build_automatic_dimensions(Some(template.view()), &template, DimensionScope::Grids, &config),
        Err(Error::TemplateView)
    );

    assert!(matches!(
        build_automatic_dimensions(Some(scene.view()), &scene, DimensionScope::Levels, &config),
        Err(Error::UnsupportedViewType { .. })
    ));

    let uncropped = Scene::new(plan_view(100.0).with_crop_inactive()).with_grid(vgrid("1", 0.0));
    assert_eq!(
        build_automatic_dimensions(Some(uncropped.view()), &uncropped, DimensionScope::Grids, &config),
        Err(Error::CropNotActive)
    );
}

#[test]
fn rejected_reference_rolls_back_everything() {
    let scene = Scene::new(plan_view(100.0))
        .with_grid(vgrid("1", 0.0))
        .with_grid(vgrid("2", 20.0))
        .with_grid(hgrid("A", 5.0))
        .with_grid(hgrid("B", 40.0));
    let mut doc = RecordingDocument::new().rejecting("B");
    let err = dimension_view(
        Some(scene.view()),
        &scene,
        &mut doc,
        DimensionScope::Grids,
        &DimensionConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, Error::Mutation(_)));
    assert!(doc.dimensions().is_empty());
    assert_eq!(doc.transactions().len(), 1);
    assert!(!doc.transactions()[0].committed);
    assert!(!doc.has_open_transaction());
}

#[test]
fn picked_line_command_creates_dimensions() {
    let scene = Scene::new(plan_view(100.0))
        .with_grid(vgrid("1", 0.0))
        .with_grid(vgrid("2", 10.0))
        .with_grid(vgrid("3", 20.0));
    let mut picker = ScriptedPicker::from_points([
        Point3::new(-3.0, 20.0, 0.0),
        Point3::new(24.0, 20.0, 0.0),
    ]);
    let mut doc = RecordingDocument::new();
    let report = dimension_along_picked_line(
        Some(scene.view()),
        &scene,
        &mut picker,
        &mut doc,
        DatumTarget::Grids,
        &AlongLineOptions {
            include_overall: true,
        },
        &DimensionConfig::default(),
    )
    .unwrap();

    assert_eq!(report.chains.len(), 2);
    assert_eq!(report.handles.len(), 2);
    assert_eq!(ids(&report.chains[0]), vec!["1", "2", "3"]);
    assert_relative_eq!(report.chains[0].anchor.start, Point3::new(-1.0, 20.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(report.chains[0].anchor.end, Point3::new(21.0, 20.0, 0.0), epsilon = 1e-9);
    assert_eq!(doc.dimensions().len(), 2);
    assert_eq!(picker.prompts().len(), 2);
}

#[test]
fn cancelled_pick_creates_nothing() {
    let scene = s1_scene(100.0);
    let mut picker = ScriptedPicker::new([Some(Point3::origin()), None]);
    let mut doc = RecordingDocument::new();
    let err = dimension_along_picked_line(
        Some(scene.view()),
        &scene,
        &mut picker,
        &mut doc,
        DatumTarget::Grids,
        &AlongLineOptions::default(),
        &DimensionConfig::default(),
    )
    .unwrap_err();

    assert_eq!(err, Error::PickCancelled);
    assert!(doc.transactions().is_empty());
}
