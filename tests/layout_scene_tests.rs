use approx::assert_relative_eq;
use candle_chart::api::{LayoutConfig, layout_scene};
use candle_chart::core::{CandleClass, OhlcPoint, OhlcSeries, Viewport};
use candle_chart::render::{Axis, Scene, Shape, ShapeClass, TextHAlign, WickPart};
use candle_chart::ChartError;

fn three_candle_series() -> OhlcSeries {
    OhlcSeries::new(vec![
        OhlcPoint::new(0_i64, 2.7, 3.2, 1.0, 1.6).expect("candle 0"),
        OhlcPoint::new(1_i64, 2.0, 4.9, 2.0, 4.0).expect("candle 1"),
        OhlcPoint::new(2_i64, 3.5, 7.0, 2.8, 6.0).expect("candle 2"),
    ])
    .expect("series")
}

fn scenario_scene() -> Scene {
    layout_scene(
        &three_candle_series(),
        Viewport::new(300, 150),
        &LayoutConfig::default(),
    )
    .expect("layout")
}

#[test]
fn three_candle_scenario_matches_reference_geometry() {
    let scene = scenario_scene();

    assert_eq!(scene.plot, Viewport::new(300, 150));
    assert_eq!(scene.range.lowest_low(), 1.0);
    assert_eq!(scene.range.highest_high(), 7.0);
    assert_eq!(scene.range.length(), 3);

    let bodies: Vec<_> = scene.candle_bodies().collect();
    assert_eq!(bodies.len(), 3);
    for (index, _, rect) in &bodies {
        assert_eq!(rect.width, 75.0);
        assert_relative_eq!(rect.x, 100.0 * *index as f64 + 12.5);
    }
    assert_eq!(bodies[0].1, CandleClass::Bear);
    assert_eq!(bodies[1].1, CandleClass::Bull);
    assert_eq!(bodies[2].1, CandleClass::Bull);

    let body0 = bodies[0].2;
    assert_relative_eq!(body0.y, 107.5, epsilon = 1e-9);
    assert_relative_eq!(body0.height, 27.5, epsilon = 1e-9);
}

#[test]
fn wicks_run_from_high_to_low_through_body_centre() {
    let scene = scenario_scene();
    let wicks: Vec<_> = scene.wicks().filter(|(index, _, _)| *index == 0).collect();
    assert_eq!(wicks.len(), 2);

    let (_, upper_part, upper) = wicks[0];
    let (_, lower_part, lower) = wicks[1];
    assert_eq!(upper_part, WickPart::Upper);
    assert_eq!(lower_part, WickPart::Lower);
    assert_relative_eq!(upper.x1, 50.0);
    assert_relative_eq!(upper.y1, 95.0, epsilon = 1e-9);
    assert_relative_eq!(upper.y2, 107.5, epsilon = 1e-9);
    assert_relative_eq!(lower.y1, 135.0, epsilon = 1e-9);
    assert_relative_eq!(lower.y2, 150.0, epsilon = 1e-9);
}

#[test]
fn grid_lines_follow_selected_ticks() {
    let scene = scenario_scene();

    let verticals: Vec<f64> = scene.grid_lines(Axis::Time).map(|line| line.x1).collect();
    assert_eq!(verticals, vec![50.0, 150.0, 250.0]);
    assert_eq!(scene.time_spacing, 1);

    assert_eq!(scene.price_step, 1.0);
    let horizontals: Vec<f64> = scene.grid_lines(Axis::Price).map(|line| line.y1).collect();
    assert_eq!(horizontals.len(), 7);
    assert_eq!(horizontals[0], 150.0);
    assert_eq!(horizontals[6], 0.0);
    for pair in horizontals.windows(2) {
        assert!(pair[0] - pair[1] >= 24.0 - 1e-9);
    }
}

#[test]
fn shapes_are_ordered_grid_then_candles() {
    let scene = scenario_scene();
    let classes: Vec<ShapeClass> = scene.shapes.iter().map(Shape::class).collect();
    assert_eq!(classes.len(), 3 + 7 + 3 * 3);
    assert!(classes[..10].iter().all(|class| *class == ShapeClass::Grid));
    assert_eq!(
        &classes[10..13],
        &[ShapeClass::Bear, ShapeClass::Bear, ShapeClass::Bear]
    );
    assert!(classes[13..].iter().all(|class| *class == ShapeClass::Bull));
}

#[test]
fn zero_height_container_cannot_render() {
    let err = layout_scene(
        &three_candle_series(),
        Viewport::new(300, 0),
        &LayoutConfig::default(),
    )
    .expect_err("zero height");
    assert!(err.is_cannot_render());
}

#[test]
fn reservations_larger_than_container_cannot_render() {
    let err = layout_scene(
        &three_candle_series(),
        Viewport::new(50, 30),
        &LayoutConfig::default().with_axis_labels(),
    )
    .expect_err("reservations swallow container");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 0,
            height: 0
        }
    ));
}

#[test]
fn flat_series_is_centred_without_division_errors() {
    let flat = OhlcSeries::new(vec![
        OhlcPoint::new(0_i64, 100.0, 100.0, 100.0, 100.0).expect("flat 0"),
        OhlcPoint::new(1_i64, 100.0, 100.0, 100.0, 100.0).expect("flat 1"),
    ])
    .expect("series");
    let scene =
        layout_scene(&flat, Viewport::new(300, 150), &LayoutConfig::default()).expect("layout");

    assert!(scene.range.is_padded());
    assert_eq!(scene.range.lowest_low(), 99.0);
    assert_eq!(scene.range.highest_high(), 101.0);
    for (_, class, rect) in scene.candle_bodies() {
        assert_eq!(class, CandleClass::Bear);
        assert_eq!(rect.y, 75.0);
        assert_eq!(rect.height, 0.0);
    }
    assert_eq!(scene.price_step, 0.5);
    assert_eq!(scene.grid_lines(Axis::Price).count(), 5);
    scene.validate().expect("finite scene");
}

#[test]
fn axis_reservations_emit_tick_labels() {
    let series = OhlcSeries::new(vec![
        OhlcPoint::new("Mon", 2.7, 3.2, 1.0, 1.6).expect("candle 0"),
        OhlcPoint::new("Tue", 2.0, 4.9, 2.0, 4.0).expect("candle 1"),
        OhlcPoint::new("Wed", 3.5, 7.0, 2.8, 6.0).expect("candle 2"),
    ])
    .expect("series");
    let scene = layout_scene(
        &series,
        Viewport::new(360, 190),
        &LayoutConfig::default().with_axis_labels(),
    )
    .expect("layout");

    assert_eq!(scene.extent, Viewport::new(360, 190));
    assert_eq!(scene.plot, Viewport::new(300, 150));
    let dates: Vec<&str> = scene.labels(Axis::Time).collect();
    assert_eq!(dates, vec!["Mon", "Tue", "Wed"]);
    let prices: Vec<&str> = scene.labels(Axis::Price).collect();
    assert_eq!(prices, vec!["1", "2", "3", "4", "5", "6", "7"]);

    for shape in &scene.shapes {
        if let Shape::TickLabel { axis, x, y, align, .. } = shape {
            match axis {
                Axis::Price => {
                    assert_eq!(*x, 304.0);
                    assert_eq!(*align, TextHAlign::Left);
                }
                Axis::Time => {
                    assert_eq!(*y, 170.0);
                    assert_eq!(*align, TextHAlign::Center);
                }
            }
        }
    }
}

#[test]
fn default_layout_has_no_labels() {
    let scene = scenario_scene();
    assert_eq!(scene.labels(Axis::Price).count(), 0);
    assert_eq!(scene.labels(Axis::Time).count(), 0);
}

#[test]
fn tooltips_sit_beside_body_centre() {
    let scene = scenario_scene();
    assert_eq!(scene.tooltips.len(), 3);

    let tooltip = &scene.tooltips[0];
    assert_eq!(tooltip.index, 0);
    assert_relative_eq!(tooltip.anchor_x, 92.5);
    assert_relative_eq!(tooltip.anchor_y, 121.25, epsilon = 1e-9);

    let texts: Vec<&str> = tooltip.lines.iter().map(|line| line.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["date: 0", "open: 2.7", "high: 3.2", "low: 1", "close: 1.6"]
    );
    assert_relative_eq!(tooltip.lines[0].x, 97.5);
    assert_relative_eq!(tooltip.lines[1].y - tooltip.lines[0].y, 18.0, epsilon = 1e-9);
}

#[test]
fn tooltips_can_be_disabled() {
    let scene = layout_scene(
        &three_candle_series(),
        Viewport::new(300, 150),
        &LayoutConfig::default().with_tooltips(false),
    )
    .expect("layout");
    assert!(scene.tooltips.is_empty());
}

#[test]
fn layout_is_idempotent() {
    let first = scenario_scene()
        .to_json_contract_v1_pretty()
        .expect("first json");
    let second = scenario_scene()
        .to_json_contract_v1_pretty()
        .expect("second json");
    assert_eq!(first, second);

    let restored = Scene::from_json_compat_str(&first).expect("restore");
    assert_eq!(restored, scenario_scene());
}

#[test]
fn malformed_series_is_a_data_error() {
    let series = OhlcSeries {
        title: None,
        points: vec![OhlcPoint {
            date: 0_i64.into(),
            open: f64::NAN,
            high: 2.0,
            low: 1.0,
            close: 1.5,
        }],
    };
    let err = layout_scene(&series, Viewport::new(300, 150), &LayoutConfig::default())
        .expect_err("nan open");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let empty = OhlcSeries::default();
    let err = layout_scene(&empty, Viewport::new(300, 150), &LayoutConfig::default())
        .expect_err("empty series");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn invalid_config_is_rejected_before_layout() {
    let err = layout_scene(
        &three_candle_series(),
        Viewport::new(300, 150),
        &LayoutConfig::default().with_min_spacing(0.0),
    )
    .expect_err("zero spacing");
    assert!(matches!(err, ChartError::InvalidData(_)));
}
