use fastnum::decimal::D128;
use float_cmp::assert_approx_eq;
use ggscale::transform::Axis;
use ggscale::{build_scale, Aesthetic, Mapped, Scale, ScaleSpec, ScreenRect, Transform, Value};
use serde_json::json;

fn column<T: Into<Value> + Copy>(values: &[T]) -> Vec<Value> {
    values.iter().map(|v| (*v).into()).collect()
}

#[test]
fn test_scatter_plot_pass() {
    let weight = column(&[1.5, 2.0, 3.25, 4.0, 5.5]);
    let mpg = column(&[10, 15, 20, 25, 30]);
    let cyl = column(&["4", "6", "8", "6", "4"]);

    let mut x = build_scale("scale_x_continuous", json!({"expand": [0, 0]})).unwrap();
    let mut y = build_scale("scale_y_continuous", json!({"expand": [0, 0]})).unwrap();
    let mut colour = build_scale("scale_colour_discrete", json!(null)).unwrap();

    x.train(&weight);
    y.train(&mpg);
    colour.train(&cyl);

    let screen = ScreenRect {
        x: 0.0,
        y: 0.0,
        width: 400.0,
        height: 200.0,
    };
    let transform = Transform::new(&screen, x.as_scale(), y.as_scale());

    let first = transform.data_to_screen(&weight[0], &mpg[0]).unwrap();
    assert_approx_eq!(f32, first.x, 0.0, epsilon = 1e-4);
    assert_approx_eq!(f32, first.y, 200.0, epsilon = 1e-4);
    let last = transform.data_to_screen(&weight[4], &mpg[4]).unwrap();
    assert_approx_eq!(f32, last.x, 400.0, epsilon = 1e-4);
    assert_approx_eq!(f32, last.y, 0.0, epsilon = 1e-4);

    let colours: Vec<Mapped> = colour.transform_all(&cyl);
    assert_eq!(colours[0], colours[4]);
    assert_eq!(colours[1], colours[3]);
    assert_ne!(colours[0], colours[1]);
    assert_eq!(colour.computed_labels(), ["4", "6", "8"]);

    let labels: Vec<String> = transform.axis_labels(Axis::Y).into_iter().map(|(_, label)| label).collect();
    assert_eq!(labels, ["10", "15", "20", "25", "30"]);
}

#[test]
fn test_bar_chart_pass() {
    let mut x = build_scale("scale_x_discrete", json!({"limits": ["b", "a", "c"]})).unwrap();
    assert!(x.set_range(0.0, 300.0));
    x.train(&column(&["a", "b", "c", "a"]));

    let a = x.transform(&Value::from("a")).as_number().unwrap();
    let b = x.transform(&Value::from("b")).as_number().unwrap();
    let c = x.transform(&Value::from("c")).as_number().unwrap();
    assert!(b < a && a < c);
    assert!(x.bandwidth().unwrap() > D128::from(0));
    assert_eq!(x.computed_labels(), ["b", "a", "c"]);
}

#[test]
fn test_legend_scales_share_one_pass() {
    let values = column(&[0, 25, 50, 75, 100]);

    let mut size = build_scale("scale_size", json!(null)).unwrap();
    size.train(&values);
    assert_eq!(size.transform(&values[0]), Mapped::Number(D128::from(1)));
    assert_eq!(size.transform(&values[4]), Mapped::Number(D128::from(6)));

    let mut fill = build_scale("scale_fill_viridis_c", json!(null)).unwrap();
    fill.train(&values);
    let low = fill.transform(&values[0]);
    let high = fill.transform(&values[4]);
    assert_eq!(low, Mapped::Color("#440154".into()));
    assert_eq!(high, Mapped::Color("#FDE725".into()));
    assert_eq!(fill.transform(&Value::Null), Mapped::Color("grey50".into()));

    let mut steps = build_scale("scale_fill_steps", json!({"low": "#000000", "high": "#FFFFFF"})).unwrap();
    steps.train(&values);
    let bands: Vec<Mapped> = steps.transform_all(&column(&[5, 15]));
    assert_eq!(bands[0], bands[1]);
}

#[test]
fn test_default_scales_for_a_mixed_frame() {
    let dates: Vec<Value> = ["2024-01-01", "2024-03-15", "2024-12-31"]
        .iter()
        .map(|text| Value::Date(text.parse().unwrap()))
        .collect();
    let mut x = ScaleSpec::default_for(Aesthetic::X, &dates).unwrap();
    x.train(&dates);
    assert_eq!(x.kind_name(), "temporal");
    assert!(x.computed_labels().iter().all(|label| label.ends_with("2024") || label.ends_with("2025")));

    let groups = column(&["north", "south"]);
    let mut shape = ScaleSpec::default_for(Aesthetic::Shape, &groups).unwrap();
    shape.train(&groups);
    assert_eq!(shape.transform(&groups[0]), Mapped::Literal(Value::from("circle")));
}

#[test]
fn test_retraining_between_facets_is_stable() {
    let panel = column(&[2, 4, 8]);
    let mut y = build_scale("scale_y_log10", json!(null)).unwrap();
    y.train(&panel);
    let first = (y.domain(), y.computed_breaks(), y.computed_labels());
    y.train(&panel);
    assert_eq!(first, (y.domain(), y.computed_breaks(), y.computed_labels()));

    y.reset();
    assert!(!y.is_trained());
    assert_eq!(y.transform(&Value::from(4)), Mapped::Missing);
}
