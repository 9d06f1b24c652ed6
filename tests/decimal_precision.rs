use fastnum::decimal::D128;
use float_cmp::assert_approx_eq;
use ggscale::scale::nice::{nice_breaks, nice_step};
use ggscale::scale::util;
use ggscale::{build_scale, Domain, Mapped, Scale, Value};
use serde_json::json;

fn dec(value: f64) -> D128 {
    util::dec(value).unwrap()
}

#[test]
fn test_tenth_breaks_print_exactly() {
    let mut scale = build_scale("scale_x_continuous", json!({"expand": [0, 0], "n_breaks": 11})).unwrap();
    scale.train(&[Value::from(0.0), Value::from(1.0)]);
    assert_eq!(
        scale.computed_labels(),
        ["0", "0.1", "0.2", "0.3", "0.4", "0.5", "0.6", "0.7", "0.8", "0.9", "1"]
    );
}

#[test]
fn test_decimal_input_keeps_its_digits() {
    let mut scale = build_scale("scale_y_continuous", json!({"expand": [0, 0]})).unwrap();
    assert!(scale.set_range(0.0, 3.0));
    scale.train(&[Value::from("0.1"), Value::from("0.4")]);
    assert_eq!(
        scale.domain(),
        Domain::Continuous {
            min: dec(0.1),
            max: dec(0.4)
        }
    );
    assert_eq!(scale.transform(&Value::from(0.2)), Mapped::Number(D128::from(1)));
}

#[test]
fn test_small_magnitude_steps() {
    assert_eq!(nice_step(dec(0.00031)), dec(0.0005));
    let breaks = nice_breaks(dec(0.001), dec(0.002), 3);
    assert_eq!(breaks, vec![dec(0.001), dec(0.0015), dec(0.002)]);
}

#[test]
fn test_large_magnitude_steps() {
    let breaks = nice_breaks(D128::from(0), D128::from(4_000_000_000i64), 5);
    assert_eq!(breaks.first(), Some(&D128::from(0)));
    assert_eq!(breaks.last(), Some(&D128::from(4_000_000_000i64)));
    assert_eq!(breaks.len(), 5);
}

#[test]
fn test_log_scale_round_trip() {
    let mut scale = build_scale("scale_x_log10", json!({"expand": [0, 0]})).unwrap();
    assert!(scale.set_range(0.0, 100.0));
    scale.train(&[Value::from(1), Value::from(10000)]);
    for x in [1.0, 3.0, 42.0, 999.5, 10000.0] {
        let position = scale.transform(&Value::from(x)).as_number().unwrap();
        let back = scale.inverse(&position).and_then(|value| value.as_f64()).unwrap();
        assert_approx_eq!(f64, back, x, epsilon = 1e-9);
    }
    assert_eq!(scale.transform(&Value::from(100)), Mapped::Number(D128::from(50)));
}

#[test]
fn test_sqrt_scale_round_trip() {
    let mut scale = build_scale("scale_y_sqrt", json!({"expand": [0, 0]})).unwrap();
    scale.train(&[Value::from(0), Value::from(81)]);
    for x in [0.0, 2.0, 9.0, 50.5] {
        let position = scale.transform(&Value::from(x)).as_number().unwrap();
        let back = scale.inverse(&position).and_then(|value| value.as_f64()).unwrap();
        assert_approx_eq!(f64, back, x, epsilon = 1e-9);
    }
}

#[test]
fn test_binned_boundaries_are_exact() {
    let mut scale = build_scale("scale_x_binned", json!({"bins": 3, "expand": [0, 0], "show_limits": true})).unwrap();
    scale.train(&[Value::from(0), Value::from(1)]);
    let breaks: Vec<D128> = scale.computed_breaks().iter().filter_map(Value::as_decimal).collect();
    assert_eq!(breaks.len(), 4);
    assert_eq!(breaks[0], D128::from(0));
    assert_eq!(breaks[3], D128::from(1));
    // Thirds are inexact, the outer edges are not.
    assert_approx_eq!(f64, util::to_f64(&breaks[1]), 1.0 / 3.0, epsilon = 1e-12);
}
