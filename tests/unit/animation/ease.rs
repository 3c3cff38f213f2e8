use super::*;

const ALL: [Ease; 4] = [Ease::Linear, Ease::OutQuad, Ease::OutCubic, Ease::OutQuart];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn out_cubic_matches_closed_form() {
    for i in 0..=20 {
        let t = f64::from(i) / 20.0;
        let expected = 1.0 - (1.0 - t) * (1.0 - t) * (1.0 - t);
        assert!((Ease::OutCubic.apply(t) - expected).abs() < 1e-12);
    }
}

#[test]
fn out_curves_run_ahead_of_linear() {
    for ease in [Ease::OutQuad, Ease::OutCubic, Ease::OutQuart] {
        assert!(ease.apply(0.25) > 0.25);
        assert!(ease.apply(0.5) > 0.5);
    }
}

#[test]
fn inputs_outside_unit_range_are_clamped() {
    assert_eq!(Ease::OutCubic.apply(-3.0), 0.0);
    assert_eq!(Ease::OutCubic.apply(7.0), 1.0);
    assert_eq!(Ease::Linear.apply(f64::NAN), 0.0);
}

#[test]
fn serde_names_are_snake_case() {
    let v: Ease = serde_json::from_str("\"out_cubic\"").unwrap();
    assert_eq!(v, Ease::OutCubic);
    assert_eq!(serde_json::to_string(&Ease::OutQuart).unwrap(), "\"out_quart\"");
}
