use super::*;

/// A frame whose every row is filled with `tag + row` so rows can be traced through a slide.
fn tagged(width: u32, height: u32, tag: u8) -> Frame {
    let mut f = Frame::black(width, height);
    let stride = f.row_bytes();
    for y in 0..height as usize {
        let v = tag.wrapping_add(y as u8);
        f.data[y * stride..(y + 1) * stride].fill(v);
    }
    f
}

fn row_tag(f: &Frame, y: u32) -> u8 {
    f.row(y)[0]
}

#[test]
fn boundary_identity() {
    let a = tagged(3, 10, 0);
    let b = tagged(3, 10, 100);
    for dir in [SlideDir::Down, SlideDir::Up] {
        assert_eq!(render_slide(&a, &b, 0.0, dir).unwrap(), a);
        assert_eq!(render_slide(&a, &b, 1.0, dir).unwrap(), b);
    }
}

#[test]
fn out_of_range_progress_matches_clamped_value() {
    let a = tagged(2, 8, 0);
    let b = tagged(2, 8, 50);
    for dir in [SlideDir::Down, SlideDir::Up] {
        assert_eq!(
            render_slide(&a, &b, -5.0, dir).unwrap(),
            render_slide(&a, &b, 0.0, dir).unwrap()
        );
        assert_eq!(
            render_slide(&a, &b, 3.5, dir).unwrap(),
            render_slide(&a, &b, 1.0, dir).unwrap()
        );
    }
}

#[test]
fn down_moves_from_up_and_brings_to_in_from_below() {
    let a = tagged(2, 10, 0);
    let b = tagged(2, 10, 100);
    // offset = floor(10 * 0.3) = 3
    let out = render_slide(&a, &b, 0.3, SlideDir::Down).unwrap();
    for y in 0..7 {
        assert_eq!(row_tag(&out, y), (y + 3) as u8);
    }
    for y in 7..10 {
        assert_eq!(row_tag(&out, y), 100 + (y - 7) as u8);
    }
}

#[test]
fn up_moves_from_down_and_brings_to_in_from_above() {
    let a = tagged(2, 10, 0);
    let b = tagged(2, 10, 100);
    // offset = floor(10 * 0.3) = 3
    let out = render_slide(&a, &b, 0.3, SlideDir::Up).unwrap();
    for y in 0..3 {
        assert_eq!(row_tag(&out, y), 100 + (y + 7) as u8);
    }
    for y in 3..10 {
        assert_eq!(row_tag(&out, y), (y - 3) as u8);
    }
}

#[test]
fn down_and_up_are_mirror_images() {
    let a = tagged(4, 16, 0);
    let b = tagged(4, 16, 64);
    // Steps of 1/16 keep `16 * p` integral so floor(h*p) + floor(h*(1-p)) == h.
    for i in 0..=16 {
        let p = f64::from(i) / 16.0;
        let down = render_slide(&a, &b, p, SlideDir::Down).unwrap();
        let up = render_slide(&b, &a, 1.0 - p, SlideDir::Up).unwrap();
        assert_eq!(down, up, "p = {p}");
    }
}

#[test]
fn mismatched_frames_are_rejected() {
    let err = render_slide(&Frame::black(2, 2), &Frame::black(2, 3), 0.5, SlideDir::Down)
        .unwrap_err();
    assert!(matches!(err, PlayerError::DimensionMismatch { .. }));
}

#[test]
fn render_is_pure() {
    let a = tagged(2, 6, 0);
    let b = tagged(2, 6, 10);
    let first = render_slide(&a, &b, 0.5, SlideDir::Down).unwrap();
    let second = render_slide(&a, &b, 0.5, SlideDir::Down).unwrap();
    assert_eq!(first, second);
    assert_eq!(a, tagged(2, 6, 0));
}

#[test]
fn kind_dispatches_with_direction() {
    let a = tagged(1, 4, 0);
    let b = tagged(1, 4, 20);
    let kind = TransitionKind::default().with_dir(SlideDir::Up);
    assert_eq!(
        kind.render(&a, &b, 0.5).unwrap(),
        render_slide(&a, &b, 0.5, SlideDir::Up).unwrap()
    );
}

#[test]
fn parse_accepts_aliases_and_params() {
    let null = serde_json::Value::Null;
    assert_eq!(
        parse_transition_kind_params("Slide", &null).unwrap(),
        TransitionKind::Slide(SlideConfig { dir: SlideDir::Down })
    );
    assert_eq!(
        parse_transition_kind_params("slide_up", &null).unwrap(),
        TransitionKind::Slide(SlideConfig { dir: SlideDir::Up })
    );
    assert_eq!(
        parse_transition_kind_params("slide-down", &serde_json::json!({ "dir": "up" })).unwrap(),
        TransitionKind::Slide(SlideConfig { dir: SlideDir::Up })
    );
}

#[test]
fn parse_rejects_unknown_kinds_and_dirs() {
    let null = serde_json::Value::Null;
    assert!(parse_transition_kind_params("crossfade", &null).is_err());
    assert!(parse_transition_kind_params("  ", &null).is_err());
    assert!(parse_transition_kind_params("slide", &serde_json::json!({ "dir": "left" })).is_err());
    assert!(parse_transition_kind_params("slide", &serde_json::json!([1, 2])).is_err());
}

#[test]
fn run_is_monotonic_and_ends_at_one() {
    let run = TransitionRun::new(20, Ease::OutCubic).unwrap();
    let values: Vec<f64> = run.progress().collect();
    assert_eq!(values.len(), 20);
    for pair in values.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert_eq!(*values.last().unwrap(), 1.0);
    let first = 1.0 - (1.0 - 1.0 / 20.0f64).powi(3);
    assert!((values[0] - first).abs() < 1e-12);
}

#[test]
fn run_rejects_zero_steps() {
    assert!(TransitionRun::new(0, Ease::Linear).is_err());
}

#[test]
fn reversed_direction_round_trips() {
    assert_eq!(SlideDir::Down.reversed(), SlideDir::Up);
    assert_eq!(SlideDir::Up.reversed().reversed(), SlideDir::Up);
    let kind = TransitionKind::default().with_dir(SlideDir::Up);
    assert_eq!(kind.dir(), SlideDir::Up);
}
