use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn output_always_matches_target_over_aspect_grid() {
    let sources = [1u32, 2, 3, 7, 16, 33, 64, 100, 257];
    let targets = [(1u32, 1u32), (9, 16), (16, 9), (36, 64), (64, 36), (45, 80), (13, 7)];
    for &sw in &sources {
        for &sh in &sources {
            let src = Frame::solid(sw, sh, [200, 10, 30]);
            for &(tw, th) in &targets {
                let out = fit(&src, canvas(tw, th)).unwrap();
                assert_eq!((out.width, out.height), (tw, th), "src {sw}x{sh} -> {tw}x{th}");
                assert_eq!(out.data.len(), (tw * th * 3) as usize);
            }
        }
    }
}

#[test]
fn scaled_size_truncates_toward_zero() {
    // 720 / 1000 = 0.72 -> 1000x1000 scales to 720x720 inside 720x1280.
    assert_eq!(scaled_size(1000, 1000, canvas(720, 1280)), (720, 720));
    // 1920x1080 into 720x1280: scale = 0.375 -> 720x405.
    assert_eq!(scaled_size(1920, 1080, canvas(720, 1280)), (720, 405));
    // 3x7 into 10x10: scale = 10/7 -> 4.28.. x 10 -> 4x10.
    assert_eq!(scaled_size(3, 7, canvas(10, 10)), (4, 10));
}

#[test]
fn scaled_size_never_collapses_to_zero() {
    assert_eq!(scaled_size(10_000, 1, canvas(8, 8)), (8, 1));
    assert_eq!(scaled_size(1, 10_000, canvas(8, 8)), (1, 8));
}

#[test]
fn same_size_input_is_copied_verbatim() {
    let mut src = Frame::black(3, 2);
    for (i, b) in src.data.iter_mut().enumerate() {
        *b = i as u8;
    }
    let out = fit(&src, canvas(3, 2)).unwrap();
    assert_eq!(out, src);
}

#[test]
fn wide_source_is_letterboxed_vertically() {
    // 20x10 into 10x20: scale 0.5 -> 10x5, offset_y = (20 - 5) / 2 = 7.
    let src = Frame::solid(20, 10, [255, 255, 255]);
    let out = fit(&src, canvas(10, 20)).unwrap();
    for y in 0..7 {
        assert!(out.row(y).iter().all(|&b| b == 0), "row {y} should be black");
    }
    for y in 7..12 {
        assert!(out.row(y).iter().all(|&b| b > 250), "row {y} should be image");
    }
    for y in 12..20 {
        assert!(out.row(y).iter().all(|&b| b == 0), "row {y} should be black");
    }
}

#[test]
fn tall_source_is_pillarboxed_horizontally() {
    // 5x10 into 20x10: scale 1.0 -> 5x10, offset_x = (20 - 5) / 2 = 7.
    let src = Frame::solid(5, 10, [9, 8, 7]);
    let out = fit(&src, canvas(20, 10)).unwrap();
    for y in 0..10 {
        for x in 0..20 {
            let expected = if (7..12).contains(&x) { [9, 8, 7] } else { [0, 0, 0] };
            assert_eq!(out.pixel(x, y), expected, "pixel {x},{y}");
        }
    }
}

#[test]
fn zero_sized_input_is_invalid_frame() {
    let err = fit(&Frame::black(0, 4), canvas(4, 4)).unwrap_err();
    assert!(matches!(err, PlayerError::InvalidFrame(_)));
    let err = fit(&Frame::black(4, 0), canvas(4, 4)).unwrap_err();
    assert!(matches!(err, PlayerError::InvalidFrame(_)));
}

#[test]
fn zero_target_is_rejected() {
    let target = Canvas {
        width: 0,
        height: 4,
    };
    let err = fit(&Frame::black(4, 4), target).unwrap_err();
    assert!(matches!(err, PlayerError::Validation(_)));
}

#[test]
fn truncated_buffer_is_invalid_frame() {
    let src = Frame {
        width: 4,
        height: 4,
        data: vec![0; 10],
    };
    assert!(matches!(
        fit(&src, canvas(4, 4)).unwrap_err(),
        PlayerError::InvalidFrame(_)
    ));
}
