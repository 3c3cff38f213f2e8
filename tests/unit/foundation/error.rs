use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PlayerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PlayerError::invalid_frame("x")
            .to_string()
            .contains("invalid frame:")
    );
    assert!(
        PlayerError::transition_abort("x")
            .to_string()
            .contains("transition aborted:")
    );
    assert!(PlayerError::decode("x").to_string().contains("decode error:"));
}

#[test]
fn open_error_names_the_path() {
    let err = PlayerError::open("videos/a.mp4", "no such file");
    let msg = err.to_string();
    assert!(msg.contains("videos/a.mp4"));
    assert!(msg.contains("no such file"));
}

#[test]
fn dimension_mismatch_reports_both_shapes() {
    let err = PlayerError::DimensionMismatch {
        left_width: 4,
        left_height: 2,
        right_width: 4,
        right_height: 3,
    };
    assert_eq!(err.to_string(), "frame dimension mismatch: 4x2 vs 4x3");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PlayerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
