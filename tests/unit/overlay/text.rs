use super::*;

fn system_painter() -> Option<TextPainter> {
    let path = find_system_font()?;
    Some(TextPainter::load(&path, 16.0).unwrap())
}

#[test]
fn garbage_bytes_are_not_a_font() {
    assert!(TextPainter::from_bytes(b"not a font".to_vec(), 16.0).is_err());
    assert!(TextPainter::from_bytes(Vec::new(), 0.0).is_err());
}

#[test]
fn missing_file_is_reported() {
    let err = TextPainter::load(Path::new("/definitely/not/a/font.ttf"), 16.0).unwrap_err();
    assert!(err.to_string().contains("font.ttf"), "{err}");
}

#[test]
fn measure_grows_with_text() {
    let Some(mut text) = system_painter() else {
        eprintln!("skipping: no system font");
        return;
    };
    assert_eq!(text.measure("").0, 0);
    let (one, h) = text.measure("1");
    let (three, _) = text.measure("1/3");
    assert!(one > 0 && h > 0);
    assert!(three > one);
    assert!(text.ascent() > 0 && text.ascent() <= h);
}

#[test]
fn glyphs_sit_above_the_baseline() {
    let Some(mut text) = system_painter() else {
        eprintln!("skipping: no system font");
        return;
    };
    let mut f = Frame::black(64, 40);
    text.draw(&mut f, 4, 30, "H", [255, 255, 255]);
    let lit: Vec<(u32, u32)> = (0..40)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .filter(|&(x, y)| f.pixel(x, y)[0] > 0)
        .collect();
    assert!(!lit.is_empty());
    assert!(lit.iter().all(|&(x, y)| x >= 4 && y <= 30), "{lit:?}");
}

#[test]
fn hangul_labels_render_when_the_font_covers_them() {
    let Some(mut text) = system_painter() else {
        eprintln!("skipping: no system font");
        return;
    };
    if !text.has_glyph('시') {
        eprintln!("skipping: system font has no Hangul");
        return;
    }
    let mut f = Frame::black(120, 40);
    text.draw(&mut f, 2, 30, "시연디스플레이", [255, 255, 255]);
    assert!(f.data.iter().any(|&b| b > 0));
    assert!(text.measure("시연").0 > 0);
}
