use super::*;

#[test]
fn test_span_point() {
    let point = Span::point(42);
    assert!(point.is_empty());
    assert_eq!(point.to_range(), 42..42);
    assert!(!Span::new(10, 20).is_empty());
}

#[test]
fn test_span_text() {
    let source = ".a { color: red; }";
    assert_eq!(Span::new(0, 2).text(source), ".a");
    assert_eq!(Span::new(5, 15).text(source), "color: red");
    // Out of bounds
    assert_eq!(Span::new(10, 100).text(source), "");
}

#[test]
fn test_span_text_rejects_split_utf8() {
    let source = "a\u{e9}b";
    // 'é' occupies bytes 1..3
    assert_eq!(Span::new(1, 3).text(source), "\u{e9}");
    assert_eq!(Span::new(1, 2).text(source), "");
}

#[test]
fn test_span_debug_display() {
    let span = Span::new(100, 200);
    assert_eq!(format!("{span:?}"), "100..200");
    assert_eq!(format!("{span}"), "100..200");
}

#[test]
fn test_offset_u32_saturates() {
    assert_eq!(crate::offset_u32(7), 7);
    assert_eq!(crate::offset_u32(u32::MAX as usize + 5), u32::MAX);
}

#[test]
fn test_saturated_span_slices_to_empty() {
    let past_limit = crate::offset_u32(u32::MAX as usize + 1);
    assert_eq!(Span::new(0, past_limit).text("short"), "");
    assert_eq!(Span::point(past_limit).text("short"), "");
}
