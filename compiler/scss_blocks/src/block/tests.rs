use super::*;

#[test]
fn test_single_line_header_is_borrowed() {
    let source = ".a, .b { }";
    let block = Block::rule(1, Span::new(0, 6), Span::new(8, 9));
    let text = block.header_text(source);
    assert!(matches!(text, Cow::Borrowed(".a, .b")));
}

#[test]
fn test_multi_line_header_is_normalized() {
    let source = "a,\n   b,\n\t\n  c";
    let block = Block::declaration(1, Span::new(0, 15));
    assert_eq!(block.header_text(source), "a,\nb,\nc");
}

#[test]
fn test_crlf_header_is_normalized() {
    let source = "a,\r\n  b";
    let block = Block::declaration(1, Span::new(0, 7));
    assert_eq!(block.header_text(source), "a,\nb");
}

#[test]
fn test_body_text() {
    let source = "a { b }";
    let rule = Block::rule(1, Span::new(0, 1), Span::new(3, 6));
    assert_eq!(rule.body_text(source), Some(" b "));
    assert!(rule.is_rule());
    assert!(!rule.is_declaration());

    let decl = Block::declaration(1, Span::new(0, 1));
    assert_eq!(decl.body_text(source), None);
    assert!(decl.is_declaration());
}
