use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_single_line() {
    assert_eq!(render("a = 1 +;", 7), "> a = 1 +;\n>        ^");
}

#[test]
fn test_trims_to_the_offending_line() {
    assert_eq!(render("one\ntwo x\nthree", 8), "> two x\n>     ^");
    assert_eq!(render("a\r\nbc", 4), "> bc\n>  ^");
}

#[test]
fn test_offset_past_end() {
    assert_eq!(render("ab", 10), "> ab\n>   ^");
    assert_eq!(render("", 0), "> \n> ^");
}

#[test]
fn test_counts_characters_not_bytes() {
    assert_eq!(render("é = ?", 5), "> é = ?\n>     ^");
    // Inside `é`: snaps back to its start.
    assert_eq!(render("é = ?", 1), "> é = ?\n> ^");
}

#[test]
fn test_long_line_is_shortened_from_the_left() {
    let input = "a".repeat(100);
    let expected = format!("> ...{}\n> {}^", "a".repeat(66), " ".repeat(59));
    assert_eq!(render(&input, 90), expected);
}

#[test]
fn test_short_caret_keeps_long_line() {
    let input = "b".repeat(100);
    let expected = format!("> {}\n> ^", "b".repeat(80));
    assert_eq!(render(&input, 0), expected);
}
