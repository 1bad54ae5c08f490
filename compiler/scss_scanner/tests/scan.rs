#![allow(clippy::expect_used, reason = "test assertions use expect for clarity")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scss_scanner::{excerpt, PatternTable, ScanError, Scanner, TokenCursor};

const NONE: &[&str] = &[];
const WS: &str = "[ \r\t\n]+";

/// Expression tokens of the SCSS value grammar, in priority order.
const PATTERNS: &[(&str, &str)] = &[
    ("\":\"", ":"),
    (WS, WS),
    ("COMMA", ","),
    ("LPAR", r"\(|\["),
    ("RPAR", r"\)|\]"),
    ("END", "$"),
    ("MUL", "[*]"),
    ("DIV", "/"),
    ("ADD", "[+]"),
    ("SUB", r"-\s"),
    ("AND", r"\band\b"),
    ("OR", r"\bor\b"),
    ("NOT", r"\bnot\b"),
    ("NE", "!="),
    ("INV", "!"),
    ("EQ", "=="),
    ("LE", "<="),
    ("GE", ">="),
    ("LT", "<"),
    ("GT", ">"),
    ("STR", "'[^']*'"),
    ("QSTR", "\"[^\"]*\""),
    ("UNITS", r"(?:em|ex|px|cm|mm|in|pt|pc|deg|radgrad|ms|s|hz|khz|%)\b"),
    ("NUM", r"(?:\d+(?:\.\d*)?|\.\d+)"),
    ("COLOR", r"#(?:[a-fA-F0-9]{6}|[a-fA-F0-9]{3})\b"),
    ("VAR", r"\$[-a-zA-Z0-9_]+"),
    ("NAME", r"\$?[-a-zA-Z0-9_]+"),
    ("ID", "!?[-a-zA-Z_][-a-zA-Z0-9_]*"),
];

const SAMPLE: &str = "[(5px - 3) * (5px - 3)], function($arg1: a b c, $arg2: 4px + 5px, \
                      $arg3: red #fff #000000 #ffff0088), \"Some string\"";

fn expression_table() -> PatternTable {
    PatternTable::from_patterns(PATTERNS).expect("expression patterns register")
}

/// Scan unrestricted until end of input or the first error.
fn scan_to_error(scanner: &mut Scanner<'_>) -> Option<ScanError> {
    let mut index = 0;
    loop {
        match scanner.token(index, NONE) {
            Ok(Some(_)) => index += 1,
            Ok(None) => return None,
            Err(err) => return Some(err),
        }
    }
}

#[test]
fn sample_expression_stops_at_bad_color() {
    let table = expression_table();
    let mut scanner = Scanner::new(&table, &[WS], SAMPLE);

    let err = scan_to_error(&mut scanner);
    assert_eq!(err, Some(ScanError::BadToken { offset: 90, line: 1 }));
    assert_eq!(scanner.len(), 37);

    let last: Vec<(&str, &str)> = scanner.tokens()[34..]
        .iter()
        .map(|t| (scanner.token_name(t), scanner.text(t)))
        .collect();
    assert_eq!(
        last,
        vec![("NAME", "red"), ("COLOR", "#fff"), ("COLOR", "#000000")]
    );
}

#[test]
fn sample_expression_history() {
    let table = expression_table();
    let mut scanner = Scanner::new(&table, &[WS], SAMPLE);

    for index in 0..3 {
        assert!(matches!(scanner.token(index, NONE), Ok(Some(_))));
    }
    assert_eq!(
        scanner.to_string(),
        "  (@0)  LPAR  =  '['\n  (@1)  LPAR  =  '('\n  (@2)  NUM  =  '5'"
    );

    scan_to_error(&mut scanner);
    let expected = [
        "  (@56)  UNITS  =  'px'",
        "  (@59)  ADD  =  '+'",
        "  (@61)  NUM  =  '5'",
        "  (@62)  UNITS  =  'px'",
        "  (@64)  COMMA  =  ','",
        "  (@66)  VAR  =  '$arg3'",
        "  (@71)  \":\"  =  ':'",
        "  (@73)  NAME  =  'red'",
        "  (@77)  COLOR  =  '#fff'",
        "  (@82)  COLOR  =  '#000000'",
    ]
    .join("\n");
    assert_eq!(scanner.to_string(), expected);
}

#[test]
fn sample_error_excerpt() {
    let table = expression_table();
    let mut scanner = Scanner::new(&table, &[WS], SAMPLE);
    let offset = scan_to_error(&mut scanner)
        .and_then(|err| err.offset())
        .expect("sample has a bad token");

    let expected = format!("> ...{}\n> {}^", &SAMPLE[34..], " ".repeat(59));
    assert_eq!(excerpt::render(scanner.input(), offset as usize), expected);
}

/// `NUM UNITS? ((ADD | SUB) NUM UNITS?)* END`, summing the numbers.
fn sum(cursor: &mut TokenCursor<'_, '_>) -> Result<(i64, Option<String>), ScanError> {
    let mut total = 0;
    let mut unit = None;
    let mut sign = 1;
    loop {
        let value: i64 = cursor.expect("NUM")?.parse().expect("NUM is an integer here");
        total += sign * value;
        if cursor.peek(&["UNITS", "ADD", "SUB", "END"])? == Some("UNITS") {
            unit = Some(cursor.expect("UNITS")?.to_owned());
        }
        sign = match cursor.peek(&["ADD", "SUB", "END"])? {
            Some("ADD") => 1,
            Some("SUB") => -1,
            _ => break,
        };
        cursor.expect(if sign > 0 { "ADD" } else { "SUB" })?;
    }
    cursor.expect("END")?;
    Ok((total, unit))
}

#[test]
fn cursor_parses_sum() {
    let table = expression_table();
    let mut scanner = Scanner::new(&table, &[WS], "4px + 5px - 3");
    let mut cursor = TokenCursor::new(&mut scanner);

    assert_eq!(sum(&mut cursor), Ok((6, Some("px".to_owned()))));
    assert_eq!(cursor.position(), 8);
}

#[test]
fn cursor_reports_missing_operand() {
    let table = expression_table();
    let mut scanner = Scanner::new(&table, &[WS], "4px +");
    let mut cursor = TokenCursor::new(&mut scanner);

    assert!(matches!(
        sum(&mut cursor),
        Err(ScanError::Expected { offset: 5, ref expected, .. }) if expected == "NUM"
    ));
}

/// Keyword argument `$name: value` or positional `$name`.
fn argument(cursor: &mut TokenCursor<'_, '_>) -> Result<(Option<String>, String), ScanError> {
    let start = cursor.position();
    let name = cursor.expect("VAR")?.to_owned();
    if cursor.expect("\":\"").is_ok() {
        let value = cursor.expect("ID")?.to_owned();
        return Ok((Some(name), value));
    }

    cursor.rewind(cursor.position() - start);
    let value = cursor.expect("VAR")?.to_owned();
    Ok((None, value))
}

#[test]
fn cursor_backtracks_failed_alternative() {
    let table = expression_table();

    let mut scanner = Scanner::new(&table, &[WS], "$arg1: blue");
    let mut cursor = TokenCursor::new(&mut scanner);
    assert_eq!(
        argument(&mut cursor),
        Ok((Some("$arg1".to_owned()), "blue".to_owned()))
    );

    let mut scanner = Scanner::new(&table, &[WS], "$arg1 blue");
    let mut cursor = TokenCursor::new(&mut scanner);
    assert_eq!(argument(&mut cursor), Ok((None, "$arg1".to_owned())));
    assert_eq!(cursor.position(), 1);
    assert_eq!(cursor.scanner().len(), 1);
}

#[test]
fn restricted_failure_names_the_alternatives() {
    let table = expression_table();
    let mut scanner = Scanner::new(&table, &[WS], "  @media");

    let err = scanner
        .token(0, &["NUM", "COLOR"])
        .expect_err("`@` starts no expression token");
    assert_eq!(err.offset(), Some(2));
    assert_eq!(
        err.to_string(),
        "bad token at offset 2 on line 1, expected one of: NUM, COLOR"
    );
}

proptest! {
    #[test]
    fn numbers_and_names_tokenize_whole(words in prop::collection::vec("[0-9]{1,4}|[a-z][a-z0-9]{0,5}", 1..8)) {
        let table = expression_table();
        let input = words.join(" ");
        let mut scanner = Scanner::new(&table, &[WS], input.as_str());

        prop_assert_eq!(scan_to_error(&mut scanner), None);
        let texts: Vec<&str> = scanner
            .tokens()
            .iter()
            .map(|t| scanner.text(t))
            .filter(|text| !text.is_empty())
            .collect();
        let expected: Vec<&str> = words.iter().map(String::as_str).collect();
        prop_assert_eq!(texts, expected);
    }
}
