//! One-line source excerpts with a caret under an offset.
//!
//! ```text
//! > width: 12 +;
//! >            ^
//! ```

/// Characters taken on each side of the offset before trimming to the line.
const WINDOW: usize = 80;
/// Excerpts longer than this are shortened from the left.
const MAX_WIDTH: usize = 70;
/// Shortening stops once the caret is at or left of this column.
const MAX_CARET: usize = 60;
/// Characters dropped per shortening step, replaced by `...`.
const CUT: usize = 10;

/// Render the line around byte `offset` of `input` with a caret below it.
///
/// Offsets past the end point just after the last character; offsets inside
/// a multi-byte character point at that character.
pub fn render(input: &str, offset: usize) -> String {
    let mut offset = offset.min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }

    let chars: Vec<char> = input.chars().collect();
    let caret = input[..offset].chars().count();
    let start = caret.saturating_sub(WINDOW);
    let end = (caret + WINDOW).min(chars.len());
    let mut text = &chars[start..end];
    let mut caret = caret - start;

    if let Some(brk) = text[..caret].iter().rposition(|&c| is_line_break(c)) {
        text = &text[brk + 1..];
        caret -= brk + 1;
    }
    if let Some(brk) = text[caret..].iter().position(|&c| is_line_break(c)) {
        text = &text[..caret + brk];
    }

    let mut text: String = text.iter().collect();
    let mut width = text.chars().count();
    while width > MAX_WIDTH && caret > MAX_CARET {
        let cut = text.char_indices().nth(CUT).map_or(text.len(), |(i, _)| i);
        text.replace_range(..cut, "...");
        width -= CUT - 3;
        caret -= CUT - 3;
    }

    format!("> {text}\n> {}^", " ".repeat(caret))
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

#[cfg(test)]
mod tests;
