//! Located blocks.

use std::borrow::Cow;

use scss_ir::Span;

/// One classified unit of SCSS source.
///
/// Either a bare declaration (`body == None`) or a rule whose body is the text
/// strictly between its outermost `{` and matching `}`.
///
/// Spans are absolute offsets into the source the locator was built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// 1-based line of the first header byte.
    pub line: u32,
    /// Selector or property text, trimmed of surrounding whitespace.
    pub header: Span,
    /// Rule body, without the enclosing braces.
    pub body: Option<Span>,
}

impl Block {
    /// Create a declaration block.
    #[inline]
    pub const fn declaration(line: u32, header: Span) -> Self {
        Block {
            line,
            header,
            body: None,
        }
    }

    /// Create a rule block.
    #[inline]
    pub const fn rule(line: u32, header: Span, body: Span) -> Self {
        Block {
            line,
            header,
            body: Some(body),
        }
    }

    /// Returns `true` for a selector with a body.
    #[inline]
    pub const fn is_rule(&self) -> bool {
        self.body.is_some()
    }

    /// Returns `true` for a bare declaration.
    #[inline]
    pub const fn is_declaration(&self) -> bool {
        self.body.is_none()
    }

    /// Header text with every physical line trimmed and blank lines dropped.
    ///
    /// A selector list written across several lines comes back as one
    /// selector per line:
    ///
    /// ```
    /// use scss_blocks::locate_blocks;
    ///
    /// let source = "a,\n    b,\n\n  c { x: y }";
    /// let block = locate_blocks(source).next().unwrap().unwrap();
    /// assert_eq!(block.header_text(source), "a,\nb,\nc");
    /// ```
    pub fn header_text<'s>(&self, source: &'s str) -> Cow<'s, str> {
        let raw = self.header.text(source);
        if memchr::memchr(b'\n', raw.as_bytes()).is_none() {
            return Cow::Borrowed(raw);
        }

        let mut joined = String::with_capacity(raw.len());
        for line in raw.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            if !joined.is_empty() {
                joined.push('\n');
            }
            joined.push_str(line);
        }
        Cow::Owned(joined)
    }

    /// Raw body text, if this is a rule.
    #[inline]
    pub fn body_text<'s>(&self, source: &'s str) -> Option<&'s str> {
        self.body.map(|body| body.text(source))
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Block;
    scss_ir::static_assert_size!(Block, 24);
}

#[cfg(test)]
mod tests;
