//! Byte classification for the locator's dispatch.
//!
//! A 256-entry table maps each byte to the class the state machine cares
//! about. Everything else is [`CharClass::Other`] and never reaches a handler.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// `"` or `'`, carrying the quote byte so the matching close can be found.
    Quote(u8),
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Comma,
    Newline,
    /// `\`: the following byte is taken literally.
    Escape,
    Other,
}

const CLASS_TABLE: [CharClass; 256] = {
    let mut table = [CharClass::Other; 256];
    table[b'"' as usize] = CharClass::Quote(b'"');
    table[b'\'' as usize] = CharClass::Quote(b'\'');
    table[b'(' as usize] = CharClass::OpenParen;
    table[b')' as usize] = CharClass::CloseParen;
    table[b'{' as usize] = CharClass::OpenBrace;
    table[b'}' as usize] = CharClass::CloseBrace;
    table[b';' as usize] = CharClass::Semicolon;
    table[b',' as usize] = CharClass::Comma;
    table[b'\n' as usize] = CharClass::Newline;
    table[b'\\' as usize] = CharClass::Escape;
    table
};

impl CharClass {
    #[inline]
    pub(crate) const fn of(byte: u8) -> Self {
        CLASS_TABLE[byte as usize]
    }
}
