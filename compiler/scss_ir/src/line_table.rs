//! Byte offset to line number mapping.
//!
//! Both engines report positions as 1-based line numbers. The table is built
//! once per buffer, so neither engine tracks line markers inside the text.

/// Pre-computed line offset table for O(log L) line lookup.
///
/// # Example
///
/// ```
/// use scss_ir::LineOffsetTable;
///
/// let source = "a {\n  b: c;\n}";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.line_from_offset(0), 1);
/// assert_eq!(table.line_from_offset(6), 2);
/// assert_eq!(table.line_from_offset(12), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineOffsetTable {
    /// Byte offset of each line start.
    /// offsets[0] = 0 (line 1 starts at byte 0)
    /// offsets[1] = byte after first \n (line 2 start)
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| crate::offset_u32(i + 1)),
        );
        LineOffsetTable { offsets }
    }

    /// Get the 1-based line number containing `offset`.
    ///
    /// Offsets past the end of the source map to the last line.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        crate::offset_u32(line_idx) + 1
    }
}
