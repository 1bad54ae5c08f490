//! SCSS IR - shared leaf types for the SCSS lexical front end.
//!
//! This crate contains the small data structures that both engines of the
//! front end speak:
//! - [`Span`] for byte ranges into a source buffer
//! - [`LineOffsetTable`] for mapping byte offsets to 1-based line numbers
//!
//! Neither the block locator nor the scanner mutates its input buffer, so line
//! numbers are never embedded in the text. A line table is built once per
//! buffer and queried by offset instead.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod line_table;
mod span;

pub use line_table::LineOffsetTable;
pub use span::Span;

/// Convert a byte offset to `u32`, saturating at `u32::MAX`.
///
/// Spans are `u32`, so both engines address at most 4 GiB of source. Offsets
/// past the limit collapse onto `u32::MAX` rather than wrapping, and spans
/// that reach it slice to `""`.
#[inline]
pub fn offset_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}
