//! L3 Molecular Layer: Imperative navigation surface
//!
//! Lets a parent move the pager without re-rendering it. Every call goes
//! through the same bounds checks as an external page request, so
//! out-of-range moves are silently ignored.

pub trait PageNavigator {
    /// Jump to `page`, ignored when out of range
    fn go_to(&mut self, page: usize);

    /// Advance one page, no-op on the last page
    fn next(&mut self);

    /// Go back one page, no-op on the first page
    fn previous(&mut self);
}
