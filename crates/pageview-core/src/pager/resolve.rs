//! L4 Atomic Layer: Nearest-page resolution
//!
//! Pure function mapping a horizontal offset to the page the surface should
//! settle on.

/// Resolve the page nearest to `offset`
///
/// Equivalent to `round(offset / width)` with exact half-width ties going to
/// the lower page. Offsets past the last panel clamp to `count - 1`,
/// overscroll before the first panel clamps to 0.
///
/// The page is computed directly rather than by walking panel edges, so
/// accumulated rounding in the edge positions cannot skip past both
/// neighbours of a near-tie offset.
///
/// # Returns
/// `None` when there is nothing to resolve against (`count == 0`, a
/// non-positive width, or a non-finite input).
pub fn nearest_page(offset: f64, width: f64, count: usize) -> Option<usize> {
    if count == 0 || !(width > 0.0) || !width.is_finite() || !offset.is_finite() {
        return None;
    }

    let x = offset.max(0.0);
    let page = (x / width - 0.5).ceil().max(0.0);
    let last = count - 1;
    if page >= last as f64 {
        return Some(last);
    }
    Some(page as usize)
}

/// Left edge of `page` on a surface of `width`-wide panels
#[inline]
pub fn page_offset(page: usize, width: f64) -> f64 {
    page as f64 * width
}
