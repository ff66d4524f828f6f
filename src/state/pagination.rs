//! Fixed-size page slicing over an already-fetched list.

/// Items per page in every paginated list.
pub const PAGE_SIZE: usize = 20;

/// One page of a list plus the state of the previous/next controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-indexed page number actually shown.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Number of pages for `len` items; an empty list still has one page.
#[must_use]
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page into `1..=page_count`.
#[must_use]
pub fn clamp_page(requested: usize, len: usize, page_size: usize) -> usize {
    requested.clamp(1, page_count(len, page_size))
}

/// Slice page `requested` (1-indexed) out of `items`. Page k covers
/// `[(k-1)*size, min(k*size, len))`. Out-of-range requests are clamped.
#[must_use]
pub fn paginate<T>(items: &[T], requested: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = page_count(items.len(), page_size);
    let number = clamp_page(requested, items.len(), page_size);
    let start = ((number - 1) * page_size).min(items.len());
    let end = (number * page_size).min(items.len());
    Page {
        items: &items[start..end],
        number,
        total_pages,
        total_items: items.len(),
        has_previous: number > 1,
        has_next: number < total_pages,
    }
}

#[cfg(test)]
#[path = "pagination_test.rs"]
mod tests;
