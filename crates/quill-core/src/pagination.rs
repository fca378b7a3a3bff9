//! Page-number pagination with forgiving page resolution.
//!
//! A requested page that is absent, malformed or not positive resolves to the
//! first page; a page beyond the end resolves to the last page. Resolution
//! never fails, and an empty collection still has one (empty) page.

use serde::Serialize;

/// Fixed number of posts per public list page.
pub const POSTS_PER_PAGE: u64 = 3;

/// Splits `count` items into pages of `per_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: u64,
    per_page: u64,
}

impl Paginator {
    pub fn new(count: u64, per_page: u64) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of pages, never less than one.
    pub fn num_pages(&self) -> u64 {
        self.count.div_ceil(self.per_page).max(1)
    }

    /// Resolve a raw page indicator to a page number in `1..=num_pages()`.
    pub fn resolve(&self, requested: Option<&str>) -> u64 {
        let last = self.num_pages();
        match parse_page(requested) {
            PageNumber::Invalid => 1,
            PageNumber::Valid(n) if n > last => last,
            PageNumber::Valid(n) => n,
            PageNumber::Overflow => last,
        }
    }

    /// Offset and limit of the given (already resolved) page.
    pub fn bounds(&self, number: u64) -> (u64, u64) {
        let offset = (number.max(1) - 1) * self.per_page;
        let limit = self.per_page.min(self.count.saturating_sub(offset));
        (offset, limit)
    }

    /// Wrap the items of a resolved page together with its metadata.
    pub fn page<T>(&self, number: u64, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number,
            num_pages: self.num_pages(),
            count: self.count,
            per_page: self.per_page,
        }
    }
}

enum PageNumber {
    Invalid,
    Valid(u64),
    Overflow,
}

fn parse_page(requested: Option<&str>) -> PageNumber {
    let Some(raw) = requested.map(str::trim) else {
        return PageNumber::Invalid;
    };
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return PageNumber::Invalid;
    }
    match digits.parse::<u64>() {
        Ok(0) => PageNumber::Invalid,
        Ok(n) => PageNumber::Valid(n),
        // All digits but too large: still an integer beyond the last page.
        Err(_) => PageNumber::Overflow,
    }
}

/// One page of results plus what a caller needs to render page controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_pages() {
        assert_eq!(Paginator::new(0, 3).num_pages(), 1);
        assert_eq!(Paginator::new(2, 3).num_pages(), 1);
        assert_eq!(Paginator::new(3, 3).num_pages(), 1);
        assert_eq!(Paginator::new(7, 3).num_pages(), 3);
    }

    #[test]
    fn test_resolve_falls_back_to_first_page() {
        let paginator = Paginator::new(7, 3);
        for raw in [None, Some(""), Some("abc"), Some("0"), Some("-2"), Some("1.5")] {
            assert_eq!(paginator.resolve(raw), 1, "input {raw:?}");
        }
    }

    #[test]
    fn test_resolve_clamps_to_last_page() {
        let paginator = Paginator::new(7, 3);
        assert_eq!(paginator.resolve(Some("4")), 3);
        assert_eq!(paginator.resolve(Some("99")), 3);
        assert_eq!(paginator.resolve(Some("184467440737095516160")), 3);
    }

    #[test]
    fn test_resolve_in_range() {
        let paginator = Paginator::new(7, 3);
        assert_eq!(paginator.resolve(Some("2")), 2);
        assert_eq!(paginator.resolve(Some(" 3 ")), 3);
    }

    #[test]
    fn test_resolve_accepts_explicit_plus_sign() {
        let paginator = Paginator::new(7, 3);
        assert_eq!(paginator.resolve(Some("+2")), 2);
        assert_eq!(paginator.resolve(Some("+9")), 3);
        assert_eq!(paginator.resolve(Some("+")), 1);
        assert_eq!(paginator.resolve(Some("++2")), 1);
        assert_eq!(paginator.resolve(Some("+0")), 1);
    }

    #[test]
    fn test_bounds_of_last_partial_page() {
        let paginator = Paginator::new(7, 3);
        assert_eq!(paginator.bounds(1), (0, 3));
        assert_eq!(paginator.bounds(3), (6, 1));
        assert_eq!(Paginator::new(0, 3).bounds(1), (0, 0));
    }

    #[test]
    fn test_page_navigation() {
        let paginator = Paginator::new(7, 3);
        let page = paginator.page(2, vec!['d', 'e', 'f']);
        assert_eq!(page.previous_page_number(), Some(1));
        assert_eq!(page.next_page_number(), Some(3));

        let last = paginator.page(3, vec!['g']);
        assert!(!last.has_next());
        assert_eq!(last.next_page_number(), None);
    }
}
