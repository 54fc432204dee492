//! Page slicing over an already filtered collection.
//!
//! Pages are 1-based. There is always at least one page, even for an empty
//! collection, and out-of-range requests are clamped instead of rejected:
//! anything below 1 (or missing/unparseable) lands on page 1, anything past
//! the end lands on the last page.

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    rows: &'a [T],
    per_page: usize,
    current: usize,
}

impl<'a, T> Paginator<'a, T> {
    /// A `per_page` of zero is treated as one.
    pub fn new(rows: &'a [T], per_page: usize) -> Self {
        Self {
            rows,
            per_page: per_page.max(1),
            current: 1,
        }
    }

    /// Select the page to show. `None` means "no (usable) page requested".
    pub fn paginate(&mut self, requested: Option<i64>) -> &mut Self {
        let pages = self.pages_count();
        self.current = match requested {
            Some(page) if page >= 1 => usize::try_from(page).map_or(pages, |p| p.min(pages)),
            _ => 1,
        };
        self
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn pages_count(&self) -> usize {
        self.rows_count().div_ceil(self.per_page).max(1)
    }

    pub fn rows_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows_per_page(&self) -> usize {
        self.per_page
    }

    pub fn start_offset(&self) -> usize {
        (self.current - 1) * self.per_page
    }

    /// Inclusive index of the last row on the page; equals the start offset
    /// when there are no rows at all.
    pub fn end_offset(&self) -> usize {
        let start = self.start_offset();
        if self.rows.is_empty() {
            return start;
        }
        (start + self.per_page).min(self.rows_count()) - 1
    }

    pub fn paginated_rows(&self) -> &'a [T] {
        let rows = self.rows;
        if rows.is_empty() {
            return &[];
        }
        &rows[self.start_offset()..=self.end_offset()]
    }

    pub fn info(&self) -> PaginationInfo {
        PaginationInfo {
            current: self.current_page(),
            count: self.pages_count(),
            total: self.rows_count(),
            per_page: self.rows_per_page(),
            start_offset: self.start_offset(),
            end_offset: self.end_offset(),
        }
    }
}

/// Pagination metadata handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current: usize,
    pub count: usize,
    pub total: usize,
    pub per_page: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Lenient page parameter parsing: garbage becomes "no page requested".
pub fn parse_page(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
