//! Page slicing.

use std::fmt;

/// Rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    /// A fixed number of rows per page.
    Count(usize),
    /// Everything on one page.
    All,
}

impl PageSize {
    /// Parse a page size as it appears in options: a number or `"All"`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        text.parse().ok().map(Self::Count)
    }

    /// Number of pages needed for `total` rows. Never less than one, so
    /// page 0 always exists.
    pub fn page_count(self, total: usize) -> usize {
        match self {
            Self::All => 1,
            Self::Count(0) => 1,
            Self::Count(size) => total.div_ceil(size).max(1),
        }
    }

    /// Index of the first row on `page`.
    pub fn offset(self, page: usize) -> usize {
        match self {
            Self::All => 0,
            Self::Count(size) => page.saturating_mul(size),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::Count(10)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(size) => write!(f, "{}", size),
            Self::All => f.write_str("All"),
        }
    }
}

/// The rows shown on `active_page`.
///
/// `PageSize::All` returns every row. A page past the end yields an empty
/// slice; keeping the page in range is the caller's job.
///
/// # Example
///
/// ```
/// use datagrid::pipeline::{PageSize, paginate};
///
/// let rows: Vec<u32> = (0..25).collect();
/// assert_eq!(paginate(&rows, PageSize::Count(10), 2), &[20, 21, 22, 23, 24]);
/// assert!(paginate(&rows, PageSize::Count(10), 3).is_empty());
/// ```
pub fn paginate<T>(rows: &[T], page_size: PageSize, active_page: usize) -> &[T] {
    match page_size {
        PageSize::All => rows,
        PageSize::Count(size) => {
            let start = page_size.offset(active_page).min(rows.len());
            let end = start.saturating_add(size).min(rows.len());
            &rows[start..end]
        }
    }
}
