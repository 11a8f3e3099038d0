//! Page slicing over the filtered order.

use crate::model::RowId;

/// Current page and page size.
///
/// `page` is 1-based. Every setter clamps it into `[1, total_pages]`, so
/// navigation never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    per_page: usize,
}

impl Paginator {
    /// `per_page` must be non-zero; the table checks this at construction.
    pub(crate) fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages for `len` rows. Never less than 1.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.per_page).max(1)
    }

    /// The ids visible on the current page.
    pub fn slice<'a>(&self, ids: &'a [RowId]) -> &'a [RowId] {
        let start = (self.page - 1).saturating_mul(self.per_page).min(ids.len());
        let end = start.saturating_add(self.per_page).min(ids.len());
        &ids[start..end]
    }

    /// Move to page `n`, clamped into range for `len` rows.
    /// Returns the page actually selected.
    pub fn set_page(&mut self, n: usize, len: usize) -> usize {
        self.page = n.clamp(1, self.total_pages(len));
        self.page
    }

    pub fn next(&mut self, len: usize) -> usize {
        self.set_page(self.page.saturating_add(1), len)
    }

    pub fn prev(&mut self, len: usize) -> usize {
        self.set_page(self.page.saturating_sub(1), len)
    }

    pub fn first(&mut self) -> usize {
        self.page = 1;
        self.page
    }

    pub fn last(&mut self, len: usize) -> usize {
        self.set_page(usize::MAX, len)
    }
}

/// One slot in the footer's page control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Prev { enabled: bool },
    Page { number: usize, current: bool },
    Ellipsis,
    Next { enabled: bool },
}

/// Layout of the page control strip for `page` of `total`.
///
/// Previous, page 1, a gap marker when the window starts past 2, up to two
/// pages either side of the current one, a gap marker when the window ends
/// before `total - 1`, the last page, then next.
pub fn page_controls(page: usize, total: usize) -> Vec<PageControl> {
    let total = total.max(1);
    let page = page.clamp(1, total);
    let mut controls = vec![
        PageControl::Prev { enabled: page > 1 },
        PageControl::Page {
            number: 1,
            current: page == 1,
        },
    ];

    let start = page.saturating_sub(2).max(2);
    let end = (page + 2).min(total.saturating_sub(1));

    if start > 2 {
        controls.push(PageControl::Ellipsis);
    }
    for number in start..=end {
        controls.push(PageControl::Page {
            number,
            current: number == page,
        });
    }
    if end < total.saturating_sub(1) {
        controls.push(PageControl::Ellipsis);
    }
    if total > 1 {
        controls.push(PageControl::Page {
            number: total,
            current: page == total,
        });
    }
    controls.push(PageControl::Next {
        enabled: page < total,
    });
    controls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_minimum_one() {
        let p = Paginator::new(1, 10);
        assert_eq!(p.total_pages(0), 1);
        assert_eq!(p.total_pages(10), 1);
        assert_eq!(p.total_pages(11), 2);
    }

    #[test]
    fn test_slice() {
        let ids = [1, 2, 3, 4, 5];
        let mut p = Paginator::new(1, 2);
        assert_eq!(p.slice(&ids), &[1, 2]);
        p.set_page(3, ids.len());
        assert_eq!(p.slice(&ids), &[5]);
        assert_eq!(p.slice(&[]), &[] as &[RowId]);
    }

    #[test]
    fn test_slice_past_end_is_empty() {
        let p = Paginator::new(4, 2);
        assert!(p.slice(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn test_set_page_clamps() {
        let mut p = Paginator::new(1, 2);
        assert_eq!(p.set_page(0, 5), 1);
        assert_eq!(p.set_page(99, 5), 3);
        assert_eq!(p.next(5), 3);
        assert_eq!(p.prev(5), 2);
        assert_eq!(p.first(), 1);
        assert_eq!(p.prev(5), 1);
        assert_eq!(p.last(5), 3);
        assert_eq!(p.set_page(3, 0), 1);
    }

    fn render(controls: &[PageControl]) -> String {
        controls
            .iter()
            .map(|c| match c {
                PageControl::Prev { enabled } => (if *enabled { "<" } else { "[<]" }).to_string(),
                PageControl::Next { enabled } => (if *enabled { ">" } else { "[>]" }).to_string(),
                PageControl::Ellipsis => "…".to_string(),
                PageControl::Page { number, current: true } => format!("[{number}]"),
                PageControl::Page { number, .. } => number.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_page_controls_single_page() {
        assert_eq!(render(&page_controls(1, 1)), "[<] [1] [>]");
    }

    #[test]
    fn test_page_controls_small() {
        assert_eq!(render(&page_controls(2, 3)), "< 1 [2] 3 >");
        assert_eq!(render(&page_controls(1, 2)), "[<] [1] 2 >");
    }

    #[test]
    fn test_page_controls_windows() {
        assert_eq!(render(&page_controls(1, 10)), "[<] [1] 2 3 … 10 >");
        assert_eq!(render(&page_controls(5, 10)), "< 1 … 3 4 [5] 6 7 … 10 >");
        assert_eq!(render(&page_controls(10, 10)), "< 1 … 8 9 [10] [>]");
        assert_eq!(render(&page_controls(4, 7)), "< 1 2 3 [4] 5 6 7 >");
    }
}
