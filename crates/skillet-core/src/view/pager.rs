/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// 1-based page cursor over the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Current page, 1 or more.
    pub page: u32,
    /// Records per page, 1 or more.
    pub page_size: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pager {
    /// Offset of the first record on the current page. A hand-built pager
    /// with a zero field reads as the clamped value.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.page_size)
    }

    /// Number of pages needed for `total` records, rounded up.
    pub fn total_pages(&self, total: u64) -> u32 {
        let size = u64::from(self.page_size.max(1));
        ((total + size - 1) / size) as u32
    }

    pub fn has_next(&self, total: u64) -> bool {
        u64::from(self.page) < u64::from(self.total_pages(total))
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Jump to a page. Pages below 1 clamp to 1; jumping past the end is
    /// allowed and simply yields an empty slice.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Change the page size and snap back to the first page.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_steps_by_page_size() {
        let pager = Pager {
            page: 3,
            page_size: 5,
        };
        assert_eq!(pager.offset(), 10);
        assert_eq!(Pager::default().offset(), 0);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let pager = Pager {
            page: 1,
            page_size: 5,
        };
        assert_eq!(pager.total_pages(0), 0);
        assert_eq!(pager.total_pages(10), 2);
        assert_eq!(pager.total_pages(11), 3);
        assert_eq!(pager.total_pages(1), 1);
    }

    #[test]
    fn test_next_and_prev_gating() {
        let mut pager = Pager {
            page: 1,
            page_size: 3,
        };
        assert!(!pager.has_prev());
        assert!(pager.has_next(7));
        assert!(!pager.has_next(0));
        assert!(!pager.has_next(3));

        pager.set_page(3);
        assert!(pager.has_prev());
        assert!(!pager.has_next(7));
    }

    #[test]
    fn test_set_page_clamps_to_one() {
        let mut pager = Pager::default();
        pager.set_page(0);
        assert_eq!(pager.page, 1);
    }

    #[test]
    fn test_zeroed_fields_are_clamped_on_read() {
        let pager = Pager {
            page: 0,
            page_size: 0,
        };
        assert_eq!(pager.offset(), 0);
        assert_eq!(pager.total_pages(10), 10);
        assert!(!pager.has_prev());
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut pager = Pager {
            page: 4,
            page_size: 5,
        };
        pager.set_page_size(10);
        assert_eq!(pager.page, 1);
        assert_eq!(pager.page_size, 10);

        pager.set_page_size(0);
        assert_eq!(pager.page_size, 1);
    }
}
