use serde::Serialize;

/// Unsplash stops serving search pages past this point.
pub const MAX_PAGES: u32 = 50;

pub const DEFAULT_WINDOW: u32 = 5;

/// `ceil(total_count / per_page)` clamped to `1..=MAX_PAGES`.
pub fn total_pages(total_count: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 1;
    }

    let pages = total_count.div_ceil(u64::from(per_page));
    pages.clamp(1, u64::from(MAX_PAGES)) as u32
}

/// Contiguous, ascending page numbers centred on `current` where the
/// bounds allow it. Always `min(window_size, total_pages)` long.
pub fn window(current: u32, total_pages: u32, window_size: u32) -> Vec<u32> {
    if window_size == 0 || total_pages == 0 {
        return vec![];
    }

    let half = window_size / 2;
    let start = current.saturating_sub(half).max(1);
    let end = total_pages.min(start.saturating_add(window_size - 1));
    let start = end.saturating_sub(window_size - 1).max(1);

    (start..=end).collect()
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(current: u32, total_count: u64, per_page: u32) -> Self {
        Pagination {
            current: current.max(1),
            total_pages: total_pages(total_count, per_page),
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    pub fn previous(&self) -> u32 {
        self.current.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> u32 {
        self.total_pages.min(self.current.saturating_add(1))
    }

    pub fn pages(&self) -> Vec<u32> {
        window(self.current, self.total_pages, DEFAULT_WINDOW)
    }
}
