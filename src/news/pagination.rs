/// How close to the end of the list, in items, a scroll has to get before
/// the next page is requested.
pub const NEWS_THRESHOLD: usize = 10;

/// Snapshot of the list viewport taken on a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    /// Rows currently on screen.
    pub visible: usize,
    /// Index of the last row on screen.
    pub last_visible: usize,
    /// Items in the list.
    pub total: usize,
}

impl ScrollMetrics {
    pub fn should_load_more(&self) -> bool {
        should_load_more(self.visible, self.last_visible, self.total)
    }
}

pub fn should_load_more(visible: usize, last_visible: usize, total: usize) -> bool {
    visible
        .saturating_add(last_visible)
        .saturating_add(NEWS_THRESHOLD)
        >= total
}
