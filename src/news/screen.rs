use anyhow::Result;

use super::memento;
use super::pagination::ScrollMetrics;
use super::status::{RegionVisibility, ViewStatus};
use super::{
    BottomSheet, NewsListListener, NewsPresenter, NewsViewContract, ScreenArgs, ScreenNavigator,
};
use crate::api::NewsItem;

/// Rows moved by page up/down before the viewport has been measured.
const DEFAULT_PAGE: usize = 10;

/// The news list as shown inside the portal.
#[derive(Debug)]
pub struct NewsScreen {
    args: ScreenArgs,
    sheet: Option<BottomSheet>,
    items: Vec<NewsItem>,
    status: ViewStatus,
    regions: RegionVisibility,
    selected_index: usize,
    scroll_offset: usize,
    viewport_rows: usize,
}

impl NewsScreen {
    pub fn new(args: ScreenArgs) -> Self {
        let status = ViewStatus::Loading;
        Self {
            args,
            sheet: None,
            items: Vec::new(),
            status,
            regions: status.regions(),
            selected_index: 0,
            scroll_offset: 0,
            viewport_rows: 0,
        }
    }

    /// Host the screen in `sheet`; status changes will drive its collapse
    /// behaviour.
    pub fn in_sheet(mut self, sheet: BottomSheet) -> Self {
        self.sheet = Some(sheet);
        self
    }

    pub fn sheet(&self) -> Option<&BottomSheet> {
        self.sheet.as_ref()
    }

    pub fn sheet_mut(&mut self) -> Option<&mut BottomSheet> {
        self.sheet.as_mut()
    }

    /// Tear the screen down, handing back the sheet it lived in.
    pub fn into_sheet(self) -> Option<BottomSheet> {
        self.sheet
    }

    pub fn args(&self) -> &ScreenArgs {
        &self.args
    }

    pub fn set_args(&mut self, args: ScreenArgs) {
        self.args = args;
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn status(&self) -> ViewStatus {
        self.status
    }

    pub fn regions(&self) -> RegionVisibility {
        self.regions
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_item(&self) -> Option<&NewsItem> {
        self.items.get(self.selected_index)
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Wire the screen to `presenter` and ask for the first data.
    pub fn on_view_created(&mut self, presenter: &mut NewsPresenter) {
        presenter.setup_news_view_model(self.args.category(), self.args.language());
        presenter.on_show(self);
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows;
        self.ensure_selection_visible();
    }

    pub fn first_visible(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.scroll_offset)
    }

    pub fn visible_count(&self) -> usize {
        self.viewport_rows
            .min(self.items.len().saturating_sub(self.scroll_offset))
    }

    pub fn last_visible(&self) -> Option<usize> {
        match self.visible_count() {
            0 => None,
            n => Some(self.scroll_offset + n - 1),
        }
    }

    pub fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            visible: self.visible_count(),
            last_visible: self.last_visible().unwrap_or(0),
            total: self.items.len(),
        }
    }

    /// Runs after every scroll. Asks `listener` for more items once the
    /// viewport nears the end of the list; returns whether it did.
    pub fn on_scrolled(&mut self, listener: &mut dyn NewsListListener) -> bool {
        if !self.regions.list || self.viewport_rows == 0 {
            return false;
        }
        let metrics = self.scroll_metrics();
        if metrics.should_load_more() {
            tracing::trace!(?metrics, "pagination threshold reached");
            listener.load_more();
            true
        } else {
            false
        }
    }

    /// Open the selected item and remember where the list was. Returns the
    /// opened URL, if anything was selected.
    pub fn on_item_clicked(&mut self, navigator: &mut dyn ScreenNavigator) -> Result<Option<String>> {
        let Some(item) = self.selected_item() else {
            return Ok(None);
        };
        let url = item.link.clone();
        navigator.show_browser_screen(&url, true, false)?;

        // first visible row is enough; the offset within it isn't kept
        if let Some(first) = self.first_visible() {
            memento::remember(first);
        }
        Ok(Some(url))
    }

    pub fn scroll_to_position(&mut self, position: usize) {
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        let position = position.min(last);
        self.selected_index = position;
        self.scroll_offset = position.min(self.max_offset());
    }

    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.items.len() {
            self.selected_index += 1;
            self.ensure_selection_visible();
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.ensure_selection_visible();
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        if let Some(last) = self.items.len().checked_sub(1) {
            self.selected_index = last;
            self.ensure_selection_visible();
        }
    }

    pub fn page_down(&mut self) {
        if let Some(last) = self.items.len().checked_sub(1) {
            self.selected_index = (self.selected_index + self.page_size()).min(last);
            self.ensure_selection_visible();
        }
    }

    pub fn page_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(self.page_size());
        self.ensure_selection_visible();
    }

    fn page_size(&self) -> usize {
        if self.viewport_rows == 0 {
            DEFAULT_PAGE
        } else {
            self.viewport_rows
        }
    }

    fn max_offset(&self) -> usize {
        if self.viewport_rows == 0 {
            self.items.len().saturating_sub(1)
        } else {
            self.items.len().saturating_sub(self.viewport_rows)
        }
    }

    fn ensure_selection_visible(&mut self) {
        if let Some(last) = self.items.len().checked_sub(1) {
            self.selected_index = self.selected_index.min(last);
        } else {
            self.selected_index = 0;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.viewport_rows > 0 && self.selected_index >= self.scroll_offset + self.viewport_rows {
            self.scroll_offset = self.selected_index + 1 - self.viewport_rows;
        }
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }
}

impl NewsViewContract for NewsScreen {
    fn category(&self) -> &str {
        self.args.category()
    }

    fn language(&self) -> &str {
        self.args.language()
    }

    fn update_news(&mut self, items: Option<Vec<NewsItem>>) {
        self.on_status(items.as_deref());
        self.items = items.unwrap_or_default();
        self.ensure_selection_visible();

        if let Some(position) = memento::peek()
            && self.items.len() > position
        {
            tracing::debug!(position, "restoring news scroll position");
            self.scroll_to_position(position);
            memento::forget();
        }
    }

    fn on_status(&mut self, items: Option<&[NewsItem]>) {
        self.status = ViewStatus::from_items(items);
        self.regions = self.status.regions();
        if self.status.skips_collapsed()
            && let Some(sheet) = &mut self.sheet
        {
            sheet.skip_collapsed = true;
        }
    }
}
