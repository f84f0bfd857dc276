use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use crate::api::NewsClient;
use crate::news::{
    AsyncResult, BottomSheet, CATEGORIES, NewsListListener, NewsPresenter, NewsScreen, ScreenArgs,
    ScreenNavigator, SheetState, ViewStatus,
};
use crate::theme::ResolvedTheme;
use crate::time::Clock;

#[derive(Debug)]
pub struct TaskInfo {
    pub id: u64,
    pub description: String,
    pub started_at: Instant,
}

#[derive(Debug)]
pub struct LogEntry {
    pub message: String,
}

/// Debug panel state: task tracking and log messages.
#[derive(Debug, Default)]
pub struct DebugState {
    pub visible: bool,
    pub running_tasks: Vec<TaskInfo>,
    pub log: VecDeque<LogEntry>,
    next_task_id: u64,
}

impl DebugState {
    const MAX_LOG_ENTRIES: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, msg: impl Into<String>) {
        let message = msg.into();
        tracing::debug!(target: "portal::tasks", "{message}");
        self.log.push_back(LogEntry { message });
        if self.log.len() > Self::MAX_LOG_ENTRIES {
            self.log.pop_front();
        }
    }

    pub fn start_task(&mut self, description: impl Into<String>) -> u64 {
        let id = self.next_task_id;
        self.next_task_id += 1;
        let desc = description.into();
        self.log(format!("Started: {}", desc));
        self.running_tasks.push(TaskInfo {
            id,
            description: desc,
            started_at: Instant::now(),
        });
        id
    }

    pub fn end_task(&mut self, id: u64, outcome: &str) {
        if let Some(pos) = self.running_tasks.iter().position(|t| t.id == id) {
            let task = self.running_tasks.remove(pos);
            let elapsed = task.started_at.elapsed();
            self.log(format!("{} {}: {:.2?}", task.description, outcome, elapsed));
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

/// The portal is either on screen, or put away with its sheet kept for
/// next time.
#[derive(Debug)]
pub enum Portal {
    Shown(NewsScreen),
    Dismissed(BottomSheet),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    PageDown,
    PageUp,
    OpenItem,
    TryAgain,
    Refresh,
    NextCategory,
    PrevCategory,
    CollapsePortal,
    ExpandPortal,
    TogglePortal,
    ToggleHelp,
    ToggleDebug,
    Quit,
    UpdateViewportHeight(u16),
}

pub struct App {
    pub portal: Portal,
    pub presenter: NewsPresenter,
    pub args: ScreenArgs,
    pub navigator: Box<dyn ScreenNavigator>,
    pub theme: ResolvedTheme,
    pub clock: Arc<dyn Clock>,
    pub should_quit: bool,
    pub show_help: bool,
    // Viewport tracking for list capacity
    pub viewport_height: Option<u16>,
    pub last_opened: Option<String>,
    pub flash: Option<String>,
}

impl App {
    /// Header line, status bar and the two border rows.
    pub const SHEET_OVERHEAD: u16 = 4;
    /// Title line plus source/time line.
    pub const ITEM_HEIGHT: u16 = 2;

    pub fn new(
        theme: ResolvedTheme,
        args: ScreenArgs,
        client: NewsClient,
        navigator: Box<dyn ScreenNavigator>,
    ) -> Self {
        let mut sheet = BottomSheet::new();
        sheet.hide();
        Self {
            portal: Portal::Dismissed(sheet),
            presenter: NewsPresenter::new(client),
            args,
            navigator,
            theme,
            clock: crate::time::system_clock(),
            should_quit: false,
            show_help: false,
            viewport_height: None,
            last_opened: None,
            flash: None,
        }
    }

    pub fn screen(&self) -> Option<&NewsScreen> {
        match &self.portal {
            Portal::Shown(screen) => Some(screen),
            Portal::Dismissed(_) => None,
        }
    }

    fn screen_mut(&mut self) -> Option<&mut NewsScreen> {
        match &mut self.portal {
            Portal::Shown(screen) => Some(screen),
            Portal::Dismissed(_) => None,
        }
    }

    pub fn sheet_state(&self) -> SheetState {
        match &self.portal {
            Portal::Shown(screen) => screen.sheet().map_or(SheetState::Expanded, |s| s.state),
            Portal::Dismissed(sheet) => sheet.state,
        }
    }

    pub fn handle_async_result(&mut self, result: AsyncResult) {
        match &mut self.portal {
            Portal::Shown(screen) => self.presenter.handle_result(result, screen),
            Portal::Dismissed(_) => {
                self.presenter.apply_result(result);
            }
        }
        // A failed page must not re-trigger itself; retrying is up to the user.
        match self.presenter.load.error.clone() {
            None => self.after_scroll(),
            Some(error) => {
                // The empty state shows the error itself, a filled list does not.
                if self
                    .screen()
                    .is_some_and(|screen| screen.status() == ViewStatus::Content)
                {
                    self.flash = Some(error);
                }
            }
        }
    }

    pub fn update(&mut self, msg: Message) {
        self.flash = None;

        match msg {
            Message::SelectNext => self.scroll_with(NewsScreen::select_next),
            Message::SelectPrev => self.scroll_with(NewsScreen::select_prev),
            Message::SelectFirst => self.scroll_with(NewsScreen::select_first),
            Message::SelectLast => self.scroll_with(NewsScreen::select_last),
            Message::PageDown => self.scroll_with(NewsScreen::page_down),
            Message::PageUp => self.scroll_with(NewsScreen::page_up),
            Message::OpenItem => self.open_item(),
            Message::TryAgain => self.presenter.load_more(),
            Message::Refresh => self.refresh(),
            Message::NextCategory => self.cycle_category(1),
            Message::PrevCategory => self.cycle_category(-1),
            Message::CollapsePortal => self.collapse_portal(),
            Message::ExpandPortal => self.expand_portal(),
            Message::TogglePortal => match self.portal {
                Portal::Shown(_) => self.dismiss_portal(),
                Portal::Dismissed(_) => self.show_portal(),
            },
            Message::ToggleHelp => self.show_help = !self.show_help,
            Message::ToggleDebug => self.presenter.debug.toggle(),
            Message::Quit => self.should_quit = true,
            Message::UpdateViewportHeight(height) => {
                self.viewport_height = Some(height);
                self.sync_viewport();
                self.after_scroll();
            }
        }
    }

    /// Rows of news the expanded list can show at the current terminal
    /// height.
    pub fn visible_item_capacity(&self) -> usize {
        let (Some(height), Some(screen)) = (self.viewport_height, self.screen()) else {
            return 0;
        };
        if self.sheet_state() != SheetState::Expanded {
            return 0;
        }
        let sheet_height = screen
            .sheet()
            .map_or(height, |sheet| sheet.height_in(height));
        (sheet_height.saturating_sub(Self::SHEET_OVERHEAD) / Self::ITEM_HEIGHT) as usize
    }

    /// Bring the portal up with a fresh screen in the kept sheet.
    pub fn show_portal(&mut self) {
        if matches!(self.portal, Portal::Shown(_)) {
            return;
        }
        let Portal::Dismissed(mut sheet) =
            std::mem::replace(&mut self.portal, Portal::Dismissed(BottomSheet::new()))
        else {
            return;
        };
        sheet.expand();
        let screen = NewsScreen::new(self.args.clone()).in_sheet(sheet);
        self.portal = Portal::Shown(screen);
        self.sync_viewport();
        if let Portal::Shown(screen) = &mut self.portal {
            screen.on_view_created(&mut self.presenter);
        }
        self.after_scroll();
    }

    pub fn dismiss_portal(&mut self) {
        if matches!(self.portal, Portal::Dismissed(_)) {
            return;
        }
        let Portal::Shown(screen) =
            std::mem::replace(&mut self.portal, Portal::Dismissed(BottomSheet::new()))
        else {
            return;
        };
        let mut sheet = screen.into_sheet().unwrap_or_default();
        sheet.hide();
        self.portal = Portal::Dismissed(sheet);
    }

    fn collapse_portal(&mut self) {
        let Some(sheet) = self.screen_mut().and_then(NewsScreen::sheet_mut) else {
            return;
        };
        sheet.collapse();
        if sheet.is_hidden() {
            self.dismiss_portal();
        } else {
            self.sync_viewport();
        }
    }

    fn expand_portal(&mut self) {
        if let Some(sheet) = self.screen_mut().and_then(NewsScreen::sheet_mut) {
            sheet.expand();
            self.sync_viewport();
            self.after_scroll();
        }
    }

    fn sync_viewport(&mut self) {
        let rows = self.visible_item_capacity();
        if let Some(screen) = self.screen_mut() {
            screen.set_viewport_rows(rows);
        }
    }

    fn scroll_with(&mut self, movement: fn(&mut NewsScreen)) {
        if let Some(screen) = self.screen_mut() {
            movement(screen);
            self.after_scroll();
        }
    }

    /// Give the screen its scroll callback.
    fn after_scroll(&mut self) {
        if self.sheet_state() != SheetState::Expanded {
            return;
        }
        if let Portal::Shown(screen) = &mut self.portal {
            screen.on_scrolled(&mut self.presenter);
        }
    }

    fn open_item(&mut self) {
        let Portal::Shown(screen) = &mut self.portal else {
            self.show_portal();
            return;
        };
        if screen.status() == ViewStatus::Empty {
            self.presenter.load_more();
            return;
        }
        match screen.on_item_clicked(self.navigator.as_mut()) {
            Ok(Some(url)) => {
                self.last_opened = Some(url);
                self.dismiss_portal();
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "navigation failed");
                self.flash = Some(format!("{e:#}"));
            }
        }
    }

    fn refresh(&mut self) {
        if let Portal::Shown(screen) = &mut self.portal {
            screen.select_first();
            self.presenter.refresh(screen);
        }
    }

    fn cycle_category(&mut self, direction: i32) {
        let current = CATEGORIES
            .iter()
            .position(|c| *c == self.args.category())
            .unwrap_or(0);
        let next = (current as i32 + direction).rem_euclid(CATEGORIES.len() as i32) as usize;
        self.args.category = Some(CATEGORIES[next].to_string());

        if let Portal::Shown(screen) = &mut self.portal {
            screen.set_args(self.args.clone());
            screen.select_first();
            screen.on_view_created(&mut self.presenter);
        }
    }
}
