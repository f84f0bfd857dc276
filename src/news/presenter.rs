use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use super::{DEFAULT_CATEGORY, DEFAULT_LANGUAGE, NewsListListener, NewsViewContract};
use crate::api::{ApiError, NewsClient, NewsItem};
use crate::app::DebugState;

pub enum AsyncResult {
    News {
        generation: u64,
        task_id: u64,
        page: usize,
        result: Result<Vec<NewsItem>, ApiError>,
    },
}

/// Loading and pagination state.
#[derive(Debug, Default)]
pub struct LoadState {
    pub loading_more: bool,
    pub loading_start: Option<Instant>,
    pub next_page: usize,
    pub has_more: bool,
    pub error: Option<String>,
}

impl LoadState {
    pub fn new() -> Self {
        Self {
            has_more: true,
            ..Default::default()
        }
    }

    pub fn set_loading_more(&mut self, loading: bool) {
        self.loading_more = loading;
        if loading {
            self.loading_start = Some(Instant::now());
        }
        // loading_start stays set for the minimum spinner duration
    }

    pub fn should_show_spinner(&self) -> bool {
        const MIN_SPINNER_DURATION: Duration = Duration::from_millis(500);
        if let Some(start) = self.loading_start {
            self.loading_more || start.elapsed() < MIN_SPINNER_DURATION
        } else {
            false
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }
}

/// Owns the news data for one category/language pair and pages it in.
pub struct NewsPresenter {
    client: NewsClient,
    category: String,
    language: String,
    items: Option<Vec<NewsItem>>,
    pub load: LoadState,
    pub generation: u64,
    pub debug: DebugState,
    result_tx: mpsc::Sender<AsyncResult>,
    pub result_rx: mpsc::Receiver<AsyncResult>,
}

impl NewsPresenter {
    pub fn new(client: NewsClient) -> Self {
        let (result_tx, result_rx) = mpsc::channel(10);
        Self {
            client,
            category: DEFAULT_CATEGORY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            items: None,
            load: LoadState::new(),
            generation: 0,
            debug: DebugState::new(),
            result_tx,
            result_rx,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn items(&self) -> Option<&[NewsItem]> {
        self.items.as_deref()
    }

    /// Point the presenter at a category and language. Switching to a
    /// different pair drops what was loaded for the old one.
    pub fn setup_news_view_model(&mut self, category: &str, language: &str) {
        if self.category == category && self.language == language {
            return;
        }
        tracing::info!(category, language, "switching news source");
        self.debug.log(format!("Source: {category}/{language}"));
        self.category = category.to_string();
        self.language = language.to_string();
        self.reset();
    }

    /// Throw away everything and start again from the first page.
    pub fn refresh(&mut self, view: &mut dyn NewsViewContract) {
        self.reset();
        self.load_more();
        view.update_news(None);
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.items = None;
        self.load = LoadState::new();
    }

    /// Apply a finished fetch and push the result to `view`.
    pub fn handle_result(&mut self, result: AsyncResult, view: &mut dyn NewsViewContract) {
        if self.apply_result(result) {
            view.update_news(self.items.clone());
        }
    }

    /// Apply a finished fetch without a view attached. Returns false when the
    /// result was stale and ignored.
    pub fn apply_result(&mut self, result: AsyncResult) -> bool {
        let AsyncResult::News {
            generation,
            task_id,
            page,
            result,
        } = result;

        if generation != self.generation {
            self.debug.end_task(task_id, "discarded (stale)");
            return false;
        }
        self.debug.end_task(
            task_id,
            if result.is_ok() {
                "completed"
            } else {
                "failed"
            },
        );
        self.load.set_loading_more(false);

        match result {
            Ok(batch) => {
                tracing::info!(page, count = batch.len(), "news page loaded");
                let items = self.items.get_or_insert_with(Vec::new);
                if batch.is_empty() {
                    // An empty first page leaves has_more alone so "try
                    // again" can still ask for it.
                    if !items.is_empty() {
                        self.load.has_more = false;
                    }
                } else {
                    items.extend(batch);
                    self.load.next_page = page + 1;
                }
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "news page failed");
                self.load.set_error(e.user_message());
                self.items.get_or_insert_with(Vec::new);
            }
        }
        true
    }

    fn spawn_fetch(&mut self, page: usize) {
        let client = self.client.clone();
        let category = self.category.clone();
        let language = self.language.clone();
        let tx = self.result_tx.clone();
        let generation = self.generation;

        let task_desc = if page == 0 {
            format!("Load {category}")
        } else {
            format!("Load {category} page {page}")
        };
        let task_id = self.debug.start_task(task_desc);

        tokio::spawn(async move {
            let result = client.fetch_news(&category, &language, page).await;
            let _ = tx
                .send(AsyncResult::News {
                    generation,
                    task_id,
                    page,
                    result,
                })
                .await;
        });
    }
}

impl NewsListListener for NewsPresenter {
    /// Request the next page. Calls while a page is in flight, or after the
    /// feed ran dry, do nothing.
    fn load_more(&mut self) {
        if self.load.loading_more || !self.load.has_more {
            return;
        }
        self.load.clear_error();
        self.load.set_loading_more(true);
        self.spawn_fetch(self.load.next_page);
    }

    fn on_show(&mut self, view: &mut dyn NewsViewContract) {
        if self.items.is_none() && !self.load.loading_more {
            self.load_more();
        }
        view.update_news(self.items.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{NewsScreen, ScreenArgs, ViewStatus};
    use crate::test_utils::{NewsItemBuilder, canned_client, sample_news};

    fn presenter() -> NewsPresenter {
        NewsPresenter::new(canned_client(200, r#"{"items":[]}"#))
    }

    fn news_result(p: &NewsPresenter, page: usize, result: Result<Vec<NewsItem>, ApiError>) -> AsyncResult {
        AsyncResult::News {
            generation: p.generation,
            task_id: 0,
            page,
            result,
        }
    }

    #[tokio::test]
    async fn load_more_is_idempotent_while_in_flight() {
        let mut p = presenter();
        p.load_more();
        p.load_more();
        p.load_more();
        assert!(p.load.loading_more);
        assert_eq!(p.debug.running_tasks.len(), 1);
    }

    #[test]
    fn load_more_does_nothing_when_feed_is_exhausted() {
        let mut p = presenter();
        p.load.has_more = false;
        p.load_more();
        assert!(!p.load.loading_more);
        assert!(p.debug.running_tasks.is_empty());
    }

    #[test]
    fn pages_are_appended_and_pushed_to_the_view() {
        let mut p = presenter();
        let mut screen = NewsScreen::new(ScreenArgs::default());

        let first = sample_news();
        p.handle_result(news_result(&p, 0, Ok(first.clone())), &mut screen);
        assert_eq!(p.items().unwrap().len(), first.len());
        assert_eq!(p.load.next_page, 1);
        assert_eq!(screen.status(), ViewStatus::Content);

        let more = vec![NewsItemBuilder::new().title("Later").build()];
        p.handle_result(news_result(&p, 1, Ok(more)), &mut screen);
        assert_eq!(p.items().unwrap().len(), first.len() + 1);
        assert_eq!(p.load.next_page, 2);
        assert_eq!(screen.items().len(), first.len() + 1);
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut p = presenter();
        let stale = AsyncResult::News {
            generation: p.generation,
            task_id: 0,
            page: 0,
            result: Ok(sample_news()),
        };
        p.setup_news_view_model("sports", "english");
        assert!(!p.apply_result(stale));
        assert!(p.items().is_none());
    }

    #[test]
    fn empty_first_page_is_empty_but_retryable() {
        let mut p = presenter();
        let mut screen = NewsScreen::new(ScreenArgs::default());
        p.handle_result(news_result(&p, 0, Ok(vec![])), &mut screen);
        assert_eq!(p.items(), Some(&[][..]));
        assert!(p.load.has_more);
        assert_eq!(screen.status(), ViewStatus::Empty);
    }

    #[test]
    fn empty_later_page_ends_the_feed() {
        let mut p = presenter();
        assert!(p.apply_result(news_result(&p, 0, Ok(sample_news()))));
        assert!(p.apply_result(news_result(&p, 1, Ok(vec![]))));
        assert!(!p.load.has_more);
        assert_eq!(p.load.next_page, 1);
    }

    #[test]
    fn first_page_error_shows_empty_with_message() {
        let mut p = presenter();
        let mut screen = NewsScreen::new(ScreenArgs::default());
        p.handle_result(
            news_result(&p, 0, Err(ApiError::Network("connection failed".into()))),
            &mut screen,
        );
        assert_eq!(p.items(), Some(&[][..]));
        assert_eq!(
            p.load.error.as_deref(),
            Some("Network error: connection failed")
        );
        assert!(p.load.has_more);
        assert_eq!(screen.status(), ViewStatus::Empty);
    }

    #[test]
    fn later_page_error_keeps_items() {
        let mut p = presenter();
        p.apply_result(news_result(&p, 0, Ok(sample_news())));
        p.apply_result(news_result(&p, 1, Err(ApiError::HttpStatus(500, "x".into()))));
        assert_eq!(p.items().unwrap().len(), sample_news().len());
        assert!(p.load.error.is_some());
        assert_eq!(p.load.next_page, 1);
    }

    #[test]
    fn setup_with_same_source_keeps_items() {
        let mut p = presenter();
        p.apply_result(news_result(&p, 0, Ok(sample_news())));
        let generation = p.generation;
        p.setup_news_view_model("top-news", "english");
        assert_eq!(p.generation, generation);
        assert!(p.items().is_some());
    }

    #[test]
    fn setup_with_new_source_resets() {
        let mut p = presenter();
        p.apply_result(news_result(&p, 0, Ok(sample_news())));
        p.setup_news_view_model("top-news", "hindi");
        assert!(p.items().is_none());
        assert_eq!(p.language(), "hindi");
        assert_eq!(p.load.next_page, 0);
    }

    #[tokio::test]
    async fn on_show_starts_first_load_and_shows_loading() {
        let mut p = presenter();
        let mut screen = NewsScreen::new(ScreenArgs::default());
        p.on_show(&mut screen);
        assert!(p.load.loading_more);
        assert_eq!(screen.status(), ViewStatus::Loading);
    }

    #[test]
    fn on_show_re_emits_loaded_items() {
        let mut p = presenter();
        p.apply_result(news_result(&p, 0, Ok(sample_news())));
        let mut screen = NewsScreen::new(ScreenArgs::default());
        p.on_show(&mut screen);
        assert!(!p.load.loading_more);
        assert_eq!(screen.items().len(), sample_news().len());
    }

    #[tokio::test]
    async fn fetch_round_trip_through_channel() {
        let body = r#"{"items":[{"title":"Hello","source":"Wire","published":1700000000,"link":"https://wire.example/1"}]}"#;
        let mut p = NewsPresenter::new(canned_client(200, body));
        let mut screen = NewsScreen::new(ScreenArgs::default());

        p.on_show(&mut screen);
        let result = p.result_rx.recv().await.expect("fetch result");
        p.handle_result(result, &mut screen);

        assert!(!p.load.loading_more);
        assert!(p.debug.running_tasks.is_empty());
        assert_eq!(screen.status(), ViewStatus::Content);
        assert_eq!(screen.items()[0].title, "Hello");
    }

    #[tokio::test]
    async fn refresh_resets_and_shows_loading() {
        let mut p = presenter();
        let mut screen = NewsScreen::new(ScreenArgs::default());
        p.handle_result(news_result(&p, 0, Ok(sample_news())), &mut screen);
        let generation = p.generation;

        p.refresh(&mut screen);

        assert_eq!(p.generation, generation + 1);
        assert!(p.items().is_none());
        assert!(p.load.loading_more);
        assert_eq!(screen.status(), ViewStatus::Loading);
    }
}
