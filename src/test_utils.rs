//! Test data builders for app and view testing.

use std::io::{self, Cursor};
use std::sync::Arc;

use anyhow::bail;

use crate::api::net::{Body, HttpFetch, Request, Response};
use crate::api::{NewsClient, NewsItem};
use crate::app::App;
use crate::news::{AsyncResult, ScreenArgs, ScreenNavigator};
use crate::theme::{ResolvedTheme, ThemeVariant, default_for_variant};
use crate::time::{Clock, fixed_clock};

/// Fixed timestamp for deterministic tests: 2023-11-15 00:00:00 UTC
/// This is 1 day after the base timestamp (1700000000) used in sample data,
/// so items will show as "1d ago".
pub const TEST_NOW: i64 = 1700092800;

pub struct NewsItemBuilder {
    title: String,
    source: String,
    published: u64,
    thumbnail: Option<String>,
    link: String,
}

impl Default for NewsItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl NewsItemBuilder {
    pub fn new() -> Self {
        Self {
            title: "Test headline".to_string(),
            source: "Test Wire".to_string(),
            published: 1700000000,
            thumbnail: None,
            link: "https://news.example.com/story".to_string(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn published(mut self, published: u64) -> Self {
        self.published = published;
        self
    }

    pub fn thumbnail(mut self, url: &str) -> Self {
        self.thumbnail = Some(url.to_string());
        self
    }

    pub fn link(mut self, link: &str) -> Self {
        self.link = link.to_string();
        self
    }

    pub fn build(self) -> NewsItem {
        NewsItem {
            title: self.title,
            source: self.source,
            published: self.published,
            thumbnail: self.thumbnail,
            link: self.link,
        }
    }
}

/// `count` generic items; item `i` links to `https://news.example.com/{i}`.
pub fn news_items(count: usize) -> Vec<NewsItem> {
    (0..count)
        .map(|i| {
            NewsItemBuilder::new()
                .title(&format!("Headline {i}"))
                .link(&format!("https://news.example.com/{i}"))
                .build()
        })
        .collect()
}

pub fn sample_news() -> Vec<NewsItem> {
    vec![
        NewsItemBuilder::new()
            .title("Monsoon arrives early across the southern coast")
            .source("The Daily Ledger")
            .published(1700000000)
            .thumbnail("https://img.example.com/monsoon.jpg")
            .link("https://ledger.example.com/monsoon")
            .build(),
        NewsItemBuilder::new()
            .title("Central bank holds rates steady for a third month")
            .source("Market Watchers")
            .published(1699990000)
            .link("https://markets.example.com/rates")
            .build(),
        NewsItemBuilder::new()
            .title("City marathon draws record twenty thousand runners")
            .source("Sport Daily")
            .published(1699980000)
            .link("https://sport.example.com/marathon")
            .build(),
        NewsItemBuilder::new()
            .title("New open-source browser engine reaches beta")
            .source("Tech Brief")
            .published(1699970000)
            .link("https://tech.example.com/engine-beta")
            .build(),
    ]
}

/// HTTP client that answers every request with the same response.
pub struct StaticHttp {
    status: u16,
    body: String,
}

impl HttpFetch for StaticHttp {
    fn fetch(&self, _request: &Request) -> io::Result<Response> {
        Ok(Response {
            status: self.status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: Body::new(Cursor::new(self.body.clone().into_bytes())),
        })
    }
}

pub fn canned_client(status: u16, body: &str) -> NewsClient {
    NewsClient::with_http(
        "https://news.example.com/v1",
        20,
        Arc::new(StaticHttp {
            status,
            body: body.to_string(),
        }),
    )
}

/// Navigator that records what it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub opened: Vec<(String, bool, bool)>,
    fail: bool,
}

impl RecordingNavigator {
    pub fn failing() -> Self {
        Self {
            opened: Vec::new(),
            fail: true,
        }
    }
}

impl ScreenNavigator for RecordingNavigator {
    fn show_browser_screen(
        &mut self,
        url: &str,
        new_tab: bool,
        background: bool,
    ) -> anyhow::Result<()> {
        if self.fail {
            bail!("no browser available");
        }
        self.opened.push((url.to_string(), new_tab, background));
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestAppBuilder {
    args: ScreenArgs,
    news: Option<Vec<NewsItem>>,
    error: Option<String>,
    show_help: bool,
    debug_visible: bool,
    last_opened: Option<String>,
    fail_navigation: bool,
    theme: ResolvedTheme,
    clock: Arc<dyn Clock>,
    viewport_height: Option<u16>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            args: ScreenArgs::default(),
            news: None,
            error: None,
            show_help: false,
            debug_visible: false,
            last_opened: None,
            fail_navigation: false,
            theme: default_for_variant(ThemeVariant::Dark),
            clock: fixed_clock(TEST_NOW),
            viewport_height: None,
        }
    }

    pub fn args(mut self, args: ScreenArgs) -> Self {
        self.args = args;
        self
    }

    /// Preload the presenter with `news` and open the portal on it.
    pub fn with_news(mut self, news: Vec<NewsItem>) -> Self {
        self.news = Some(news);
        self
    }

    pub fn error(mut self, msg: &str) -> Self {
        self.error = Some(msg.to_string());
        self
    }

    pub fn show_help(mut self) -> Self {
        self.show_help = true;
        self
    }

    pub fn debug_visible(mut self) -> Self {
        self.debug_visible = true;
        self
    }

    pub fn last_opened(mut self, url: &str) -> Self {
        self.last_opened = Some(url.to_string());
        self
    }

    pub fn failing_navigator(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    pub fn theme(mut self, theme: ResolvedTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn viewport_height(mut self, height: u16) -> Self {
        self.viewport_height = Some(height);
        self
    }

    pub fn build(self) -> App {
        let navigator: Box<dyn ScreenNavigator> = if self.fail_navigation {
            Box::new(RecordingNavigator::failing())
        } else {
            Box::new(RecordingNavigator::default())
        };
        let mut app = App::new(
            self.theme,
            self.args,
            canned_client(200, r#"{"items":[]}"#),
            navigator,
        );
        app.clock = self.clock;
        app.show_help = self.show_help;
        app.presenter.debug.visible = self.debug_visible;
        app.last_opened = self.last_opened;
        app.viewport_height = self.viewport_height;

        if let Some(news) = self.news {
            let result = AsyncResult::News {
                generation: app.presenter.generation,
                task_id: 0,
                page: 0,
                result: Ok(news),
            };
            app.presenter.apply_result(result);
            app.show_portal();
        }
        if let Some(error) = self.error {
            app.presenter.load.set_error(error);
        }
        app
    }
}
