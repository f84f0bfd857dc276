use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;

use super::ApiError;
use super::net::{BlockingHttp, HttpFetch, Request, Response, safe_api_call, send_http_request};
use super::types::{NewsItem, RawNewsPage};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/v1";
pub const DEFAULT_PAGE_SIZE: usize = 20;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const LOAD_ERROR: &str = "Unable to load news";

#[derive(Clone)]
pub struct NewsClient {
    endpoint: String,
    page_size: usize,
    http: Arc<dyn HttpFetch>,
}

impl NewsClient {
    pub fn new(endpoint: impl Into<String>, page_size: usize) -> Self {
        Self::with_http(endpoint, page_size, Arc::new(BlockingHttp::new(REQUEST_TIMEOUT)))
    }

    pub fn with_http(endpoint: impl Into<String>, page_size: usize, http: Arc<dyn HttpFetch>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            page_size: page_size.max(1),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn news_request(&self, category: &str, language: &str, page: usize) -> Result<Request, ApiError> {
        let mut url = Url::parse(&format!("{}/news", self.endpoint))
            .map_err(|e| ApiError::Network(format!("invalid endpoint {}: {e}", self.endpoint)))?;
        url.query_pairs_mut()
            .append_pair("category", category)
            .append_pair("lang", language)
            .append_pair("page", &page.to_string())
            .append_pair("limit", &self.page_size.to_string());

        Ok(Request::get(url.to_string())
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT))
    }

    /// Fetch one page of news. Runs the blocking request on tokio's blocking
    /// pool.
    pub async fn fetch_news(
        &self,
        category: &str,
        language: &str,
        page: usize,
    ) -> Result<Vec<NewsItem>, ApiError> {
        let request = self.news_request(category, language, page)?;
        let http = Arc::clone(&self.http);
        tracing::debug!(url = %request.url, "fetching news page");

        safe_api_call(
            || async move {
                let task = tokio::task::spawn_blocking(move || {
                    send_http_request(http.as_ref(), &request, parse_news_response, |e| {
                        Err(ApiError::from(e))
                    })
                });
                match task.await {
                    Ok(result) => result,
                    // Re-raise so the surrounding safe call reports it.
                    Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                    Err(e) => Err(ApiError::Network(e.to_string())),
                }
            },
            LOAD_ERROR,
        )
        .await
        .inspect_err(|e| tracing::warn!(category, page, error = %e, "news fetch failed"))
    }
}

fn parse_news_response(response: &mut Response) -> Result<Vec<NewsItem>, ApiError> {
    if !response.is_success() {
        let reason = reqwest::StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");
        return Err(ApiError::HttpStatus(response.status, reason.into()));
    }

    let body = response.body.string()?;
    let page: RawNewsPage = serde_json::from_str(&body)?;
    Ok(page.items.into_iter().filter_map(NewsItem::from_raw).collect())
}
