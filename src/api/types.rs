use serde::{Deserialize, Serialize};

/// Item as it arrives on the wire. Partner feeds disagree on field names, so
/// the common spellings are accepted.
#[derive(Debug, Deserialize)]
pub struct RawNewsItem {
    pub title: Option<String>,
    pub source: Option<String>,
    #[serde(default, alias = "time", alias = "publishedAt")]
    pub published: Option<u64>,
    #[serde(default, alias = "imageUrl", alias = "image")]
    pub thumbnail: Option<String>,
    #[serde(alias = "newsUrl", alias = "url")]
    pub link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawNewsPage {
    #[serde(default)]
    pub items: Vec<RawNewsItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub published: u64,
    pub thumbnail: Option<String>,
    pub link: String,
}

impl NewsItem {
    pub fn from_raw(raw: RawNewsItem) -> Option<Self> {
        let title = raw.title.filter(|t| !t.trim().is_empty())?;
        let link = raw.link.filter(|l| !l.trim().is_empty())?;
        Some(NewsItem {
            title: html_escape::decode_html_entities(title.trim()).to_string(),
            source: raw
                .source
                .map(|s| html_escape::decode_html_entities(s.trim()).to_string())
                .unwrap_or_else(|| domain_of(&link).to_string()),
            published: raw.published.unwrap_or(0),
            thumbnail: raw.thumbnail.filter(|t| !t.is_empty()),
            link,
        })
    }

    /// Host of the target URL without a leading `www.`.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn domain(&self) -> &str {
        domain_of(&self.link)
    }
}

fn domain_of(url: &str) -> &str {
    url.split("://")
        .nth(1)
        .and_then(|s| s.split('/').next())
        .map(|s| s.strip_prefix("www.").unwrap_or(s))
        .unwrap_or(url)
}

/// One page of news, as printed by `portal fetch`.
#[derive(Debug, Clone, Serialize)]
pub struct NewsPage {
    pub category: String,
    pub language: String,
    pub page: usize,
    pub items: Vec<NewsItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: Option<&str>, link: Option<&str>) -> RawNewsItem {
        RawNewsItem {
            title: title.map(String::from),
            source: Some("Example Times".to_string()),
            published: Some(1700000000),
            thumbnail: None,
            link: link.map(String::from),
        }
    }

    #[test]
    fn from_raw_keeps_complete_items() {
        let item = NewsItem::from_raw(raw(Some("Hello"), Some("https://example.com/a"))).unwrap();
        assert_eq!(item.title, "Hello");
        assert_eq!(item.source, "Example Times");
        assert_eq!(item.published, 1700000000);
    }

    #[test]
    fn from_raw_drops_items_without_title_or_link() {
        assert!(NewsItem::from_raw(raw(None, Some("https://example.com"))).is_none());
        assert!(NewsItem::from_raw(raw(Some("  "), Some("https://example.com"))).is_none());
        assert!(NewsItem::from_raw(raw(Some("Hello"), None)).is_none());
    }

    #[test]
    fn from_raw_decodes_html_entities() {
        let item = NewsItem::from_raw(raw(
            Some("Markets &amp; &quot;Money&quot;"),
            Some("https://example.com"),
        ))
        .unwrap();
        assert_eq!(item.title, "Markets & \"Money\"");
    }

    #[test]
    fn missing_source_falls_back_to_domain() {
        let mut r = raw(Some("Hello"), Some("https://www.example.org/story/1"));
        r.source = None;
        let item = NewsItem::from_raw(r).unwrap();
        assert_eq!(item.source, "example.org");
        assert_eq!(item.domain(), "example.org");
    }

    #[test]
    fn wire_aliases_are_accepted() {
        let json = r#"{"items":[{"title":"T","source":"S","time":5,"imageUrl":"https://img","newsUrl":"https://n"}]}"#;
        let page: RawNewsPage = serde_json::from_str(json).unwrap();
        let item = NewsItem::from_raw(page.items.into_iter().next().unwrap()).unwrap();
        assert_eq!(item.published, 5);
        assert_eq!(item.thumbnail.as_deref(), Some("https://img"));
        assert_eq!(item.link, "https://n");
    }
}
