//! The content portal's news feed: screen state, presenter and the contracts
//! between them.

pub mod memento;
pub mod navigator;
pub mod pagination;
pub mod presenter;
pub mod screen;
pub mod sheet;
pub mod status;

use anyhow::Result;

use crate::api::NewsItem;

pub use presenter::{AsyncResult, NewsPresenter};
pub use screen::NewsScreen;
pub use sheet::{BottomSheet, SheetState};
pub use status::ViewStatus;

pub const DEFAULT_CATEGORY: &str = "top-news";
pub const DEFAULT_LANGUAGE: &str = "english";

/// Categories offered by the category tabs, in display order.
pub const CATEGORIES: &[&str] = &[
    "top-news",
    "world",
    "business",
    "technology",
    "science",
    "health",
    "sports",
    "entertainment",
];

/// Human label for a category slug: `top-news` -> `Top News`.
pub fn category_label(category: &str) -> String {
    category
        .split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Arguments the screen is created with. Missing values fall back to the
/// portal defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenArgs {
    pub category: Option<String>,
    pub language: Option<String>,
}

impl ScreenArgs {
    pub fn new(category: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            language: Some(language.into()),
        }
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }
}

/// What the screen asks of whoever feeds it news.
pub trait NewsListListener {
    fn load_more(&mut self);
    fn on_show(&mut self, view: &mut dyn NewsViewContract);
}

/// What the presenter may do to the screen.
pub trait NewsViewContract {
    fn category(&self) -> &str;
    fn language(&self) -> &str;
    fn update_news(&mut self, items: Option<Vec<NewsItem>>);
    fn on_status(&mut self, items: Option<&[NewsItem]>);
}

/// Opens a URL outside the portal.
pub trait ScreenNavigator {
    fn show_browser_screen(&mut self, url: &str, new_tab: bool, background: bool) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_fall_back_to_defaults() {
        let args = ScreenArgs::default();
        assert_eq!(args.category(), "top-news");
        assert_eq!(args.language(), "english");
    }

    #[test]
    fn args_use_supplied_values() {
        let args = ScreenArgs::new("sports", "hindi");
        assert_eq!(args.category(), "sports");
        assert_eq!(args.language(), "hindi");
    }

    #[test]
    fn category_labels() {
        assert_eq!(category_label("top-news"), "Top News");
        assert_eq!(category_label("world"), "World");
        assert_eq!(category_label(""), "");
    }
}
