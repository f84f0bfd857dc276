mod client;
mod error;
pub mod net;
mod types;

pub use client::{DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE, NewsClient};
pub use error::ApiError;
pub use types::{NewsItem, NewsPage};
