use anyhow::{Context, Result};

use super::ScreenNavigator;

/// Hands URLs to the system browser.
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl ScreenNavigator for SystemBrowser {
    fn show_browser_screen(&mut self, url: &str, new_tab: bool, background: bool) -> Result<()> {
        tracing::info!(url, new_tab, background, "opening in browser");
        // `open` has no notion of tabs; placement is up to the browser.
        open::that(url).with_context(|| format!("Failed to open {url}"))
    }
}
