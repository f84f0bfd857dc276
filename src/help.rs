//! Help text built from the keymaps, so hints never drift from bindings.

use crate::app::Message;
use crate::keys::{Keymap, format_key};

/// One or more related actions shown under a single label.
pub struct HelpItem {
    /// Keys for these are joined with "/".
    messages: Vec<Message>,
    label: &'static str,
}

impl HelpItem {
    pub fn new(message: Message, label: &'static str) -> Self {
        Self {
            messages: vec![message],
            label,
        }
    }

    pub fn pair(first: Message, second: Message, label: &'static str) -> Self {
        Self {
            messages: vec![first, second],
            label,
        }
    }

    fn keys(&self, keymap: &Keymap) -> Option<String> {
        let keys: Vec<String> = self
            .messages
            .iter()
            .filter_map(|msg| {
                keymap
                    .find_key(msg)
                    .map(|(code, mods)| format_key(code, mods))
            })
            .collect();
        (!keys.is_empty()).then(|| keys.join("/"))
    }

    /// `keys:label`, or None when nothing is bound.
    pub fn format(&self, keymap: &Keymap) -> Option<String> {
        self.keys(keymap).map(|keys| format!("{keys}:{}", self.label))
    }

    pub fn format_for_overlay(&self, keymap: &Keymap) -> Option<(String, &'static str)> {
        self.keys(keymap).map(|keys| (keys, self.label))
    }
}

pub fn format_items(items: &[HelpItem], keymap: &Keymap) -> String {
    items
        .iter()
        .filter_map(|item| item.format(keymap))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Status bar hints while the portal is up.
pub fn portal_hints() -> Vec<HelpItem> {
    use Message::{CollapsePortal, NextCategory, OpenItem, PrevCategory, Quit, ToggleHelp};
    vec![
        HelpItem::new(OpenItem, "open"),
        HelpItem::pair(PrevCategory, NextCategory, "category"),
        HelpItem::new(CollapsePortal, "collapse"),
        HelpItem::new(ToggleHelp, "help"),
        HelpItem::new(Quit, "quit"),
    ]
}

pub fn home_hints() -> Vec<HelpItem> {
    use Message::{Quit, ToggleHelp, TogglePortal};
    vec![
        HelpItem::new(TogglePortal, "news"),
        HelpItem::new(ToggleHelp, "help"),
        HelpItem::new(Quit, "quit"),
    ]
}

pub fn portal_overlay_items() -> Vec<HelpItem> {
    use Message::{
        CollapsePortal, ExpandPortal, NextCategory, OpenItem, PageDown, PageUp, PrevCategory,
        Quit, Refresh, SelectFirst, SelectLast, SelectNext, SelectPrev, ToggleDebug, ToggleHelp,
        TogglePortal, TryAgain,
    };
    vec![
        HelpItem::pair(SelectNext, SelectPrev, "navigate"),
        HelpItem::pair(SelectFirst, SelectLast, "top/bottom"),
        HelpItem::pair(PageDown, PageUp, "page"),
        HelpItem::new(OpenItem, "open article"),
        HelpItem::pair(PrevCategory, NextCategory, "switch category"),
        HelpItem::new(TryAgain, "try again"),
        HelpItem::new(Refresh, "refresh"),
        HelpItem::pair(CollapsePortal, ExpandPortal, "collapse/expand"),
        HelpItem::new(TogglePortal, "close portal"),
        HelpItem::new(ToggleDebug, "debug"),
        HelpItem::new(Quit, "quit"),
        HelpItem::new(ToggleHelp, "close"),
    ]
}

pub fn home_overlay_items() -> Vec<HelpItem> {
    use Message::{NextCategory, PrevCategory, Quit, ToggleDebug, ToggleHelp, TogglePortal};
    vec![
        HelpItem::new(TogglePortal, "open news"),
        HelpItem::pair(PrevCategory, NextCategory, "switch category"),
        HelpItem::new(ToggleDebug, "debug"),
        HelpItem::new(Quit, "quit"),
        HelpItem::new(ToggleHelp, "close"),
    ]
}
