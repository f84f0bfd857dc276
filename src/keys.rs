use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Message, Portal};

/// A declarative keybinding map that can be composed and extended.
#[derive(Clone)]
pub struct Keymap {
    bindings: Vec<(KeyCode, KeyModifiers, Message)>,
}

impl Keymap {
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, code: KeyCode, message: Message) -> Self {
        self.bindings.push((code, KeyModifiers::NONE, message));
        self
    }

    pub fn bind_ctrl(mut self, code: KeyCode, message: Message) -> Self {
        self.bindings.push((code, KeyModifiers::CONTROL, message));
        self
    }

    /// Later bindings take precedence over earlier ones.
    pub fn get(&self, event: &KeyEvent) -> Option<Message> {
        self.bindings
            .iter()
            .rev()
            .find(|(code, mods, _)| *code == event.code && event.modifiers.contains(*mods))
            .map(|(_, _, msg)| msg.clone())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn extend(mut self, other: Self) -> Self {
        self.bindings.extend(other.bindings);
        self
    }

    /// First key bound to `message`, for help text.
    pub fn find_key(&self, message: &Message) -> Option<(KeyCode, KeyModifiers)> {
        self.bindings
            .iter()
            .find(|(_, _, msg)| msg == message)
            .map(|(code, mods, _)| (*code, *mods))
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

pub fn format_key(code: KeyCode, mods: KeyModifiers) -> String {
    let key_str = match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    };
    if mods.contains(KeyModifiers::CONTROL) {
        format!("C-{key_str}")
    } else {
        key_str
    }
}

/// Keys that work whether or not the portal is up.
pub fn global_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('q'), Message::Quit)
        .bind_ctrl(KeyCode::Char('c'), Message::Quit)
        .bind(KeyCode::Char('`'), Message::ToggleDebug)
        .bind(KeyCode::Char('p'), Message::TogglePortal)
        .bind(KeyCode::Char('?'), Message::ToggleHelp)
}

fn help_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('?'), Message::ToggleHelp)
        .bind(KeyCode::Esc, Message::ToggleHelp)
        .bind(KeyCode::Char('q'), Message::ToggleHelp)
        .bind_ctrl(KeyCode::Char('c'), Message::ToggleHelp)
}

/// Home screen with the portal dismissed.
pub fn home_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Enter, Message::TogglePortal)
        .bind(KeyCode::Char('H'), Message::PrevCategory)
        .bind(KeyCode::Char('L'), Message::NextCategory)
}

pub fn portal_keymap() -> Keymap {
    Keymap::new()
        .bind(KeyCode::Char('j'), Message::SelectNext)
        .bind(KeyCode::Down, Message::SelectNext)
        .bind(KeyCode::Char('k'), Message::SelectPrev)
        .bind(KeyCode::Up, Message::SelectPrev)
        .bind(KeyCode::Char('g'), Message::SelectFirst)
        .bind(KeyCode::Char('G'), Message::SelectLast)
        .bind_ctrl(KeyCode::Char('d'), Message::PageDown)
        .bind_ctrl(KeyCode::Char('u'), Message::PageUp)
        .bind(KeyCode::Enter, Message::OpenItem)
        .bind(KeyCode::Char('t'), Message::TryAgain)
        .bind(KeyCode::Char('r'), Message::Refresh)
        .bind(KeyCode::Char('H'), Message::PrevCategory)
        .bind(KeyCode::Char('L'), Message::NextCategory)
        .bind(KeyCode::Char('c'), Message::CollapsePortal)
        .bind(KeyCode::Esc, Message::CollapsePortal)
        .bind(KeyCode::Char('e'), Message::ExpandPortal)
}

pub fn handle_key(key: KeyEvent, app: &App) -> Option<Message> {
    if app.show_help {
        return help_keymap().get(&key);
    }

    if let Some(msg) = global_keymap().get(&key) {
        return Some(msg);
    }

    match app.portal {
        Portal::Shown(_) => portal_keymap().get(&key),
        Portal::Dismissed(_) => home_keymap().get(&key),
    }
}
