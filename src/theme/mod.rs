mod builtin;
mod detect;

pub use builtin::{all_themes, by_name, default_for_variant};
pub use detect::detect_terminal_theme;

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// A named palette before its colors are turned into terminal colors.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub description: String,
    pub variant: ThemeVariant,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub enum ThemeColor {
    /// A terminal color name such as `cyan` or `dark gray`.
    Named(String),
    /// `#RRGGBB`; the leading `#` is optional.
    Hex(String),
}

impl ThemeColor {
    /// Anything ratatui cannot parse falls back to the terminal default.
    pub fn to_color(&self) -> Color {
        let parsed = match self {
            ThemeColor::Named(name) => name.parse(),
            ThemeColor::Hex(hex) => format!("#{}", hex.trim_start_matches('#')).parse(),
        };
        parsed.unwrap_or(Color::Reset)
    }
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub foreground: ThemeColor,
    pub foreground_dim: ThemeColor,
    pub border: ThemeColor,
    pub selection_bg: ThemeColor,
    pub primary: ThemeColor,
    pub error: ThemeColor,
    pub item_title: ThemeColor,
    pub item_source: ThemeColor,
    pub item_time: ThemeColor,
    pub status_bar_bg: ThemeColor,
    pub status_bar_fg: ThemeColor,
    pub spinner: ThemeColor,
}

/// A palette ready to draw with.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ResolvedTheme {
    pub name: String,
    pub variant: ThemeVariant,
    pub foreground: Color,
    pub foreground_dim: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub primary: Color,
    pub error: Color,
    pub item_title: Color,
    pub item_source: Color,
    pub item_time: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub spinner: Color,
}

fn fg(color: Color) -> Style {
    Style::new().fg(color)
}

impl ResolvedTheme {
    pub fn border_style(&self) -> Style {
        fg(self.border)
    }

    pub fn dim_style(&self) -> Style {
        fg(self.foreground_dim)
    }

    pub fn error_style(&self) -> Style {
        fg(self.error)
    }

    pub fn spinner_style(&self) -> Style {
        fg(self.spinner)
    }

    /// The highlighted news row.
    pub fn selection_style(&self) -> Style {
        Style::new().bg(self.selection_bg).add_modifier(Modifier::BOLD)
    }

    /// The category tab currently being shown.
    pub fn active_tab_style(&self) -> Style {
        fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        Style::new().fg(self.status_bar_fg).bg(self.status_bar_bg)
    }
}

impl From<Theme> for ResolvedTheme {
    fn from(Theme { name, variant, colors, .. }: Theme) -> Self {
        let ThemeColors {
            foreground,
            foreground_dim,
            border,
            selection_bg,
            primary,
            error,
            item_title,
            item_source,
            item_time,
            status_bar_bg,
            status_bar_fg,
            spinner,
        } = colors;
        Self {
            name,
            variant,
            foreground: foreground.to_color(),
            foreground_dim: foreground_dim.to_color(),
            border: border.to_color(),
            selection_bg: selection_bg.to_color(),
            primary: primary.to_color(),
            error: error.to_color(),
            item_title: item_title.to_color(),
            item_source: item_source.to_color(),
            item_time: item_time.to_color(),
            status_bar_bg: status_bar_bg.to_color(),
            status_bar_fg: status_bar_fg.to_color(),
            spinner: spinner.to_color(),
        }
    }
}
