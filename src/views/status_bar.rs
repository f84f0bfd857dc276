use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme::ResolvedTheme;

/// Builder for the status line at the foot of the portal and home screen.
///
/// Layout: `[Label] [Flash?] Position | Help Text`
pub struct StatusBar<'a> {
    theme: &'a ResolvedTheme,
    label: &'a str,
    flash: Option<&'a str>,
    position: Option<(usize, usize)>,
    help_text: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(theme: &'a ResolvedTheme) -> Self {
        Self {
            theme,
            label: "",
            flash: None,
            position: None,
            help_text: "",
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    /// One-shot message, e.g. a failed browser launch.
    pub fn flash(mut self, text: Option<&'a str>) -> Self {
        self.flash = text;
        self
    }

    pub fn position(mut self, current: usize, total: usize) -> Self {
        self.position = Some((current, total));
        self
    }

    pub fn help(mut self, text: &'a str) -> Self {
        self.help_text = text;
        self
    }

    pub fn render(self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(format!(" {} ", self.label), self.theme.status_bar_style()),
            Span::raw(" "),
        ];

        if let Some(flash) = self.flash {
            spans.push(Span::styled(flash.to_string(), self.theme.error_style()));
            spans.push(Span::raw(" | "));
        }

        if let Some((current, total)) = self.position {
            spans.push(Span::styled(
                format!("{current}/{total}"),
                self.theme.dim_style(),
            ));
            spans.push(Span::raw(" | "));
        }

        spans.push(Span::styled(
            self.help_text.to_string(),
            Style::default().fg(self.theme.foreground_dim),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
