//! Keybinding popup over whatever is on screen.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::app::{App, Portal};
use crate::help::{HelpItem, home_overlay_items, portal_overlay_items};
use crate::keys::{Keymap, global_keymap, home_keymap, portal_keymap};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if !app.show_help {
        return;
    }

    let buf = frame.buffer_mut();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = &mut buf[(x, y)];
            cell.set_style(cell.style().add_modifier(Modifier::DIM));
        }
    }

    let theme = &app.theme;

    let (items, keymap): (Vec<HelpItem>, Keymap) = match app.portal {
        Portal::Shown(_) => (portal_overlay_items(), global_keymap().extend(portal_keymap())),
        Portal::Dismissed(_) => (home_overlay_items(), global_keymap().extend(home_keymap())),
    };

    let formatted: Vec<(String, &str)> = items
        .iter()
        .filter_map(|item| item.format_for_overlay(&keymap))
        .collect();

    let key_width = formatted.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let label_width = formatted.iter().map(|(_, l)| l.len()).max().unwrap_or(0);
    // Column gap, borders and one cell of padding per side.
    let popup_width = (key_width + 2 + label_width + 2 + 4) as u16;
    let popup_height = (formatted.len() + 4) as u16;

    let popup_width = popup_width.min(area.width.saturating_sub(4));
    let popup_height = popup_height.min(area.height.saturating_sub(4));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let alt_row_style = Style::default().bg(theme.selection_bg);

    let lines: Vec<Line> = formatted
        .iter()
        .enumerate()
        .map(|(i, (keys, label))| {
            let base_style = if i % 2 == 1 {
                alt_row_style
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    format!("{keys:>key_width$}"),
                    theme.dim_style().patch(base_style),
                ),
                Span::styled("  ", base_style),
                Span::styled(
                    format!("{label:<label_width$}"),
                    Style::default().fg(theme.foreground).patch(base_style),
                ),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title("Help")
            .title_style(theme.active_tab_style())
            .padding(Padding::uniform(1)),
    );

    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
