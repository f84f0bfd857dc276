use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::api::NewsItem;
use crate::app::{App, Portal};
use crate::help::{format_items, home_hints, portal_hints};
use crate::keys::{global_keymap, home_keymap, portal_keymap};
use crate::news::{CATEGORIES, NewsScreen, category_label};
use crate::theme::ResolvedTheme;
use crate::time::format_relative;
use crate::views::common::truncate;
use crate::views::spinner::spinner_frame;
use crate::views::status_bar::StatusBar;

const NO_NEWS: &str = "No news right now.";
const TRY_AGAIN_HINT: &str = "Press Enter or t to try again";

/// Home area with the news sheet drawn over its lower part.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match &app.portal {
        Portal::Dismissed(_) => {
            let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
            render_home(frame, app, chunks[0]);
            let hints = format_items(&home_hints(), &global_keymap().extend(home_keymap()));
            StatusBar::new(&app.theme)
                .label("Home")
                .flash(app.flash.as_deref())
                .help(&hints)
                .render(frame, chunks[1]);
        }
        Portal::Shown(screen) => {
            let sheet_height = screen
                .sheet()
                .map_or(area.height, |sheet| sheet.height_in(area.height));
            let home_height = area.height - sheet_height;
            let [home_area, sheet_area] =
                Layout::vertical([Constraint::Length(home_height), Constraint::Min(0)])
                    .areas(area);
            render_home(frame, app, home_area);
            render_sheet(frame, app, screen, sheet_area);
        }
    }
}

fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let mut lines = vec![
        Line::from(Span::styled("Portal", theme.active_tab_style())),
        Line::from(Span::styled(
            format!("Today's {} headlines", category_label(app.args.category())),
            theme.dim_style(),
        )),
        Line::from(""),
    ];
    if let Some(url) = &app.last_opened {
        let width = area.width.saturating_sub(4).max(1) as usize;
        lines.push(Line::from(Span::styled("Last opened", theme.dim_style())));
        for row in textwrap::wrap(url, width) {
            lines.push(Line::from(Span::styled(
                row.into_owned(),
                Style::default().fg(theme.item_source),
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_sheet(frame: &mut Frame, app: &App, screen: &NewsScreen, area: Rect) {
    let theme = &app.theme;
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(theme.border_style())
        .title(" News ")
        .title_style(theme.active_tab_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    render_category_tabs(frame, app, tabs_area);

    let regions = screen.regions();
    if regions.progress {
        render_progress(frame, app, body_area);
    } else if regions.empty {
        render_empty(frame, app, body_area);
    } else if regions.list {
        render_list(frame, app, screen, body_area);
    }

    let hints = format_items(&portal_hints(), &global_keymap().extend(portal_keymap()));
    let label = category_label(screen.args().category());
    let mut bar = StatusBar::new(theme)
        .label(&label)
        .flash(app.flash.as_deref())
        .help(&hints);
    if !screen.items().is_empty() {
        bar = bar.position(screen.selected_index() + 1, screen.items().len());
    }
    bar.render(frame, status_area);
}

fn render_category_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let current = app.args.category();
    let mut spans: Vec<Span> = CATEGORIES
        .iter()
        .flat_map(|category| {
            let style = if *category == current {
                theme.active_tab_style()
            } else {
                theme.dim_style()
            };
            [Span::styled(category_label(category), style), Span::raw("  ")]
        })
        .collect();

    if app.presenter.load.should_show_spinner() {
        spans.push(Span::styled(
            spinner_frame(app.presenter.load.loading_start),
            theme.spinner_style(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = Line::from(vec![
        Span::styled(
            spinner_frame(app.presenter.load.loading_start),
            theme.spinner_style(),
        ),
        Span::styled(" Loading news…", theme.dim_style()),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let message = app.presenter.load.error.as_deref().unwrap_or(NO_NEWS);
    let style = if app.presenter.load.error.is_some() {
        theme.error_style()
    } else {
        Style::default().fg(theme.foreground)
    };
    let lines = vec![
        Line::from(Span::styled(message.to_string(), style)),
        Line::from(Span::styled(
            TRY_AGAIN_HINT,
            theme.active_tab_style().add_modifier(Modifier::UNDERLINED),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_list(frame: &mut Frame, app: &App, screen: &NewsScreen, area: Rect) {
    let theme = &app.theme;
    let now = app.clock.now();
    let offset = screen.scroll_offset();
    let rows = (area.height / App::ITEM_HEIGHT) as usize;
    // Highlight symbol takes two columns.
    let width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = screen
        .items()
        .iter()
        .skip(offset)
        .take(rows)
        .map(|item| news_to_list_item(item, theme, width, now))
        .collect();

    let list = List::new(items)
        .highlight_style(theme.selection_style())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(screen.selected_index().checked_sub(offset));
    frame.render_stateful_widget(list, area, &mut state);
}

fn news_to_list_item(
    item: &NewsItem,
    theme: &ResolvedTheme,
    width: usize,
    now: chrono::DateTime<chrono::Utc>,
) -> ListItem<'static> {
    let title_line = Line::from(Span::styled(
        truncate(&item.title, width),
        Style::default().fg(theme.item_title),
    ));
    let meta_line = Line::from(vec![
        Span::styled(
            truncate(&item.source, width.saturating_sub(12)),
            Style::default().fg(theme.item_source),
        ),
        Span::raw(" · "),
        Span::styled(
            format_relative(item.published, now),
            Style::default().fg(theme.item_time),
        ),
    ]);
    ListItem::new(vec![title_line, meta_line])
}
