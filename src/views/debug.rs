use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Running fetches and the newest log lines.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let debug = &app.presenter.debug;

    let block = Block::default()
        .title(" Debug ")
        .borders(Borders::ALL)
        .border_style(theme.dim_style());

    let mut lines = Vec::new();

    let task_count = debug.running_tasks.len();
    lines.push(Line::from(vec![
        Span::styled("Tasks: ", theme.dim_style()),
        Span::styled(
            task_count.to_string(),
            Style::default().fg(if task_count > 0 {
                theme.primary
            } else {
                theme.foreground
            }),
        ),
        Span::styled(
            format!(
                "  page {}  more {}",
                app.presenter.load.next_page, app.presenter.load.has_more
            ),
            theme.dim_style(),
        ),
    ]));

    for task in &debug.running_tasks {
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", task.id), theme.dim_style()),
            Span::styled(&task.description, Style::default().fg(theme.foreground)),
            Span::styled(
                format!(" ({:.1?})", task.started_at.elapsed()),
                Style::default().fg(theme.item_time),
            ),
        ]));
    }

    if !debug.running_tasks.is_empty() {
        lines.push(Line::from(""));
    }

    // Borders plus the header line.
    let available = area.height.saturating_sub(3) as usize;
    let log_lines = available.saturating_sub(task_count + 1);

    for entry in debug.log.iter().rev().take(log_lines) {
        lines.push(Line::from(Span::styled(
            format!("  {}", entry.message),
            theme.dim_style(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
