mod api;
mod app;
mod cli;
mod event;
mod help;
mod keys;
mod logging;
mod news;
mod settings;
mod theme;
mod time;
mod tui;
mod views;

#[cfg(test)]
mod test_utils;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use api::{NewsClient, NewsPage};
use app::{App, Message};
use cli::{Cli, Commands, OutputFormat};
use event::Event;
use news::ScreenArgs;
use news::navigator::SystemBrowser;
use settings::Settings;
use theme::{ResolvedTheme, ThemeVariant, all_themes, by_name, default_for_variant, detect_terminal_theme};
use tui::EventHandler;

/// Height of the debug pane when it is open.
const DEBUG_PANE_HEIGHT: u16 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = settings::config_dir(cli.config_dir.as_ref());
    let settings = config_dir
        .as_ref()
        .map(|dir| {
            Settings::load(&settings::settings_path(dir)).unwrap_or_else(|e| {
                eprintln!("Warning: {e:#}");
                Settings::default()
            })
        })
        .unwrap_or_default();

    let _log_guard = match &config_dir {
        Some(dir) => {
            let log_dir = settings::log_dir(dir);
            match logging::init(&log_dir, cli.verbose) {
                Ok(guard) => {
                    if cli.verbose {
                        eprintln!("Logging to {}", log_dir.display());
                    }
                    Some(guard)
                }
                Err(e) => {
                    eprintln!("Logging disabled: {e:#}");
                    None
                }
            }
        }
        None => None,
    };

    let args = screen_args(&cli, &settings);
    let client = news_client(&cli, &settings);
    tracing::info!(endpoint = client.endpoint(), category = args.category(), "starting");

    if let Some(Commands::Fetch { page, format }) = &cli.command {
        return print_page(&client, &args, *page, *format).await;
    }

    let theme = resolve_theme(&cli, &settings)?;
    run_tui(theme, args, client).await
}

fn screen_args(cli: &Cli, settings: &Settings) -> ScreenArgs {
    ScreenArgs {
        category: cli.category.clone().or_else(|| settings.category.clone()),
        language: cli.language.clone().or_else(|| settings.language.clone()),
    }
}

/// Priority: CLI flag > settings file > built-in default.
fn news_client(cli: &Cli, settings: &Settings) -> NewsClient {
    let endpoint = cli
        .endpoint
        .as_deref()
        .or(settings.endpoint.as_deref())
        .unwrap_or(api::DEFAULT_ENDPOINT);
    let page_size = settings.page_size.unwrap_or(api::DEFAULT_PAGE_SIZE);
    NewsClient::new(endpoint, page_size)
}

fn resolve_theme(cli: &Cli, settings: &Settings) -> Result<ResolvedTheme> {
    if let Some(name) = cli.theme.as_ref().or(settings.theme.as_ref()) {
        let theme = by_name(name).with_context(|| {
            let names: Vec<_> = all_themes().into_iter().map(|t| t.name).collect();
            format!("Theme '{name}' not found. Available: {}", names.join(", "))
        })?;
        tracing::debug!(theme = %theme.name, description = %theme.description, "theme selected");
        return Ok(theme.into());
    }

    let variant = if cli.dark {
        ThemeVariant::Dark
    } else if cli.light {
        ThemeVariant::Light
    } else {
        detect_terminal_theme()
    };
    Ok(default_for_variant(variant))
}

async fn print_page(
    client: &NewsClient,
    args: &ScreenArgs,
    page: usize,
    format: OutputFormat,
) -> Result<()> {
    let items = client
        .fetch_news(args.category(), args.language(), page)
        .await
        .context("Failed to fetch news")?;
    let page = NewsPage {
        category: args.category().to_string(),
        language: args.language().to_string(),
        page,
        items,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&page).context("Failed to serialize news")?;
            println!("{json}");
        }
        OutputFormat::Toml => {
            let toml = toml::to_string_pretty(&page).context("Failed to serialize news")?;
            println!("{toml}");
        }
    }
    Ok(())
}

async fn run_tui(theme: ResolvedTheme, args: ScreenArgs, client: NewsClient) -> Result<()> {
    let mut terminal = tui::init()?;
    let mut app = App::new(theme, args, client, Box::new(SystemBrowser));
    let mut events = EventHandler::new(100);
    let mut last_height: Option<u16> = None;

    app.show_portal();

    loop {
        terminal.draw(|frame| render(&app, frame))?;

        // The sheet sizes itself from the area left after the debug pane.
        let mut height = terminal.size()?.height;
        if app.presenter.debug.visible {
            height = height.saturating_sub(DEBUG_PANE_HEIGHT);
        }
        if last_height != Some(height) {
            last_height = Some(height);
            app.update(Message::UpdateViewportHeight(height));
        }

        while let Ok(result) = app.presenter.result_rx.try_recv() {
            app.handle_async_result(result);
        }

        if app.should_quit {
            break;
        }

        match events.next().await? {
            Event::Key(key) => {
                if let Some(msg) = keys::handle_key(key, &app) {
                    app.update(msg);
                }
            }
            Event::Tick | Event::Resize => {}
        }
    }

    tui::restore()?;
    tracing::info!("exiting");
    Ok(())
}

fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let (main_area, debug_area) = if app.presenter.debug.visible {
        let chunks =
            Layout::vertical([Constraint::Min(0), Constraint::Length(DEBUG_PANE_HEIGHT)]).split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    views::portal::render(frame, app, main_area);

    if let Some(debug_area) = debug_area {
        views::debug::render(frame, app, debug_area);
    }

    views::help_overlay::render(frame, app, area);
}
