use std::panic::PanicHookInfo;
use std::thread::ThreadId;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::event::Event;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Enter raw mode and the alternate screen.
///
/// A panic on the calling thread restores the terminal before the default
/// hook reports it. Panics on any other thread are only logged, since worker
/// panics are recovered by `safe_api_call` and must not tear down the UI.
pub fn init() -> Result<DefaultTerminal> {
    let terminal = ratatui::try_init().context("Failed to initialize terminal")?;
    let restore_and_report = std::panic::take_hook();
    std::panic::set_hook(route_panics(
        std::thread::current().id(),
        restore_and_report,
    ));
    Ok(terminal)
}

fn route_panics(ui_thread: ThreadId, ui_hook: PanicHook) -> PanicHook {
    Box::new(move |info| {
        let current = std::thread::current();
        if current.id() == ui_thread {
            ui_hook(info);
        } else {
            tracing::error!(
                thread = current.name().unwrap_or("<unnamed>"),
                "background panic: {info}"
            );
        }
    })
}

pub fn restore() -> Result<()> {
    ratatui::try_restore().context("Failed to restore terminal")
}

/// Merges terminal input with a steady tick so spinners keep moving.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(Duration::from_millis(tick_rate_ms));
            loop {
                let event = tokio::select! {
                    _ = tick.tick() => Event::Tick,
                    maybe = reader.next() => match maybe {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            Event::Key(key)
                        }
                        Some(Ok(CrosstermEvent::Resize(_, _))) => Event::Resize,
                        Some(Ok(_)) => continue,
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "terminal event error");
                            continue;
                        }
                        None => break,
                    },
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        Self { rx, _task: task }
    }

    pub async fn next(&mut self) -> Result<Event> {
        self.rx.recv().await.context("Event stream closed")
    }
}
