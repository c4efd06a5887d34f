/*
[INPUT]:  Backend handle, configuration, log buffer
[OUTPUT]: Ratatui-based TUI run loop, rendering, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

use todolink::{AppConfig, TaskBackend};

use super::app::{ActiveModal, AppState, Focus, Tab};
use super::events::handle_event;
use super::terminal::TerminalGuard;
use super::ui::modal::{centered_rect, draw_modal};
use super::ui::*;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub const LOG_BUFFER_CAPACITY: usize = 2000;

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

/// Ring of the most recent formatted log lines shown on the Logs tab
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    /// A buffer behind the shared handle used by writers and the UI
    pub fn shared(capacity: usize) -> LogBufferHandle {
        Arc::new(StdMutex::new(Self::new(capacity)))
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// The last `count` lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        let skip = self.lines.len().saturating_sub(count);
        self.lines.range(skip..).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// `MakeWriter` feeding formatted log lines into a [`LogBuffer`]
#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

/// Collects bytes and hands complete lines to the buffer.
///
/// Bytes are kept raw until a newline, so a UTF-8 character split across
/// two writes is decoded whole.
pub struct LogWriter {
    buffer: LogBufferHandle,
    pending: Vec<u8>,
}

impl LogWriter {
    fn emit(&self, raw: &[u8]) {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = String::from_utf8_lossy(raw).into_owned();
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_line(line);
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        let Some(last_newline) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Ok(buf.len());
        };
        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        for raw in complete[..last_newline].split(|&b| b == b'\n') {
            self.emit(raw);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let raw = std::mem::take(&mut self.pending);
            self.emit(&raw);
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: Arc::clone(&self.buffer),
            pending: Vec::new(),
        }
    }
}

enum UiEvent {
    Input(CrosstermEvent),
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key = |label: &'static str| Span::styled(label, key_style);

    let line1 = match (app.current_tab, app.focus) {
        (Tab::Logs, _) => Line::from(vec![key("[1/2/l]"), Span::raw(" Tabs  "), key("[q]"), Span::raw(" Quit")]),
        (Tab::Tasks, Focus::Label) => Line::from(vec![
            key("[Enter]"),
            Span::raw(" Submit  "),
            key("[Ctrl+O]"),
            Span::raw(" Browse image  "),
            key("[Tab]"),
            Span::raw(" Next panel  "),
            key("[Esc]"),
            Span::raw(" Leave field  "),
            key("[Ctrl+C]"),
            Span::raw(" Quit"),
        ]),
        (Tab::Tasks, Focus::Images) => Line::from(vec![
            key("[Left/Right]"),
            Span::raw(" Select  "),
            key("[d]"),
            Span::raw(" Remove  "),
            key("[a]"),
            Span::raw(" Browse  "),
            key("[Tab]"),
            Span::raw(" Next panel  "),
            key("[q]"),
            Span::raw(" Quit"),
        ]),
        (Tab::Tasks, Focus::Tasks) => Line::from(vec![
            key("[Up/Down]"),
            Span::raw(" Select  "),
            key("[Space]"),
            Span::raw(" Toggle  "),
            key("[d]"),
            Span::raw(" Delete  "),
            key("[r]"),
            Span::raw(" Refresh  "),
            key("[i]"),
            Span::raw(" New task  "),
            key("[q]"),
            Span::raw(" Quit"),
        ]),
    };
    let line2 = Line::from(vec![Span::raw(format!("Status: {}", app.status_message))]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, line2]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn focused_border_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub async fn run_tui_with_log(
    backend: Arc<dyn TaskBackend>,
    config: &AppConfig,
    log_buffer: LogBufferHandle,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = event_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = AppState::new(
        backend,
        config.image_base_url(),
        config.attachment_limits(),
        log_buffer,
    );
    app.refresh_tasks().await;
    tracing::info!(count = app.tasks().len(), "task list loaded");

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {
                app.tick(Instant::now());
                app.load_selected_thumbnail();
            }
            maybe_event = event_rx.recv() => {
                if let Some(UiEvent::Input(event)) = maybe_event {
                    if handle_event(&mut app, event).await {
                        should_quit = true;
                    }
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[1], app.current_tab);

    match app.current_tab {
        Tab::Tasks => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(9),
                    Constraint::Min(5),
                ])
                .split(layout[0]);

            draw_task_form(frame, content[0], app);
            draw_attachments(frame, content[1], app);

            let lower = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(content[2]);
            draw_task_list(frame, lower[0], app);
            draw_task_detail(frame, lower[1], app);
        }
        Tab::Logs => {
            draw_logs(frame, layout[0], &app.log_buffer);
        }
    }

    draw_footer(frame, layout[2], app);

    if let Some(active_modal) = app.active_modal.as_ref() {
        let (modal, percent_y) = match active_modal {
            ActiveModal::AddImage(modal) => (modal.to_modal(), 30),
            ActiveModal::RemoveImage(modal) => (modal.to_modal(), 60),
        };
        let modal_area = centered_rect(area, 60, percent_y);
        draw_modal(frame, modal_area, &modal);
    }

    draw_toasts(frame, area, &app.toasts);
}
