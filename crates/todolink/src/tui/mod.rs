/*
[INPUT]:  Backend client, configuration and log buffer
[OUTPUT]: Ratatui-based TUI for the task list, image attachments and logs
[POS]:    TUI module for the todolink binary
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

mod app;
mod events;
mod runtime;
mod terminal;
mod ui;

pub use runtime::{LOG_BUFFER_CAPACITY, LogBuffer, LogBufferHandle, LogWriterFactory, run_tui_with_log};
