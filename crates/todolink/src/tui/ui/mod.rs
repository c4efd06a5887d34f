/*
[INPUT]:  TUI app state for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding or moving panels
*/

mod attachments;
mod form;
mod layout;
mod logs;
mod task_detail;
mod task_list;
mod thumbnail;
mod toasts;

pub mod modal;

pub(in crate::tui) use attachments::draw_attachments;
pub(in crate::tui) use form::draw_task_form;
pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use task_detail::draw_task_detail;
pub(in crate::tui) use task_list::draw_task_list;
pub(in crate::tui) use thumbnail::thumbnail_lines;
pub(in crate::tui) use toasts::draw_toasts;
