/*
[INPUT]:  Public API exports for the todolink crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod attachments;
pub mod board;
pub mod config;
pub mod format;
pub mod notify;
pub mod thumbnail;

// Re-export main types for convenience
pub use attachments::{AttachmentError, AttachmentLimits, ImagePicker, LocalImage, PendingImage};
pub use board::{BoardError, TaskBackend, TaskBoard};
pub use config::AppConfig;
pub use notify::{Toast, ToastLevel, Toasts};
pub use thumbnail::Thumbnail;
