/*
[INPUT]:  Files chosen by path or dropped into the terminal, attachment limits
[OUTPUT]: Pending image set with add/remove-with-confirmation rules and previews
[POS]:    Image attachment widget model (no rendering)
[UPDATE]: When changing limits, accepted formats or the removal flow
*/

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::format::{format_file_size, public_image_url};
use crate::notify::Toast;
use crate::thumbnail::{Thumbnail, detect_format};

/// Maximum number of pending images
pub const MAX_IMAGES: usize = 4;
/// Maximum size of a single image in bytes (2 MiB)
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024;

/// Thumbnail bounds for pending images, in terminal cells
pub const THUMBNAIL_COLUMNS: u32 = 14;
pub const THUMBNAIL_ROWS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentLimits {
    pub max_images: usize,
    pub max_file_size: u64,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_images: MAX_IMAGES,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl AttachmentLimits {
    /// Accepted formats and size, as shown next to the widget
    pub fn hint(&self) -> String {
        format!("PNG, JPG or GIF (max. {})", format_file_size(self.max_file_size))
    }
}

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("only {max} images can be attached")]
    TooMany { max: usize },

    #[error("{name} is {size} bytes, the limit is {max_size} bytes")]
    TooLarge { name: String, size: u64, max_size: u64 },

    #[error("no pending image at position {0}")]
    NoSuchImage(usize),

    #[error("{name} is not a PNG, JPEG or GIF image")]
    UnsupportedFormat { name: String },

    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AttachmentError {
    /// Notification shown to the user for this rejection
    pub fn to_toast(&self) -> Toast {
        match self {
            AttachmentError::TooMany { max } => Toast::warning(
                "Too many images",
                format!("Only {max} images can be attached per task."),
            ),
            AttachmentError::TooLarge { max_size, .. } => Toast::warning(
                "File too large",
                format!(
                    "Make sure the file is no larger than {}.",
                    format_file_size(*max_size)
                ),
            ),
            AttachmentError::NoSuchImage(_) => Toast::warning("Nothing to remove", self.to_string()),
            AttachmentError::UnsupportedFormat { .. } => {
                Toast::warning("Unsupported file", "PNG, JPG or GIF only.")
            }
            AttachmentError::Unreadable { .. } => Toast::warning("Cannot open file", self.to_string()),
        }
    }
}

/// A freshly chosen file, held in memory until the task is submitted
#[derive(Debug, Clone)]
pub struct LocalImage {
    name: String,
    path: Option<PathBuf>,
    bytes: Vec<u8>,
    content_type: &'static str,
    thumbnail: Option<Thumbnail>,
}

impl LocalImage {
    /// Wrap in-memory bytes; the format is detected from the content
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AttachmentError> {
        let mut image = Self::undecoded(name.into(), bytes)?;
        image.thumbnail = Thumbnail::decode(&image.bytes, THUMBNAIL_COLUMNS, THUMBNAIL_ROWS).ok();
        Ok(image)
    }

    fn undecoded(name: String, bytes: Vec<u8>) -> Result<Self, AttachmentError> {
        let format = detect_format(&bytes).ok_or_else(|| AttachmentError::UnsupportedFormat { name: name.clone() })?;
        Ok(Self {
            name,
            path: None,
            bytes,
            content_type: format.to_mime_type(),
            thumbnail: None,
        })
    }

    /// Read an image file from disk.
    ///
    /// Files over `max_file_size` are rejected from their metadata, before
    /// any byte is read. The thumbnail is decoded on the blocking pool.
    pub async fn load(path: &Path, max_file_size: u64) -> Result<Self, AttachmentError> {
        let unreadable = |source| AttachmentError::Unreadable {
            path: path.to_path_buf(),
            source,
        };
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let size = tokio::fs::metadata(path).await.map_err(unreadable)?.len();
        if size > max_file_size {
            return Err(AttachmentError::TooLarge {
                name,
                size,
                max_size: max_file_size,
            });
        }

        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;
        let mut image = Self::undecoded(name, bytes)?;
        image.path = Some(path.to_path_buf());

        let bytes = image.bytes.clone();
        image.thumbnail = tokio::task::spawn_blocking(move || {
            Thumbnail::decode(&bytes, THUMBNAIL_COLUMNS, THUMBNAIL_ROWS).ok()
        })
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(name = %image.name, error = %err, "thumbnail decode task failed");
            None
        });
        Ok(image)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }
}

/// An image staged for attachment to the task being written
#[derive(Debug, Clone)]
pub enum PendingImage {
    /// Chosen on this machine, not uploaded yet
    Local(LocalImage),
    /// Already stored remotely under `key` (editing an existing task)
    Remote { key: String },
}

/// Where a pending image's preview comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSource<'a> {
    Local(&'a [u8]),
    Remote(String),
}

impl PendingImage {
    pub fn label(&self) -> &str {
        match self {
            PendingImage::Local(image) => image.name(),
            PendingImage::Remote { key } => key,
        }
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        match self {
            PendingImage::Local(image) => image.thumbnail(),
            PendingImage::Remote { .. } => None,
        }
    }

    /// Local images preview from their own bytes, remote ones from the
    /// public object URL under `image_base_url`
    pub fn preview_source(&self, image_base_url: &str) -> PreviewSource<'_> {
        match self {
            PendingImage::Local(image) => PreviewSource::Local(image.bytes()),
            PendingImage::Remote { key } => PreviewSource::Remote(public_image_url(image_base_url, key)),
        }
    }
}

/// Pending image set plus the removal confirmation prompt.
///
/// Slot lifecycle: added -> pending -> removal requested -> removed or
/// retained (back to pending).
#[derive(Debug, Default)]
pub struct ImagePicker {
    images: Vec<PendingImage>,
    limits: AttachmentLimits,
    pending_removal: Option<usize>,
}

impl ImagePicker {
    pub fn new(limits: AttachmentLimits) -> Self {
        Self {
            images: Vec::new(),
            limits,
            pending_removal: None,
        }
    }

    pub fn limits(&self) -> AttachmentLimits {
        self.limits
    }

    pub fn images(&self) -> &[PendingImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.images.len() >= self.limits.max_images
    }

    /// Whether `incoming` more images fit under the count limit
    pub fn check_capacity(&self, incoming: usize) -> Result<(), AttachmentError> {
        if self.images.len() + incoming > self.limits.max_images {
            tracing::debug!(
                pending = self.images.len(),
                incoming,
                "rejecting images over the count limit"
            );
            return Err(AttachmentError::TooMany {
                max: self.limits.max_images,
            });
        }
        Ok(())
    }

    /// Add a batch of images. The batch is accepted whole or not at all:
    /// the count limit is checked first, then every file's size.
    pub fn add(&mut self, incoming: Vec<LocalImage>) -> Result<usize, AttachmentError> {
        if incoming.is_empty() {
            return Ok(0);
        }
        self.check_capacity(incoming.len())?;
        if let Some(oversized) = incoming
            .iter()
            .find(|image| image.size() > self.limits.max_file_size)
        {
            return Err(AttachmentError::TooLarge {
                name: oversized.name().to_string(),
                size: oversized.size(),
                max_size: self.limits.max_file_size,
            });
        }

        let added = incoming.len();
        self.images.extend(incoming.into_iter().map(PendingImage::Local));
        Ok(added)
    }

    /// Open the confirmation prompt for the image at `index`
    pub fn request_removal(&mut self, index: usize) -> Result<(), AttachmentError> {
        if index >= self.images.len() {
            return Err(AttachmentError::NoSuchImage(index));
        }
        self.pending_removal = Some(index);
        Ok(())
    }

    /// Image awaiting confirmation, with its position
    pub fn pending_removal(&self) -> Option<(usize, &PendingImage)> {
        let index = self.pending_removal?;
        self.images.get(index).map(|image| (index, image))
    }

    /// Confirm the prompt and remove exactly the targeted image
    pub fn confirm_removal(&mut self) -> Option<PendingImage> {
        let index = self.pending_removal.take()?;
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Dismiss the prompt; the image stays pending
    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    /// Hand over every pending image and start a fresh cycle
    pub fn take(&mut self) -> Vec<PendingImage> {
        self.pending_removal = None;
        std::mem::take(&mut self.images)
    }
}

/// Extract file paths from text pasted into the terminal.
///
/// Terminals paste dropped files as paths separated by whitespace or
/// newlines, sometimes quoted, with spaces backslash-escaped, or as
/// `file://` URLs.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(ch),
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
        .into_iter()
        .filter_map(|token| {
            if token.starts_with("file://") {
                Url::parse(&token).ok()?.to_file_path().ok()
            } else {
                Some(PathBuf::from(token))
            }
        })
        .collect()
}
