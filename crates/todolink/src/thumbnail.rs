/*
[INPUT]:  Encoded image bytes (PNG, JPEG, GIF)
[OUTPUT]: Small RGB pixel grids sized for half-block terminal rendering
[POS]:    Preview layer - image decoding for pending and stored images
[UPDATE]: When changing thumbnail sizing or supported formats
*/

use image::{ImageFormat, RgbImage};

/// Formats the attachment widget accepts
pub const ACCEPTED_FORMATS: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif];

/// Detect an accepted image format from the leading bytes
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .filter(|format| ACCEPTED_FORMATS.contains(format))
}

/// A decoded, downscaled image.
///
/// Each terminal cell shows two vertically stacked pixels, so `rows()` is
/// half the pixel height rounded up.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pixels: RgbImage,
}

impl Thumbnail {
    /// Decode `bytes` and shrink the result to fit `max_columns` x `max_rows` cells
    pub fn decode(bytes: &[u8], max_columns: u32, max_rows: u32) -> image::ImageResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        let (max_width, max_height) = (max_columns.max(1), max_rows.max(1) * 2);
        let fitted = if decoded.width() <= max_width && decoded.height() <= max_height {
            decoded
        } else {
            decoded.thumbnail(max_width, max_height)
        };
        Ok(Self {
            pixels: fitted.to_rgb8(),
        })
    }

    pub fn columns(&self) -> u32 {
        self.pixels.width()
    }

    pub fn rows(&self) -> u32 {
        self.pixels.height().div_ceil(2)
    }

    /// Top and bottom pixel colors of the cell at `column`, `row`.
    ///
    /// The bottom pixel of the last row is `None` when the pixel height is odd.
    pub fn cell(&self, column: u32, row: u32) -> ([u8; 3], Option<[u8; 3]>) {
        let top = self.pixels.get_pixel(column, row * 2).0;
        let bottom_y = row * 2 + 1;
        let bottom = (bottom_y < self.pixels.height())
            .then(|| self.pixels.get_pixel(column, bottom_y).0);
        (top, bottom)
    }
}
