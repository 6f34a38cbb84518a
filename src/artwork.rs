//! Artwork decoding into a terminal-sized RGBA grid

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Largest edge, in pixels, of decoded artwork. Two pixel rows share a cell.
pub const ARTWORK_MAX_SIZE: u32 = 24;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtworkImage {
    pub width: u16,
    pub height: u16,
    /// Row-major RGBA
    pub pixels: Vec<[u8; 4]>,
}

impl ArtworkImage {
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }

    /// Terminal rows needed to draw the image with half blocks.
    pub fn cell_rows(&self) -> u16 {
        self.height.div_ceil(2)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtworkError {
    #[error("could not decode artwork: {0}")]
    Decode(#[from] image::ImageError),
    #[error("artwork has no pixels")]
    Empty,
}

/// Decode image bytes and shrink them to fit `max_size` on both edges.
pub fn decode_artwork(bytes: &[u8], max_size: u32) -> Result<ArtworkImage, ArtworkError> {
    let decoded = image::load_from_memory(bytes)?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(ArtworkError::Empty);
    }
    let max_size = max_size.max(1);
    let scaled = if decoded.width() > max_size || decoded.height() > max_size {
        decoded.resize(max_size, max_size, FilterType::Triangle)
    } else {
        decoded
    };
    let rgba = scaled.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ArtworkImage {
        width: width as u16,
        height: height as u16,
        pixels: rgba.pixels().map(|pixel| pixel.0).collect(),
    })
}
