use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::artwork::ArtworkImage;

const UPPER_HALF: &str = "\u{2580}";
const LOWER_HALF: &str = "\u{2584}";
const ALPHA_CUTOFF: u8 = 128;

/// Draws artwork with half blocks, two pixel rows per cell, centered in the area.
pub struct ArtworkView<'a> {
    pub image: &'a ArtworkImage,
}

impl Widget for ArtworkView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let image = self.image;
        let cols = image.width.min(area.width);
        let rows = image.cell_rows().min(area.height);
        let left = area.x + (area.width - cols) / 2;
        let top = area.y + (area.height - rows) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let upper = opaque(image.pixel(col, row * 2));
                let lower = opaque(image.pixel(col, row * 2 + 1));
                let Some(cell) = buf.cell_mut((left + col, top + row)) else {
                    continue;
                };
                match (upper, lower) {
                    (Some(upper), Some(lower)) => {
                        cell.set_symbol(UPPER_HALF).set_fg(upper).set_bg(lower);
                    }
                    (Some(upper), None) => {
                        cell.set_symbol(UPPER_HALF).set_fg(upper);
                    }
                    (None, Some(lower)) => {
                        cell.set_symbol(LOWER_HALF).set_fg(lower);
                    }
                    (None, None) => {}
                }
            }
        }
    }
}

fn opaque(pixel: Option<[u8; 4]>) -> Option<Color> {
    let [r, g, b, a] = pixel?;
    (a >= ALPHA_CUTOFF).then_some(Color::Rgb(r, g, b))
}
