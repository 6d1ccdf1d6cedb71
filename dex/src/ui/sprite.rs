//! Sprite decoding and half-block rendering.
//!
//! Cached sprites are small PNGs with large transparent margins. They are
//! decoded to RGBA, cropped to the opaque bounding box, and drawn two pixels
//! per terminal cell with the upper-half-block glyph: the foreground color
//! carries the top pixel, the background color the bottom one.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use std::path::Path;

/// Alpha threshold below which a pixel counts as transparent.
const ALPHA_CUTOFF: u8 = 128;

/// A decoded RGBA sprite, cropped to its opaque bounding box.
#[derive(Debug, Clone)]
pub struct SpriteImage {
    rgba: Vec<u8>,
    width: usize,
    height: usize,
}

impl SpriteImage {
    /// Decode a PNG file. `None` when the file is missing, not a PNG, or in
    /// a layout the decoder cannot expand to 8-bit color.
    pub fn load(path: &Path) -> Option<Self> {
        let file = std::fs::File::open(path).ok()?;
        let mut decoder = png::Decoder::new(std::io::BufReader::new(file));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info().ok()?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).ok()?;

        let width = info.width as usize;
        let height = info.height as usize;

        // Normalize to RGBA
        let rgba = match info.color_type {
            png::ColorType::Rgba => buf[..info.buffer_size()].to_vec(),
            png::ColorType::Rgb => {
                let rgb = &buf[..info.buffer_size()];
                let mut rgba = Vec::with_capacity(width * height * 4);
                for chunk in rgb.chunks(3) {
                    rgba.extend_from_slice(chunk);
                    rgba.push(255);
                }
                rgba
            }
            png::ColorType::GrayscaleAlpha => {
                let ga = &buf[..info.buffer_size()];
                let mut rgba = Vec::with_capacity(width * height * 4);
                for chunk in ga.chunks(2) {
                    let (gray, alpha) = (chunk[0], chunk[1]);
                    rgba.extend_from_slice(&[gray, gray, gray, alpha]);
                }
                rgba
            }
            png::ColorType::Grayscale => {
                let g = &buf[..info.buffer_size()];
                let mut rgba = Vec::with_capacity(width * height * 4);
                for &gray in g {
                    rgba.extend_from_slice(&[gray, gray, gray, 255]);
                }
                rgba
            }
            png::ColorType::Indexed => return None,
        };

        Some(Self { rgba, width, height }.cropped())
    }

    /// Sprite dimensions in pixels.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Render as half-block lines no wider than `max_width` cells.
    pub fn to_lines(&self, max_width: u16) -> Vec<Line<'static>> {
        if self.width == 0 || self.height == 0 || max_width == 0 {
            return Vec::new();
        }

        let step = self.width.div_ceil(max_width as usize).max(1);
        let out_w = self.width.div_ceil(step);
        let out_h = self.height.div_ceil(step);

        let mut lines = Vec::with_capacity(out_h.div_ceil(2));
        for row in (0..out_h).step_by(2) {
            let mut spans = Vec::with_capacity(out_w);
            for col in 0..out_w {
                let top = self.pixel(col * step, row * step);
                let bottom = if row + 1 < out_h {
                    self.pixel(col * step, (row + 1) * step)
                } else {
                    None
                };
                spans.push(match (top, bottom) {
                    (None, None) => Span::raw(" "),
                    (top, bottom) => {
                        let mut style = Style::default();
                        if let Some(fg) = top {
                            style = style.fg(fg);
                        }
                        if let Some(bg) = bottom {
                            style = style.bg(bg);
                        }
                        Span::styled("▀", style)
                    }
                });
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    /// The pixel at (x, y); `None` when transparent or out of bounds.
    fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y * self.width + x) * 4;
        let px = &self.rgba[at..at + 4];
        (px[3] >= ALPHA_CUTOFF).then(|| Color::Rgb(px[0], px[1], px[2]))
    }

    /// Crop to the opaque bounding box. Fully transparent sprites are
    /// returned unchanged.
    fn cropped(self) -> Self {
        let mut min_x = self.width;
        let mut min_y = self.height;
        let mut max_x = 0usize;
        let mut max_y = 0usize;

        for y in 0..self.height {
            for x in 0..self.width {
                if self.rgba[(y * self.width + x) * 4 + 3] >= ALPHA_CUTOFF {
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        if min_x > max_x {
            return self;
        }

        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;
        let mut rgba = Vec::with_capacity(width * height * 4);
        for y in min_y..=max_y {
            let start = (y * self.width + min_x) * 4;
            rgba.extend_from_slice(&self.rgba[start..start + width * 4]);
        }

        Self {
            rgba,
            width,
            height,
        }
    }
}
