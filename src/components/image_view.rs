//! Raster images in the terminal.
//!
//! Every image on screen lives in an [`ImageSlot`]. A slot holds at most one
//! decoded image; acquiring a different key or dropping the slot releases the
//! previous one. Payloads that fail to decode are swapped for [`placeholder`].

use base64::{engine::general_purpose, Engine as _};
use image::{imageops::FilterType, Rgba, RgbaImage};
use ratatui::{Frame, layout::Rect, style::Color};
use thiserror::Error;
use tracing::{debug, warn};

use super::Component;
use crate::action::Action;

/// Upper half block: foreground paints the top pixel, background the bottom one.
const HALF_BLOCK: &str = "\u{2580}";

const PLACEHOLDER_WIDTH: u32 = 48;
const PLACEHOLDER_HEIGHT: u32 = 32;

#[derive(Debug, Error)]
pub enum ImageDecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unreadable image: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode a base64 image payload (PNG, JPEG, GIF, ...).
pub fn decode_payload(payload: &str) -> Result<RgbaImage, ImageDecodeError> {
    let bytes = general_purpose::STANDARD.decode(payload.trim())?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Built-in stand-in: a cloud on a sky gradient.
pub fn placeholder() -> RgbaImage {
    const PUFFS: [(f32, f32, f32); 3] = [(17.0, 17.0, 7.0), (25.0, 13.0, 9.0), (33.0, 18.0, 6.5)];
    const CLOUD: Rgba<u8> = Rgba([236, 242, 252, 255]);

    RgbaImage::from_fn(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, |x, y| {
        let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
        let in_puff = PUFFS.iter().any(|&(cx, cy, r)| {
            let (dx, dy) = (px - cx, py - cy);
            dx * dx + dy * dy <= r * r
        });
        let in_base = (10.0..=40.0).contains(&px) && (17.0..=24.0).contains(&py);
        if in_puff || in_base {
            return CLOUD;
        }
        let t = y as f32 / PLACEHOLDER_HEIGHT as f32;
        Rgba([
            (70.0 + 70.0 * t) as u8,
            (120.0 + 60.0 * t) as u8,
            (210.0 - 10.0 * t) as u8,
            255,
        ])
    })
}

// ============================================================================
// Slot
// ============================================================================

struct Held {
    key: String,
    image: RgbaImage,
    placeholder: bool,
}

/// Owner of one decoded image.
#[derive(Default)]
pub struct ImageSlot {
    held: Option<Held>,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the image identified by `key`.
    ///
    /// The payload is decoded only when `key` differs from the held one, after the
    /// previous image is released. `None` or an undecodable payload yields the
    /// placeholder.
    pub fn acquire(&mut self, key: &str, payload: Option<&str>) -> &RgbaImage {
        if self.key() != Some(key) {
            self.release();
        }
        let held = self.held.get_or_insert_with(|| {
            let decoded = match payload.map(decode_payload) {
                Some(Ok(image)) => Some(image),
                Some(Err(error)) => {
                    warn!(key, %error, "Image failed to load, showing placeholder");
                    None
                }
                None => None,
            };
            let placeholder_used = decoded.is_none();
            let image = decoded.unwrap_or_else(placeholder);
            debug!(
                key,
                width = image.width(),
                height = image.height(),
                placeholder = placeholder_used,
                "Image slot acquired"
            );
            Held {
                key: key.to_string(),
                image,
                placeholder: placeholder_used,
            }
        });
        &held.image
    }

    /// Drop the held image, if any.
    pub fn release(&mut self) {
        if let Some(held) = self.held.take() {
            debug!(key = %held.key, "Image slot released");
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.held.as_ref().map(|held| held.key.as_str())
    }

    pub fn is_placeholder(&self) -> bool {
        self.held.as_ref().is_some_and(|held| held.placeholder)
    }
}

impl Drop for ImageSlot {
    fn drop(&mut self) {
        self.release();
    }
}

// ============================================================================
// View
// ============================================================================

pub struct ImageView;

pub struct ImageViewProps<'a> {
    pub image: &'a RgbaImage,
    /// Colour transparent pixels blend into
    pub background: Color,
}

/// Largest `(cols, rows)` inside the bounds that keeps the image's aspect ratio.
/// Each cell shows two vertically stacked pixels.
pub fn fit(width: u32, height: u32, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if width == 0 || height == 0 || max_cols == 0 || max_rows == 0 {
        return (0, 0);
    }
    let ratio = width as f32 / height as f32;
    let cols_for_rows = ratio * f32::from(max_rows) * 2.0;
    if cols_for_rows <= f32::from(max_cols) {
        ((cols_for_rows.round() as u16).clamp(1, max_cols), max_rows)
    } else {
        let rows = (f32::from(max_cols) / ratio / 2.0).round() as u16;
        (max_cols, rows.clamp(1, max_rows))
    }
}

fn pixel_color(pixel: &Rgba<u8>, background: Color) -> Color {
    let [r, g, b, a] = pixel.0;
    match background {
        Color::Rgb(br, bg, bb) => {
            let mix = |fore: u8, back: u8| {
                ((u16::from(fore) * u16::from(a) + u16::from(back) * (255 - u16::from(a))) / 255)
                    as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ if a < 128 => background,
        _ => Color::Rgb(r, g, b),
    }
}

impl Component<Action> for ImageView {
    type Props<'a> = ImageViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (cols, rows) = fit(
            props.image.width(),
            props.image.height(),
            area.width,
            area.height,
        );
        if cols == 0 || rows == 0 {
            return;
        }

        let scaled = image::imageops::resize(
            props.image,
            u32::from(cols),
            u32::from(rows) * 2,
            FilterType::Triangle,
        );
        let x0 = area.x + (area.width - cols) / 2;
        let y0 = area.y + (area.height - rows) / 2;

        let buf = frame.buffer_mut();
        for row in 0..rows {
            for col in 0..cols {
                let top = scaled.get_pixel(u32::from(col), u32::from(row) * 2);
                let bottom = scaled.get_pixel(u32::from(col), u32::from(row) * 2 + 1);
                if let Some(cell) = buf.cell_mut((x0 + col, y0 + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(pixel_color(top, props.background))
                        .set_bg(pixel_color(bottom, props.background));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tui_dispatch::testing::RenderHarness;

    fn png_payload(width: u32, height: u32) -> String {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        general_purpose::STANDARD.encode(bytes)
    }

    #[test]
    fn test_decode_payload_reads_png() {
        let image = decode_payload(&png_payload(4, 2)).unwrap();
        assert_eq!(image.dimensions(), (4, 2));
    }

    #[test]
    fn test_bad_payload_falls_back_to_placeholder() {
        let mut slot = ImageSlot::new();
        let image = slot.acquire("broken", Some("not base64 at all!"));
        assert_eq!(image.dimensions(), (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
        assert!(slot.is_placeholder());

        let mut slot = ImageSlot::new();
        let not_an_image = general_purpose::STANDARD.encode(b"hello");
        slot.acquire("png-but-not", Some(not_an_image.as_str()));
        assert!(slot.is_placeholder());
    }

    #[test]
    fn test_slot_keeps_one_image_and_replaces_on_new_key() {
        let mut slot = ImageSlot::new();
        let payload = png_payload(2, 2);
        slot.acquire("a", Some(payload.as_str()));
        assert_eq!(slot.key(), Some("a"));
        assert!(!slot.is_placeholder());

        // Same key: payload is not decoded again
        let image = slot.acquire("a", Some("garbage"));
        assert_eq!(image.dimensions(), (2, 2));

        slot.acquire("b", None);
        assert_eq!(slot.key(), Some("b"));
        assert!(slot.is_placeholder());

        slot.release();
        assert_eq!(slot.key(), None);
    }

    #[test]
    fn test_fit_keeps_aspect() {
        // 2:1 image into 40x10 cells: 20 pixel rows -> 40 cols
        assert_eq!(fit(200, 100, 40, 10), (40, 10));
        // Wide image is limited by columns
        assert_eq!(fit(400, 100, 40, 10), (40, 5));
        // Tall image is limited by rows
        assert_eq!(fit(100, 100, 40, 10), (20, 10));
        assert_eq!(fit(0, 10, 40, 10), (0, 0));
    }

    #[test]
    fn test_render_draws_half_blocks() {
        let mut render = RenderHarness::new(20, 6);
        let image = placeholder();
        let output = render.render_to_string_plain(|frame| {
            ImageView.render(
                frame,
                frame.area(),
                ImageViewProps {
                    image: &image,
                    background: Color::Black,
                },
            );
        });
        assert!(output.contains(HALF_BLOCK));
    }
}
