//! Test support utilities for termframe.
//!
//! Helpers for inspecting rendered frames in tests and benchmarks. They are
//! not part of the rendering API.

use image::{ImageFormat, RgbaImage};

use crate::{CellMetrics, Rgba};

/// Decodes PNG bytes produced by [`Engine::render`](crate::Engine::render).
pub fn decode_png(bytes: &[u8]) -> image::ImageResult<RgbaImage> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8())
}

/// All pixels of the cell at `(row, col)`, in row-major order.
pub fn cell_pixels(image: &RgbaImage, metrics: CellMetrics, row: usize, col: usize) -> Vec<Rgba> {
    let x0 = col as u32 * metrics.cell_width;
    let y0 = row as u32 * metrics.cell_height;
    let mut pixels = Vec::with_capacity((metrics.cell_width * metrics.cell_height) as usize);
    for y in y0..(y0 + metrics.cell_height).min(image.height()) {
        for x in x0..(x0 + metrics.cell_width).min(image.width()) {
            let [r, g, b, a] = image.get_pixel(x, y).0;
            pixels.push(Rgba { r, g, b, a });
        }
    }
    pixels
}

/// True when any pixel of the cell differs from `background`.
pub fn has_ink(
    image: &RgbaImage,
    metrics: CellMetrics,
    row: usize,
    col: usize,
    background: Rgba,
) -> bool {
    cell_pixels(image, metrics, row, col)
        .iter()
        .any(|p| *p != background)
}
