use ab_glyph::{point, Font as _};
use image::{Rgba as Pixel, RgbaImage};

use crate::{
    color::Rgba,
    font::{CellMetrics, Faces},
    grid::Cell,
};

/// Paints the `cell_width × cell_height` rectangle of one cell.
pub fn fill_cell(
    buffer: &mut RgbaImage,
    row: usize,
    col: usize,
    color: Rgba,
    metrics: CellMetrics,
) {
    let x0 = col as u32 * metrics.cell_width;
    let y0 = row as u32 * metrics.cell_height;
    let x1 = (x0 + metrics.cell_width).min(buffer.width());
    let y1 = (y0 + metrics.cell_height).min(buffer.height());
    let pixel = Pixel(color.to_array());
    for y in y0..y1 {
        for x in x0..x1 {
            buffer.put_pixel(x, y, pixel);
        }
    }
}

/// Draws the glyph of one cell in its foreground color.
///
/// Blank cells are skipped. The glyph sits on the selected face's baseline
/// and is blended by coverage over whatever is already in the buffer.
pub fn draw_cell(
    buffer: &mut RgbaImage,
    row: usize,
    col: usize,
    cell: &Cell,
    metrics: CellMetrics,
    faces: &Faces,
) {
    if cell.is_blank() {
        return;
    }
    let face = faces.select(cell.bold);
    let x = (col as u32 * metrics.cell_width) as f32;
    let y = (row as u32 * metrics.cell_height + face.baseline()) as f32;
    let glyph = face
        .font
        .glyph_id(cell.ch)
        .with_scale_and_position(face.scale, point(x, y));
    let Some(outlined) = face.font.outline_glyph(glyph) else {
        return;
    };

    let bounds = outlined.px_bounds();
    let (width, height) = (buffer.width() as i64, buffer.height() as i64);
    let fg = cell.fg;
    outlined.draw(|gx, gy, coverage| {
        let px = bounds.min.x as i64 + gx as i64;
        let py = bounds.min.y as i64 + gy as i64;
        if px < 0 || py < 0 || px >= width || py >= height {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage == 0.0 {
            return;
        }
        let dst = buffer.get_pixel_mut(px as u32, py as u32);
        dst.0 = blend(dst.0, fg, coverage);
    });
}

fn blend(dst: [u8; 4], fg: Rgba, coverage: f32) -> [u8; 4] {
    let mix = |d: u8, s: u8| (d as f32 * (1.0 - coverage) + s as f32 * coverage).round() as u8;
    [
        mix(dst[0], fg.r),
        mix(dst[1], fg.g),
        mix(dst[2], fg.b),
        mix(dst[3], fg.a),
    ]
}
