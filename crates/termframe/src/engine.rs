use std::{fs, path::Path};

use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder, Rgba as Pixel, RgbaImage};
use log::trace;
use once_cell::sync::Lazy;

use crate::{
    color::DEFAULT_BG,
    error::{FontError, RenderError, Result},
    font::{CellMetrics, Faces, FontSource},
    grid::Grid,
    parser, raster,
};

/// Grid dimensions and font size, the serializable part of [`EngineConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
    pub font_size: f32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            font_size: 16.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EngineConfig {
    pub size: GridSize,
    pub regular: FontSource,
    pub bold: FontSource,
}

impl EngineConfig {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            size: GridSize {
                cols,
                rows,
                ..GridSize::default()
            },
            ..Self::default()
        }
    }

    /// Font size in pixels per em.
    pub fn font_size(mut self, font_size: f32) -> Self {
        self.size.font_size = font_size;
        self
    }

    pub fn regular_font(mut self, source: FontSource) -> Self {
        self.regular = source;
        self
    }

    pub fn bold_font(mut self, source: FontSource) -> Self {
        self.bold = source;
        self
    }
}

impl From<GridSize> for EngineConfig {
    fn from(size: GridSize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

type SharedSlot = Lazy<std::result::Result<Engine, FontError>>;

static SHARED: SharedSlot = Lazy::new(|| Engine::new(EngineConfig::default()));

/// Forces `slot` and hands every caller the same engine or a clone of the
/// same error.
pub(crate) fn shared_from(
    slot: &'static SharedSlot,
) -> std::result::Result<&'static Engine, FontError> {
    (**slot).as_ref().map_err(FontError::clone)
}

/// Renders ANSI frames to PNG.
///
/// Fonts are loaded once in [`Engine::new`]; afterwards the engine is
/// immutable and can be shared between threads.
#[derive(Clone, Debug)]
pub struct Engine {
    cols: usize,
    rows: usize,
    font_size: f32,
    faces: Faces,
}

impl Engine {
    pub fn new(config: EngineConfig) -> std::result::Result<Self, FontError> {
        let faces = Faces::load(&config.regular, &config.bold, config.size.font_size)?;
        Ok(Self {
            cols: config.size.cols,
            rows: config.size.rows,
            font_size: config.size.font_size,
            faces,
        })
    }

    /// Process-wide engine with the default configuration.
    ///
    /// The first caller builds it; concurrent callers wait for that single
    /// initialization and all observe the same engine or the same error.
    pub fn shared() -> std::result::Result<&'static Engine, FontError> {
        shared_from(&SHARED)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn metrics(&self) -> CellMetrics {
        self.faces.metrics()
    }

    pub fn faces(&self) -> &Faces {
        &self.faces
    }

    /// Pixel size of the image produced for a `cols × rows` grid.
    pub fn image_size(&self, cols: usize, rows: usize) -> (u32, u32) {
        self.metrics().image_size(cols, rows)
    }

    /// Parses `text` into a grid of the configured size.
    pub fn parse(&self, text: &str) -> Grid {
        parser::parse(text, self.cols, self.rows)
    }

    /// Renders `text` at the configured grid size.
    pub fn render(&self, text: &str) -> Result<Vec<u8>> {
        self.render_sized(text, self.cols, self.rows)
    }

    /// Renders `text` on a `cols × rows` grid. Sizes whose cell count
    /// overflows `usize` parse to an empty grid and fail with
    /// [`RenderError::Encode`].
    pub fn render_sized(&self, text: &str, cols: usize, rows: usize) -> Result<Vec<u8>> {
        self.render_grid(&parser::parse(text, cols, rows))
    }

    pub fn render_to_file(&self, text: &str, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render(text)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Rasterizes `grid` and encodes it as an RGBA PNG.
    pub fn render_grid(&self, grid: &Grid) -> Result<Vec<u8>> {
        let metrics = self.metrics();
        let (width, height) = metrics.image_size(grid.cols(), grid.rows());
        if width == 0 || height == 0 {
            return Err(RenderError::Encode(format!(
                "cannot encode a {width}x{height} image"
            )));
        }

        let mut buffer = RgbaImage::from_pixel(width, height, Pixel(DEFAULT_BG.to_array()));
        for (row, col, cell) in grid.cells() {
            raster::fill_cell(&mut buffer, row, col, cell.bg, metrics);
            raster::draw_cell(&mut buffer, row, col, cell, metrics, &self.faces);
        }

        let bytes = encode_png(&buffer)?;
        trace!(
            "rendered {}x{} grid to {width}x{height} px, {} bytes",
            grid.cols(),
            grid.rows(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn encode_png(buffer: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(
            buffer.as_raw(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FaceKind;
    use std::thread;

    static BROKEN: SharedSlot = Lazy::new(|| {
        Engine::new(EngineConfig::default().bold_font(FontSource::Bytes(vec![0; 64])))
    });

    #[test]
    fn shared_failure_reaches_every_caller() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| shared_from(&BROKEN).map(|e| e.cols())))
            .collect();
        let errors: Vec<FontError> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap_err())
            .collect();
        assert!(matches!(
            errors[0],
            FontError::Parse {
                face: FaceKind::Bold,
                ..
            }
        ));
        assert!(errors.iter().all(|e| *e == errors[0]));
    }

    #[test]
    fn overflowing_sizes_fail_to_encode() {
        let engine = Engine::new(EngineConfig::new(2, 1)).unwrap();
        let err = engine.render_sized("A", usize::MAX, 2).unwrap_err();
        assert!(matches!(err, RenderError::Encode(_)));
    }
}
