//! Font loading and cell metrics.
use std::{fmt, fs, path::PathBuf};

use ab_glyph::{Font as _, FontArc, PxScale, ScaleFont as _};
use log::debug;

use crate::error::FontError;

static BUNDLED_REGULAR: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono.ttf");
static BUNDLED_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono-Bold.ttf");

/// Glyph whose advance defines the cell width.
const REFERENCE_GLYPH: char = 'M';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaceKind {
    Regular,
    Bold,
}

impl fmt::Display for FaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceKind::Regular => f.write_str("regular"),
            FaceKind::Bold => f.write_str("bold"),
        }
    }
}

/// Where a face's TrueType/OpenType data comes from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FontSource {
    /// DejaVu Sans Mono, compiled into the crate.
    #[default]
    Bundled,
    Bytes(Vec<u8>),
    Path(PathBuf),
}

impl FontSource {
    fn load(&self, kind: FaceKind) -> Result<FontArc, FontError> {
        let parsed = match self {
            FontSource::Bundled => FontArc::try_from_slice(match kind {
                FaceKind::Regular => BUNDLED_REGULAR,
                FaceKind::Bold => BUNDLED_BOLD,
            }),
            FontSource::Bytes(bytes) => FontArc::try_from_vec(bytes.clone()),
            FontSource::Path(path) => {
                let bytes = fs::read(path).map_err(|e| FontError::Read {
                    face: kind,
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                FontArc::try_from_vec(bytes)
            }
        };
        parsed.map_err(|e| FontError::Parse {
            face: kind,
            reason: e.to_string(),
        })
    }
}

/// Pixel size of one grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellMetrics {
    pub cell_width: u32,
    pub cell_height: u32,
}

impl CellMetrics {
    /// Canvas size in pixels for a `cols × rows` grid.
    pub fn image_size(&self, cols: usize, rows: usize) -> (u32, u32) {
        (
            self.cell_width.saturating_mul(cols as u32),
            self.cell_height.saturating_mul(rows as u32),
        )
    }
}

/// One loaded face at the engine's pixel size.
#[derive(Clone, Debug)]
pub struct Face {
    pub(crate) font: FontArc,
    pub(crate) scale: PxScale,
    baseline: u32,
}

impl Face {
    fn new(font: FontArc, kind: FaceKind, font_size: f32) -> Result<Self, FontError> {
        // `font_size` is pixels per em; PxScale is relative to ascent - descent.
        let units_per_em = font.units_per_em().ok_or_else(|| {
            FontError::InvalidMetrics(format!("{kind} font has no units per em"))
        })?;
        let scale = PxScale::from(font_size * font.height_unscaled() / units_per_em);
        let ascent = font.as_scaled(scale).ascent();
        if !ascent.is_finite() || ascent <= 0.0 {
            return Err(FontError::InvalidMetrics(format!(
                "{kind} font ascent {ascent}"
            )));
        }
        Ok(Self {
            font,
            scale,
            baseline: ascent.ceil() as u32,
        })
    }

    /// Distance in pixels from the top of a cell to the glyph baseline.
    pub fn baseline(&self) -> u32 {
        self.baseline
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.font.glyph_id(ch).0 != 0
    }
}

/// The regular and bold faces plus the cell metrics derived from them.
#[derive(Clone, Debug)]
pub struct Faces {
    pub regular: Face,
    pub bold: Face,
    metrics: CellMetrics,
}

impl Faces {
    /// Loads both faces once and derives the cell size from the regular one.
    pub fn load(
        regular: &FontSource,
        bold: &FontSource,
        font_size: f32,
    ) -> Result<Self, FontError> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(FontError::InvalidSize(font_size));
        }
        let regular = Face::new(regular.load(FaceKind::Regular)?, FaceKind::Regular, font_size)?;
        let bold = Face::new(bold.load(FaceKind::Bold)?, FaceKind::Bold, font_size)?;

        if !regular.has_glyph(REFERENCE_GLYPH) {
            return Err(FontError::MissingGlyph {
                face: FaceKind::Regular,
                ch: REFERENCE_GLYPH,
            });
        }
        let scaled = regular.font.as_scaled(regular.scale);
        let advance = scaled.h_advance(regular.font.glyph_id(REFERENCE_GLYPH));
        let height = scaled.ascent() - scaled.descent() + scaled.line_gap();
        if !(advance.is_finite() && advance > 0.0 && height.is_finite() && height > 0.0) {
            return Err(FontError::InvalidMetrics(format!(
                "cell {advance}x{height} at size {font_size}"
            )));
        }
        let metrics = CellMetrics {
            cell_width: advance.ceil() as u32,
            cell_height: height.ceil() as u32,
        };
        debug!(
            "loaded faces at {font_size}px: cell {}x{}, baselines {}/{}",
            metrics.cell_width,
            metrics.cell_height,
            regular.baseline,
            bold.baseline
        );
        Ok(Self {
            regular,
            bold,
            metrics,
        })
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn select(&self, bold: bool) -> &Face {
        if bold {
            &self.bold
        } else {
            &self.regular
        }
    }
}
