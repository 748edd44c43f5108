//! termframe: render ANSI/SGR terminal frames into deterministic PNG images.
//! Features: SGR state machine, 16/256/truecolor palette, monospace glyph
//! rasterization with bundled DejaVu Sans Mono faces, lossless PNG output.

pub mod color;
mod engine;
mod error;
pub mod font;
mod grid;
pub mod parser;
pub mod raster;

pub use color::{resolve_256, Rgba, DEFAULT_BG, DEFAULT_FG, PALETTE};
pub use engine::{Engine, EngineConfig, GridSize};
pub use error::{FontError, RenderError, Result};
pub use font::{CellMetrics, FontSource};
pub use grid::{Cell, Grid, Style};
pub use parser::{parse, GraphicsState};

// Test utilities
pub mod test_support;

/// PNG file signature every rendered image starts with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
