//! Color model: the fixed 16-entry palette, the derived 256-color table and
//! SGR parameter handling.

use crate::grid::Style;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Builds an opaque color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

pub const PALETTE: [Rgba; 16] = [
    Rgba::hex(0x1D1F21), // black
    Rgba::hex(0xCC6666), // red
    Rgba::hex(0xB5BD68), // green
    Rgba::hex(0xF0C674), // yellow
    Rgba::hex(0x81A2BE), // blue
    Rgba::hex(0xB294BB), // magenta
    Rgba::hex(0x8ABEB7), // cyan
    Rgba::hex(0xC5C8C6), // white
    Rgba::hex(0x666666), // bright black
    Rgba::hex(0xD54E53), // bright red
    Rgba::hex(0xB9CA4A), // bright green
    Rgba::hex(0xE7C547), // bright yellow
    Rgba::hex(0x7AA6DA), // bright blue
    Rgba::hex(0xC397D8), // bright magenta
    Rgba::hex(0x70C0B1), // bright cyan
    Rgba::hex(0xEAEAEA), // bright white
];

pub const DEFAULT_FG: Rgba = PALETTE[7];
pub const DEFAULT_BG: Rgba = Rgba::rgb(0, 0, 0);

/// Looks up one of the 16 base colors. Out-of-range indices yield `None`;
/// callers fall back to the default of the layer they are setting.
pub fn palette(index: usize) -> Option<Rgba> {
    PALETTE.get(index).copied()
}

/// Resolves an xterm 256-color index.
pub fn resolve_256(index: u8) -> Rgba {
    match index {
        0..=15 => PALETTE[index as usize],
        16..=231 => {
            let cube = index - 16;
            let level = |i: u8| if i == 0 { 0 } else { 55 + 40 * i };
            Rgba::rgb(level(cube / 36), level((cube / 6) % 6), level(cube % 6))
        }
        232..=255 => {
            let gray = 8 + 10 * (index - 232);
            Rgba::rgb(gray, gray, gray)
        }
    }
}

#[derive(Clone, Copy)]
enum Layer {
    Foreground,
    Background,
}

impl Layer {
    fn default_color(self) -> Rgba {
        match self {
            Layer::Foreground => DEFAULT_FG,
            Layer::Background => DEFAULT_BG,
        }
    }

    fn set(self, style: &mut Style, color: Rgba) {
        match self {
            Layer::Foreground => style.fg = color,
            Layer::Background => style.bg = color,
        }
    }
}

/// Splits the raw parameter bytes of a CSI sequence into integers.
///
/// `;` and `:` both separate parameters, empty fields count as 0 and values
/// too large for `u32` saturate.
pub fn parse_params(raw: &str) -> Vec<u32> {
    if raw.is_empty() {
        return vec![0];
    }
    raw.split([';', ':'])
        .map(|field| {
            field.bytes().filter(u8::is_ascii_digit).fold(0u32, |acc, b| {
                acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
            })
        })
        .collect()
}

/// Applies SGR parameters to `style`, left to right.
///
/// Bold only selects the bold face; it never promotes 30-37 to the bright
/// palette entries. Unknown codes are skipped.
pub fn apply_sgr(params: &[u32], style: &mut Style) {
    if params.is_empty() {
        *style = Style::default();
        return;
    }
    let mut i = 0;
    while i < params.len() {
        let code = params[i];
        i += 1;
        match code {
            0 => *style = Style::default(),
            1 => style.bold = true,
            3 => style.italic = true,
            22 => style.bold = false,
            23 => style.italic = false,
            30..=37 => style.fg = indexed(code - 30, Layer::Foreground),
            38 => i += extended(&params[i..], Layer::Foreground, style),
            39 => style.fg = DEFAULT_FG,
            40..=47 => style.bg = indexed(code - 40, Layer::Background),
            48 => i += extended(&params[i..], Layer::Background, style),
            49 => style.bg = DEFAULT_BG,
            90..=97 => style.fg = indexed(8 + code - 90, Layer::Foreground),
            100..=107 => style.bg = indexed(8 + code - 100, Layer::Background),
            _ => {}
        }
    }
}

fn indexed(index: u32, layer: Layer) -> Rgba {
    palette(index as usize).unwrap_or_else(|| layer.default_color())
}

/// Handles the tail of a `38`/`48` code and returns how many parameters it
/// consumed.
fn extended(rest: &[u32], layer: Layer, style: &mut Style) -> usize {
    match rest.first() {
        Some(5) => match rest.get(1) {
            Some(&n) => {
                let color = u8::try_from(n)
                    .map(resolve_256)
                    .unwrap_or_else(|_| layer.default_color());
                layer.set(style, color);
                2
            }
            None => rest.len(),
        },
        Some(2) => {
            if rest.len() < 4 {
                return rest.len();
            }
            let channel = |v: u32| v.min(255) as u8;
            layer.set(
                style,
                Rgba::rgb(channel(rest[1]), channel(rest[2]), channel(rest[3])),
            );
            4
        }
        Some(_) => 1,
        None => 0,
    }
}
