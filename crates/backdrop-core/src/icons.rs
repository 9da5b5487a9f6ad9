//! Language tiles painted on the decoration faces.
//!
//! Each icon owns two layers of the icon texture array: the face tile
//! (rounded background, symbol and label) and a plain side tile with a faint
//! grid. Everything here is layout data; the web crate does the painting.

#[derive(Clone, Copy, Debug)]
pub struct IconStyle {
    pub name: &'static str,
    /// Large glyph drawn in the middle of the face.
    pub symbol: &'static str,
    pub background: u32,
    pub foreground: u32,
    pub accent: u32,
}

pub const ICONS: [IconStyle; 5] = [
    IconStyle {
        name: "Python",
        symbol: "Py",
        background: 0x3776ab,
        foreground: 0xffd43b,
        accent: 0x306998,
    },
    IconStyle {
        name: "JavaScript",
        symbol: "JS",
        background: 0xf7df1e,
        foreground: 0x323330,
        accent: 0xc6b517,
    },
    IconStyle {
        name: "HTML",
        symbol: "</>",
        background: 0xe34f26,
        foreground: 0xffffff,
        accent: 0xc13b1b,
    },
    IconStyle {
        name: "MongoDB",
        symbol: "DB",
        background: 0x47a248,
        foreground: 0xffffff,
        accent: 0x3d8b3d,
    },
    IconStyle {
        name: "SQL",
        symbol: "SQL",
        background: 0xcc2927,
        foreground: 0xffffff,
        accent: 0xa61f1e,
    },
];

/// Edge of every texture layer in pixels.
pub const ICON_TEXTURE_SIZE: u32 = 256;
pub const ICON_LAYER_COUNT: u32 = ICONS.len() as u32 * 2;

pub const FACE_CORNER_RADIUS: f64 = 30.0;
pub const FACE_BORDER_WIDTH: f64 = 4.0;
pub const FACE_BORDER_COLOR: &str = "rgba(255,255,255,0.3)";
/// Inner glow: radial gradient from `(inner radius, colour)` at the centre
/// out to the tile edge.
pub const FACE_GLOW_INNER: (f64, &str) = (20.0, "rgba(255,255,255,0.15)");
pub const FACE_GLOW_OUTER: &str = "rgba(0,0,0,0.1)";

pub const ICON_FONT_FAMILY: &str = "\"Inter\", \"Segoe UI\", sans-serif";
/// Vertical offsets from the tile centre.
pub const SYMBOL_OFFSET_Y: f64 = -15.0;
pub const LABEL_OFFSET_Y: f64 = 50.0;
pub const SYMBOL_SHADOW: (f64, &str) = (10.0, "rgba(0,0,0,0.4)");
pub const LABEL_SHADOW_BLUR: f64 = 5.0;
pub const LABEL_COLOR: &str = "rgba(255,255,255,0.85)";

pub const SIDE_GRID_COLOR: &str = "rgba(255,255,255,0.08)";
// 64px tile with 1px lines every 8px, scaled up to the shared layer size
pub const SIDE_GRID_STEP: f64 = 32.0;
pub const SIDE_GRID_WIDTH: f64 = 4.0;

/// Texture layer of the face tile for `icon`; the side tile follows it.
pub fn face_layer(icon: usize) -> u32 {
    (icon % ICONS.len()) as u32 * 2
}

pub fn side_layer(icon: usize) -> u32 {
    face_layer(icon) + 1
}

/// `#rrggbb` for a canvas fill style.
pub fn css_hex(hex: u32) -> String {
    format!("#{:06x}", hex & 0x00ff_ffff)
}

/// Longer symbols get a smaller font so they stay inside the tile.
pub fn symbol_font(symbol: &str) -> String {
    let px = if symbol.chars().count() > 2 { 72 } else { 90 };
    format!("bold {}px {}", px, ICON_FONT_FAMILY)
}

pub fn label_font() -> String {
    format!("500 22px {}", ICON_FONT_FAMILY)
}

/// Offsets of the side grid lines, drawn both vertically and horizontally.
pub fn side_grid_offsets(size: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut at = 0.0;
    while at < size {
        out.push(at);
        at += SIDE_GRID_STEP;
    }
    out
}
