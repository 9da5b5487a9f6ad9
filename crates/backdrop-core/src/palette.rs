//! Two-entry palette table and the current theme.

use glam::Vec3;

/// Attribute value the host page uses for the light theme. Anything else,
/// including a missing attribute, is dark.
pub const LIGHT_SENTINEL: &str = "light";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some(LIGHT_SENTINEL) => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn from_is_dark(is_dark: bool) -> Self {
        if is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Convert a packed `0xRRGGBB` colour to linear-ish 0..1 floats.
#[inline]
pub fn rgb_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Primary, secondary and highlight accents.
    pub accents: [Vec3; 3],
    pub particle_opacity: f32,
    pub line_opacity: f32,
    pub block_face_opacity: f32,
    pub block_side_opacity: f32,
    pub ring_color: Vec3,
    pub ring_opacity: f32,
    /// Multiplier on the nebula pulse opacity.
    pub nebula_gain: f32,
}

impl Palette {
    pub fn dark() -> Self {
        let accents = [rgb_hex(0x7c3aed), rgb_hex(0x06b6d4), rgb_hex(0xf43f5e)];
        Self {
            accents,
            particle_opacity: 0.7,
            line_opacity: 0.12,
            block_face_opacity: 0.95,
            block_side_opacity: 0.9,
            ring_color: accents[0],
            ring_opacity: 0.15,
            nebula_gain: 1.0,
        }
    }

    pub fn light() -> Self {
        let accents = [rgb_hex(0x6d28d9), rgb_hex(0x0891b2), rgb_hex(0xe11d48)];
        Self {
            accents,
            particle_opacity: 0.45,
            line_opacity: 0.06,
            block_face_opacity: 0.7,
            block_side_opacity: 0.7,
            ring_color: accents[0],
            ring_opacity: 0.06,
            nebula_gain: 0.32,
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }
}

/// Current theme plus the palette derived from it.
#[derive(Clone, Debug)]
pub struct ThemeState {
    theme: Theme,
    palette: Palette,
}

impl ThemeState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            palette: Palette::for_theme(theme),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Switch palettes. Returns `false` (and does nothing) when `theme` is
    /// already current.
    pub fn apply(&mut self, theme: Theme) -> bool {
        if theme == self.theme {
            return false;
        }
        self.theme = theme;
        self.palette = Palette::for_theme(theme);
        true
    }
}
