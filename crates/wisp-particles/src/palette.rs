//! Per-theme smoke palettes and the rotating color index

use wisp_core::{Color, Theme};

/// Alpha every palette entry is drawn with
pub const PALETTE_ALPHA: f32 = 0.8;

const DARK_RGB: [(u8, u8, u8); 8] = [
    (139, 92, 246),
    (59, 130, 246),
    (236, 72, 153),
    (16, 185, 129),
    (245, 158, 11),
    (239, 68, 68),
    (99, 102, 241),
    (20, 184, 166),
];

const LIGHT_RGB: [(u8, u8, u8); 8] = [
    (251, 191, 36),
    (249, 115, 22),
    (239, 68, 68),
    (16, 185, 129),
    (59, 130, 246),
    (236, 72, 153),
    (139, 92, 246),
    (20, 184, 166),
];

/// The fixed color list for one theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    entries: &'static [(u8, u8, u8)],
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        let entries: &'static [(u8, u8, u8)] = match theme {
            Theme::Dark => &DARK_RGB,
            Theme::Light => &LIGHT_RGB,
        };
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, wrapping around the palette
    pub fn color(&self, index: usize) -> Color {
        let (r, g, b) = self.entries[index % self.entries.len()];
        Color::from_rgba8(r, g, b, PALETTE_ALPHA)
    }

    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        (0..self.len()).map(|i| self.color(i))
    }

    /// Whether `color` is one of this palette's entries
    pub fn contains(&self, color: Color) -> bool {
        self.colors().any(|c| c == color)
    }
}

/// Rotating palette index. Advances once per spawned particle and is shared
/// across themes, so a theme switch continues from the same position.
#[derive(Debug, Clone, Default)]
pub struct PaletteCursor {
    index: usize,
}

impl PaletteCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color at the current index for `theme`, then advance
    pub fn next_color(&mut self, theme: Theme) -> Color {
        let color = self.peek(theme);
        self.index = self.index.wrapping_add(1);
        color
    }

    /// Color at the current index without advancing
    pub fn peek(&self, theme: Theme) -> Color {
        Palette::for_theme(theme).color(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
