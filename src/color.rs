//! Colors and text attributes.
//!
//! Colors are abstract identifiers at this level; the SGR encoding lives in
//! [`crate::ansi`]. A [`ColorPair`] is an ordered (foreground, background)
//! pair whose `reversed()` transform is how widgets highlight the selected
//! row or the active button.

// =============================================================================
// Color
// =============================================================================

/// A terminal color from the toolkit palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    LightGrey,
    DarkGrey,
}

impl Color {
    /// SGR code when used as a foreground color.
    pub fn fg_code(self) -> u8 {
        match self {
            Color::Black => 30,
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Magenta => 35,
            Color::Cyan => 36,
            Color::White => 97,
            Color::LightGrey => 37,
            Color::DarkGrey => 90,
        }
    }

    /// SGR code when used as a background color.
    pub fn bg_code(self) -> u8 {
        match self {
            Color::Black => 40,
            Color::Red => 41,
            Color::Green => 42,
            Color::Yellow => 43,
            Color::Blue => 44,
            Color::Magenta => 45,
            Color::Cyan => 46,
            Color::White => 107,
            Color::LightGrey => 47,
            Color::DarkGrey => 100,
        }
    }
}

// =============================================================================
// ColorPair
// =============================================================================

/// An ordered (foreground, background) color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

impl ColorPair {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// The highlight variant: foreground and background swapped.
    pub const fn reversed(self) -> Self {
        Self {
            fg: self.bg,
            bg: self.fg,
        }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new(Color::White, Color::Black)
    }
}

// =============================================================================
// Attr
// =============================================================================

bitflags::bitflags! {
    /// Text attributes, emitted as SGR codes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Attr: u8 {
        const NONE          = 0;
        const BOLD          = 1 << 0;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const BLINK         = 1 << 4;
        const REVERSE       = 1 << 5;
        const HIDDEN        = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}
