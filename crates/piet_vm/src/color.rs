//! Palette of the language: 18 chromatic colors (6 hues x 3 lightness
//! levels) plus the two achromatic colors, black and white.
//!
//! Commands are selected by the cyclic distance between two chromatic
//! colors along both axes, see [`Color::shift_to`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw pixel value as decoded from an image.
pub type Rgb = [u8; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hue {
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
}

impl Hue {
    pub const ALL: [Hue; 6] = [
        Hue::Red,
        Hue::Yellow,
        Hue::Green,
        Hue::Cyan,
        Hue::Blue,
        Hue::Magenta,
    ];

    /// Position on the hue cycle.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn letter(self) -> char {
        match self {
            Hue::Red => 'R',
            Hue::Yellow => 'Y',
            Hue::Green => 'G',
            Hue::Cyan => 'C',
            Hue::Blue => 'B',
            Hue::Magenta => 'M',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.letter() == c)
    }

    // RGB channels at full intensity for this hue.
    const fn channels(self) -> [bool; 3] {
        match self {
            Hue::Red => [true, false, false],
            Hue::Yellow => [true, true, false],
            Hue::Green => [false, true, false],
            Hue::Cyan => [false, true, true],
            Hue::Blue => [false, false, true],
            Hue::Magenta => [true, false, true],
        }
    }
}

/// Lightness cycle, ordered so that one step darker is +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lightness {
    Light,
    Normal,
    Dark,
}

impl Lightness {
    pub const ALL: [Lightness; 3] = [Lightness::Light, Lightness::Normal, Lightness::Dark];

    pub const fn index(self) -> u8 {
        self as u8
    }

    const fn prefix(self) -> &'static str {
        match self {
            Lightness::Light => "l",
            Lightness::Normal => "",
            Lightness::Dark => "d",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Blocks movement.
    Black,
    /// Free slide; carries no command.
    White,
    Chromatic { hue: Hue, lightness: Lightness },
}

impl Color {
    pub const fn chromatic(hue: Hue, lightness: Lightness) -> Self {
        Color::Chromatic { hue, lightness }
    }

    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }

    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    /// All 20 recognized colors, chromatic ones first.
    pub fn palette() -> impl Iterator<Item = Color> {
        Lightness::ALL
            .into_iter()
            .flat_map(|l| Hue::ALL.into_iter().map(move |h| Color::chromatic(h, l)))
            .chain([Color::White, Color::Black])
    }

    /// Maps a decoded pixel onto the palette. `None` for anything outside it.
    pub fn from_rgb(rgb: Rgb) -> Option<Self> {
        Self::palette().find(|c| c.to_rgb() == rgb)
    }

    pub fn to_rgb(self) -> Rgb {
        match self {
            Color::Black => [0x00; 3],
            Color::White => [0xFF; 3],
            Color::Chromatic { hue, lightness } => {
                let (on, off) = match lightness {
                    Lightness::Light => (0xFF, 0xC0),
                    Lightness::Normal => (0xFF, 0x00),
                    Lightness::Dark => (0xC0, 0x00),
                };
                hue.channels().map(|lit| if lit { on } else { off })
            }
        }
    }

    /// Cyclic `(hue shift, lightness shift)` from `self` to `to`.
    ///
    /// Only defined between two chromatic colors.
    pub fn shift_to(self, to: Color) -> Option<(u8, u8)> {
        match (self, to) {
            (
                Color::Chromatic {
                    hue: h0,
                    lightness: l0,
                },
                Color::Chromatic {
                    hue: h1,
                    lightness: l1,
                },
            ) => Some((
                (h1.index() + 6 - h0.index()) % 6,
                (l1.index() + 3 - l0.index()) % 3,
            )),
            _ => None,
        }
    }

    /// The color `(hue_shift, lightness_shift)` steps away from `self`; the
    /// inverse of [`Color::shift_to`]. `None` for black and white.
    pub fn shifted(self, hue_shift: u8, lightness_shift: u8) -> Option<Color> {
        match self {
            Color::Chromatic { hue, lightness } => Some(Color::chromatic(
                Hue::ALL[(hue.index() as usize + hue_shift as usize) % 6],
                Lightness::ALL[(lightness.index() as usize + lightness_shift as usize) % 3],
            )),
            _ => None,
        }
    }

    /// Parses one codel token of the text notation: `W`, `K`, or an
    /// optional `l`/`d` prefix followed by a hue letter.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let first = chars.next()?;
        let (lightness, hue_letter) = match first {
            'W' | 'K' if chars.as_str().is_empty() => {
                return Some(if first == 'W' {
                    Color::White
                } else {
                    Color::Black
                });
            }
            'l' => (Lightness::Light, chars.next()?),
            'd' => (Lightness::Dark, chars.next()?),
            c => (Lightness::Normal, c),
        };
        if !chars.as_str().is_empty() {
            return None;
        }
        Hue::from_letter(hue_letter).map(|hue| Color::chromatic(hue, lightness))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("K"),
            Color::White => f.write_str("W"),
            Color::Chromatic { hue, lightness } => {
                write!(f, "{}{}", lightness.prefix(), hue.letter())
            }
        }
    }
}
