//! Immutable codel grid.
//!
//! Construction is the only place raw pixel data is looked at. Once built,
//! the engine only sees [`Color`]s.

use crate::color::{Color, Rgb};
use crate::direction::Direction;
use crate::types::Position;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

/// Configuration errors raised while building a grid. Fatal for the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no codels")]
    Empty,
    #[error("row {row} has {found} codels, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unrecognized color {rgb:02x?} at pixel ({x}, {y})")]
    UnrecognizedColor { x: usize, y: usize, rgb: Rgb },
    #[error("codel size {codel_size} does not evenly divide a {width}x{height} image")]
    InvalidCodelSize {
        codel_size: usize,
        width: usize,
        height: usize,
    },
    #[error("expected {expected} pixels, got {found}")]
    PixelCount { expected: usize, found: usize },
    #[error("unknown codel token '{token}' at line {line}, column {column}")]
    UnknownToken {
        token: String,
        line: usize,
        column: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Builds a grid from rows of colors. Every row must have the same length.
    pub fn new(rows: Vec<Vec<Color>>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::Empty);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for (row, codels) in rows.into_iter().enumerate() {
            if codels.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: codels.len(),
                });
            }
            cells.extend(codels);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid from a row-major buffer of decoded pixels.
    ///
    /// Each codel is a `codel_size` x `codel_size` square of pixels and takes
    /// the color of its top-left pixel. Every sampled pixel must be in the
    /// palette; anything else is rejected here rather than at run time.
    pub fn from_rgb(
        width: usize,
        height: usize,
        pixels: &[Rgb],
        codel_size: usize,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        if pixels.len() != width * height {
            return Err(GridError::PixelCount {
                expected: width * height,
                found: pixels.len(),
            });
        }
        if codel_size == 0 || width % codel_size != 0 || height % codel_size != 0 {
            return Err(GridError::InvalidCodelSize {
                codel_size,
                width,
                height,
            });
        }

        let rows = (0..height)
            .step_by(codel_size)
            .map(|y| {
                (0..width)
                    .step_by(codel_size)
                    .map(|x| {
                        let rgb = pixels[y * width + x];
                        Color::from_rgb(rgb).ok_or(GridError::UnrecognizedColor { x, y, rgb })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of codels.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, pos: Position) -> Option<Color> {
        if pos.x < self.width && pos.y < self.height {
            Some(self.cells[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    /// The codel one step from `pos` in direction `dir`, if it is on the grid.
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.delta();
        let x = pos.x as isize + dx;
        let y = pos.y as isize + dy;
        self.in_bounds(x, y)
            .then(|| Position::new(x as usize, y as usize))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.width)
    }
}

impl Index<Position> for Grid {
    type Output = Color;

    fn index(&self, pos: Position) -> &Color {
        assert!(
            pos.x < self.width && pos.y < self.height,
            "position {pos} outside {}x{} grid",
            self.width,
            self.height
        );
        &self.cells[pos.y * self.width + pos.x]
    }
}

/// Text notation: one row per line, whitespace separated codel tokens
/// (see [`Color::from_token`]). Blank lines and lines starting with `#`
/// are skipped.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (line_no, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let row = line
                .split_whitespace()
                .enumerate()
                .map(|(col, token)| {
                    Color::from_token(token).ok_or_else(|| GridError::UnknownToken {
                        token: token.to_string(),
                        line: line_no + 1,
                        column: col + 1,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::new(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let tokens: Vec<String> = row.iter().map(Color::to_string).collect();
            writeln!(f, "{}", tokens.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Hue, Lightness};

    const RED: Rgb = [0xFF, 0x00, 0x00];
    const BLUE: Rgb = [0x00, 0x00, 0xFF];

    #[test]
    fn parses_text_notation() {
        let grid: Grid = "# two rows\nR lR\n\nK W\n".parse().unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(
            grid.get(Position::new(1, 0)),
            Some(Color::chromatic(Hue::Red, Lightness::Light))
        );
        assert_eq!(grid[Position::new(0, 1)], Color::Black);
        assert_eq!(grid.get(Position::new(2, 0)), None);
    }

    #[test]
    fn display_round_trips() {
        let text = "R lR dY\nW K M\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn rejects_ragged_and_empty_input() {
        assert_eq!(
            "R R\nR\n".parse::<Grid>(),
            Err(GridError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!("# nothing\n".parse::<Grid>(), Err(GridError::Empty));
    }

    #[test]
    fn reports_unknown_tokens_with_location() {
        let err = "R R\nR Q\n".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            GridError::UnknownToken {
                token: "Q".into(),
                line: 2,
                column: 2
            }
        );
    }

    #[test]
    fn samples_top_left_pixel_of_each_codel() {
        #[rustfmt::skip]
        let pixels = [
            RED, RED, BLUE, BLUE,
            RED, RED, BLUE, BLUE,
        ];
        let grid = Grid::from_rgb(4, 2, &pixels, 2).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 1));
        assert_eq!(grid.to_string(), "R B\n");
    }

    #[test]
    fn unrecognized_pixel_is_a_configuration_error() {
        let pixels = [RED, [0x10, 0x20, 0x30]];
        assert_eq!(
            Grid::from_rgb(2, 1, &pixels, 1),
            Err(GridError::UnrecognizedColor {
                x: 1,
                y: 0,
                rgb: [0x10, 0x20, 0x30]
            })
        );
    }

    #[test]
    fn codel_size_must_divide_dimensions() {
        let pixels = [RED; 6];
        assert!(matches!(
            Grid::from_rgb(3, 2, &pixels, 2),
            Err(GridError::InvalidCodelSize { .. })
        ));
        assert!(matches!(
            Grid::from_rgb(3, 2, &pixels, 0),
            Err(GridError::InvalidCodelSize { .. })
        ));
        assert!(matches!(
            Grid::from_rgb(3, 3, &pixels, 1),
            Err(GridError::PixelCount { expected: 9, found: 6 })
        ));
    }

    #[test]
    fn neighbor_stays_on_grid() {
        let grid: Grid = "R R\nR R\n".parse().unwrap();
        let corner = Position::new(1, 1);
        assert_eq!(grid.neighbor(corner, Direction::Right), None);
        assert_eq!(grid.neighbor(corner, Direction::Down), None);
        assert_eq!(grid.neighbor(corner, Direction::Left), Some(Position::new(0, 1)));
        assert_eq!(grid.neighbor(Position::ORIGIN, Direction::Up), None);
    }
}
