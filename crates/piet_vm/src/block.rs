//! Color blocks: maximal 4-connected regions of one color.

use crate::color::Color;
use crate::direction::Direction;
use crate::grid::Grid;
use crate::types::Position;
use std::collections::{BTreeSet, VecDeque};

/// The region the interpreter currently sits in.
///
/// Recomputed from the current position on every step; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    color: Color,
    seed: Position,
    codels: BTreeSet<Position>,
}

impl Block {
    /// Flood fills from `seed` through edge-adjacent codels of the seed's
    /// color. Diagonal neighbours are not connected.
    ///
    /// # Panics
    ///
    /// If `seed` is outside the grid.
    pub fn locate(grid: &Grid, seed: Position) -> Self {
        let color = grid[seed];
        let mut codels = BTreeSet::from([seed]);
        let mut queue = VecDeque::from([seed]);

        while let Some(pos) = queue.pop_front() {
            for dir in Direction::ALL {
                let Some(next) = grid.neighbor(pos, dir) else {
                    continue;
                };
                if grid[next] == color && codels.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        Self {
            color,
            seed,
            codels,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// The codel the block was located from.
    pub fn seed(&self) -> Position {
        self.seed
    }

    /// Codel count; the value `push` puts on the stack.
    pub fn size(&self) -> usize {
        self.codels.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.codels.contains(&pos)
    }

    /// Members ordered by x, then y.
    pub fn codels(&self) -> impl Iterator<Item = Position> + '_ {
        self.codels.iter().copied()
    }

    /// Codels whose coordinate along `dir` is extremal in that direction,
    /// i.e. the block's whole edge facing `dir`.
    pub fn far_edge(&self, dir: Direction) -> Vec<Position> {
        let Some(limit) = self.codels().map(|p| extent(p, dir)).max() else {
            return Vec::new();
        };
        self.codels().filter(|&p| extent(p, dir) == limit).collect()
    }
}

/// Signed projection of `pos` onto `dir`; larger is further along it.
pub(crate) fn extent(pos: Position, dir: Direction) -> isize {
    let (dx, dy) = dir.delta();
    dx * pos.x as isize + dy * pos.y as isize
}
