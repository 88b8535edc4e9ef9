//! Block-to-block movement.
//!
//! The exit codel of a block is found in two phases: the block's far edge
//! along DP, then the corner of that edge selected by CC. Leaving through it
//! either enters a colored block, slides across white, or hits a wall
//! (black or the grid border). Walls are retried up to [`MAX_ATTEMPTS`]
//! times, alternating a CC toggle and a clockwise DP turn, CC first.

use crate::block::{extent, Block};
use crate::color::Color;
use crate::direction::{CodelChooser, Direction};
use crate::grid::Grid;
use crate::types::Position;
use tracing::debug;

/// Failed exits from one block before the program is stuck.
pub const MAX_ATTEMPTS: usize = 8;

/// Wall hits while sliding across white before the program is stuck.
pub const MAX_SLIDE_TURNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stepped from `exit` into the colored codel `to`; a command fires.
    Enter { exit: Position, to: Position },
    /// Left through `exit`, crossed white and stopped on the colored codel
    /// `to`. No command fires.
    Slide { exit: Position, to: Position },
    /// No way out. The program ends.
    Stuck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    dp: Direction,
    cc: CodelChooser,
}

impl Navigator {
    pub fn new(dp: Direction, cc: CodelChooser) -> Self {
        Self { dp, cc }
    }

    pub fn dp(&self) -> Direction {
        self.dp
    }

    pub fn cc(&self) -> CodelChooser {
        self.cc
    }

    /// Turns DP clockwise `turns` times (mod 4).
    pub fn turn(&mut self, turns: u8) {
        self.dp = self.dp.rotated(turns);
    }

    pub fn toggle(&mut self) {
        self.cc = self.cc.toggled();
    }

    /// The codel the interpreter leaves `block` from under the current DP/CC.
    pub fn exit_codel(&self, block: &Block) -> Position {
        let corner = self.dp.corner(self.cc);
        block
            .far_edge(self.dp)
            .into_iter()
            .max_by_key(|&p| extent(p, corner))
            .unwrap_or(block.seed())
    }

    /// Resolves the next move out of `block`, turning DP and toggling CC as
    /// the retry and slide rules require.
    pub fn advance(&mut self, grid: &Grid, block: &Block) -> Transition {
        for attempt in 0..MAX_ATTEMPTS {
            let exit = self.exit_codel(block);
            match grid.neighbor(exit, self.dp).map(|p| (p, grid[p])) {
                Some((next, Color::White)) => {
                    return match self.slide(grid, next) {
                        Some(to) => Transition::Slide { exit, to },
                        None => Transition::Stuck,
                    };
                }
                Some((next, color)) if !color.is_black() => {
                    return Transition::Enter { exit, to: next };
                }
                _ => {
                    if attempt % 2 == 0 {
                        self.toggle();
                    } else {
                        self.dp = self.dp.clockwise();
                    }
                    debug!(attempt, %exit, dp = %self.dp, cc = %self.cc, "exit blocked");
                }
            }
        }
        Transition::Stuck
    }

    /// Moves straight across white from `start`. Walls turn DP clockwise
    /// and leave CC alone. Returns the first colored codel reached.
    fn slide(&mut self, grid: &Grid, start: Position) -> Option<Position> {
        let mut pos = start;
        let mut turns = 0;
        loop {
            match grid.neighbor(pos, self.dp).map(|p| (p, grid[p])) {
                Some((next, Color::White)) => pos = next,
                Some((next, color)) if !color.is_black() => {
                    debug!(from = %start, to = %next, "slid across white");
                    return Some(next);
                }
                _ => {
                    turns += 1;
                    self.dp = self.dp.clockwise();
                    if turns == MAX_SLIDE_TURNS {
                        debug!(at = %pos, "no way out of white region");
                        return None;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse().unwrap()
    }

    // Red block with its bottom-right codel missing, walled in by black:
    //   . . . . .
    //   . R R R .
    //   . R R R .
    //   . R R . .
    //   . . . . .
    fn notched() -> (Grid, Block) {
        let g = grid(
            "K K K K K\n\
             K R R R K\n\
             K R R R K\n\
             K R R K K\n\
             K K K K K\n",
        );
        let block = Block::locate(&g, Position::new(1, 1));
        (g, block)
    }

    #[test]
    fn exit_codel_follows_dp_then_cc() {
        let (_, block) = notched();
        let cases = [
            (Direction::Right, CodelChooser::Left, (3, 1)),
            (Direction::Right, CodelChooser::Right, (3, 2)),
            (Direction::Down, CodelChooser::Left, (2, 3)),
            (Direction::Down, CodelChooser::Right, (1, 3)),
            (Direction::Left, CodelChooser::Left, (1, 3)),
            (Direction::Left, CodelChooser::Right, (1, 1)),
            (Direction::Up, CodelChooser::Left, (1, 1)),
            (Direction::Up, CodelChooser::Right, (3, 1)),
        ];
        for (dp, cc, (x, y)) in cases {
            let nav = Navigator::new(dp, cc);
            assert_eq!(nav.exit_codel(&block), Position::new(x, y), "{dp:?}/{cc:?}");
        }
    }

    #[test]
    fn enters_adjacent_colored_block() {
        let g = grid("R R B\n");
        let block = Block::locate(&g, Position::ORIGIN);
        let mut nav = Navigator::default();
        assert_eq!(
            nav.advance(&g, &block),
            Transition::Enter {
                exit: Position::new(1, 0),
                to: Position::new(2, 0)
            }
        );
        assert_eq!((nav.dp(), nav.cc()), (Direction::Right, CodelChooser::Left));
    }

    #[test]
    fn retries_toggle_cc_before_turning_dp() {
        // Right is walled; the first retry only flips CC, the second turns
        // DP down, where the exit is open.
        let g = grid("R K\nB K\n");
        let block = Block::locate(&g, Position::ORIGIN);
        let mut nav = Navigator::default();
        assert_eq!(
            nav.advance(&g, &block),
            Transition::Enter {
                exit: Position::ORIGIN,
                to: Position::new(0, 1)
            }
        );
        assert_eq!(nav.dp(), Direction::Down);
        assert_eq!(nav.cc(), CodelChooser::Right);
    }

    #[test]
    fn isolated_codel_is_stuck_after_eight_attempts() {
        let g = grid("lG\n");
        let block = Block::locate(&g, Position::ORIGIN);
        let mut nav = Navigator::default();
        assert_eq!(nav.advance(&g, &block), Transition::Stuck);
        // four toggles and four turns bring both back to the start
        assert_eq!(nav, Navigator::default());
    }

    #[test]
    fn slides_across_white_without_touching_cc() {
        let g = grid("R W W B\n");
        let block = Block::locate(&g, Position::ORIGIN);
        let mut nav = Navigator::default();
        assert_eq!(
            nav.advance(&g, &block),
            Transition::Slide {
                exit: Position::ORIGIN,
                to: Position::new(3, 0)
            }
        );
        assert_eq!((nav.dp(), nav.cc()), (Direction::Right, CodelChooser::Left));
    }

    #[test]
    fn slide_turns_clockwise_at_walls() {
        // Slide right hits the border, turns down and lands on blue.
        let g = grid("R W W\nK K B\n");
        let block = Block::locate(&g, Position::ORIGIN);
        let mut nav = Navigator::default();
        assert_eq!(
            nav.advance(&g, &block),
            Transition::Slide {
                exit: Position::ORIGIN,
                to: Position::new(2, 1)
            }
        );
        assert_eq!(nav.dp(), Direction::Down);
        assert_eq!(nav.cc(), CodelChooser::Left);
    }

    #[test]
    fn slide_back_into_the_exited_block_is_allowed() {
        // right is the border, down is black, left is the red codel again
        let g = grid("R W\nK K\n");
        let block = Block::locate(&g, Position::ORIGIN);
        let mut nav = Navigator::default();
        assert_eq!(
            nav.advance(&g, &block),
            Transition::Slide {
                exit: Position::ORIGIN,
                to: Position::ORIGIN
            }
        );
        assert_eq!(nav.dp(), Direction::Left);
    }

    #[test]
    fn white_maze_is_stuck_after_four_turns() {
        // right, down, left, up: every leg ends on a wall
        let g = grid(
            "R W W\n\
             K K W\n\
             W W W\n",
        );
        let block = Block::locate(&g, Position::ORIGIN);
        let mut nav = Navigator::default();
        assert_eq!(nav.advance(&g, &block), Transition::Stuck);
        assert_eq!(nav.dp(), Direction::Right);
        assert_eq!(nav.cc(), CodelChooser::Left);
    }
}
