//! piet_vm property tests
//!
//! 1. Blocks are homogeneous, connected and maximal
//! 2. Locating from any member yields the same block
//! 3. Division and modulo by zero never touch the stack
//! 4. Roll with depth 0 or 1 only consumes its operands
//! 5. Pointer by a multiple of 4 leaves DP alone
//! 6. Command lookup inverts color shifting
//! 7. Any grid either halts or exhausts its budget, deterministically

use proptest::prelude::*;
use piet_vm::{
    Block, CapturedOutput, Color, Direction, ExecError, Grid, Navigator, Opcode, Position,
    ScriptedInput, Stack, Value, Vm, VmConfig,
};

// ── Strategies ───────────────────────────────────────────────────────────────

fn any_color() -> impl Strategy<Value = Color> + Clone {
    let palette: Vec<Color> = Color::palette().collect();
    proptest::sample::select(palette)
}

/// Few colors so that blocks get large.
fn few_colors() -> impl Strategy<Value = Color> + Clone {
    let palette: Vec<Color> = Color::palette().take(2).chain([Color::White]).collect();
    proptest::sample::select(palette)
}

fn grid_of(color: impl Strategy<Value = Color> + Clone) -> impl Strategy<Value = Grid> {
    (1usize..7, 1usize..7).prop_flat_map(move |(w, h)| {
        proptest::collection::vec(proptest::collection::vec(color.clone(), w), h)
            .prop_map(|rows| Grid::new(rows).unwrap())
    })
}

fn values() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec(any::<i64>().prop_map(Value::from), 0..8)
}

fn neighbors(grid: &Grid, pos: Position) -> impl Iterator<Item = Position> + '_ {
    Direction::ALL
        .into_iter()
        .filter_map(move |d| grid.neighbor(pos, d))
}

fn cfg() -> VmConfig {
    VmConfig {
        max_steps: Some(500),
        trace: true,
    }
}

// ── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn blocks_are_homogeneous_connected_maximal(
        grid in grid_of(few_colors()),
        sx in 0usize..7,
        sy in 0usize..7,
    ) {
        let seed = Position::new(sx % grid.width(), sy % grid.height());
        let block = Block::locate(&grid, seed);
        prop_assert!(block.contains(seed));
        for pos in block.codels() {
            prop_assert_eq!(grid[pos], block.color());
            if block.size() > 1 {
                prop_assert!(neighbors(&grid, pos).any(|n| block.contains(n)));
            }
            for n in neighbors(&grid, pos) {
                if grid[n] == block.color() {
                    prop_assert!(block.contains(n));
                }
            }
        }
    }

    #[test]
    fn block_is_the_same_from_any_member(grid in grid_of(few_colors())) {
        let block = Block::locate(&grid, Position::ORIGIN);
        for pos in block.codels() {
            prop_assert!(Block::locate(&grid, pos).codels().eq(block.codels()));
        }
    }

    #[test]
    fn divide_and_mod_by_zero_are_no_ops(below in values()) {
        let mut stack = Stack::from(below);
        stack.push(0);
        let before = stack.clone();
        prop_assert!(stack.divide().is_err());
        prop_assert_eq!(&stack, &before);
        prop_assert!(stack.modulo().is_err());
        prop_assert_eq!(&stack, &before);
    }

    #[test]
    fn roll_with_shallow_depth_only_pops(below in values(), depth in 0i64..2, count in any::<i64>()) {
        let mut stack = Stack::from(below.clone());
        stack.push(depth);
        stack.push(count);
        prop_assert!(stack.roll().is_ok());
        prop_assert_eq!(stack.values(), &below[..]);
    }

    #[test]
    fn pointer_by_multiple_of_four_is_identity(k in -1000i64..1000, start in 0u8..4) {
        let mut nav = Navigator::default();
        nav.turn(start);
        let dp = nav.dp();
        let mut stack = Stack::new();
        stack.push(4 * k);
        nav.turn(stack.pop_turns().unwrap());
        prop_assert_eq!(nav.dp(), dp);
    }

    #[test]
    fn lookup_inverts_shifting(from in any_color(), hue in 0u8..6, lightness in 0u8..3) {
        prop_assume!(!from.is_black() && !from.is_white());
        let to = from.shifted(hue, lightness).unwrap();
        prop_assert_eq!(
            Opcode::for_transition(from, to),
            Opcode::from_shift(hue, lightness)
        );
    }

    #[test]
    fn any_grid_halts_or_runs_out_of_budget(
        grid in grid_of(any_color()),
        input in proptest::collection::vec("-?[0-9]{1,3}|.", 0..4),
    ) {
        let run = || {
            let mut vm = Vm::new(
                cfg(),
                grid.clone(),
                ScriptedInput::new(input.clone()),
                CapturedOutput::new(),
            );
            let result = vm.run();
            let trace = match &result {
                Ok(outcome) => outcome.trace.clone(),
                Err(_) => vm.trace().to_vec(),
            };
            (result.map(|o| o.steps), trace, vm.stack().to_vec())
        };
        let (first, trace_a, stack_a) = run();
        let (second, trace_b, stack_b) = run();
        match (&first, &second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a, b);
            }
            (Err(ExecError::StepLimit(500)), Err(ExecError::StepLimit(500))) => {}
            other => {
                prop_assert!(false, "diverging runs: {:?}", other);
            }
        }
        prop_assert_eq!(trace_a, trace_b);
        prop_assert_eq!(stack_a, stack_b);
    }
}
