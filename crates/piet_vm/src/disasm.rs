//! Human-readable rendering of commands, trace steps and grids.

use crate::exec::{TraceEvent, TraceStep};
use crate::grid::Grid;
use crate::opcode::Opcode;
use crate::types::{Position, Value};

/// One-line description of what a command does.
pub fn describe_opcode(op: Opcode) -> &'static str {
    match op {
        Opcode::Nop => "does nothing",
        Opcode::Push => "pushes the size of the block just left",
        Opcode::Pop => "discards the top value",
        Opcode::Add => "pops two values, pushes their sum",
        Opcode::Subtract => "pops two values, pushes second minus top",
        Opcode::Multiply => "pops two values, pushes their product",
        Opcode::Divide => "pops two values, pushes second divided by top (floored)",
        Opcode::Mod => "pops two values, pushes second modulo top (sign of top)",
        Opcode::Not => "replaces the top value with 1 if it is zero, else 0",
        Opcode::Greater => "pops two values, pushes 1 if second is greater than top, else 0",
        Opcode::Pointer => "pops a value, turns DP clockwise that many times",
        Opcode::Switch => "pops a value, toggles CC that many times",
        Opcode::Duplicate => "pushes a copy of the top value",
        Opcode::Roll => "pops count and depth, rolls the values below depth times",
        Opcode::InInt => "reads an integer line and pushes it",
        Opcode::InChar => "reads a character and pushes its code point",
        Opcode::OutInt => "pops a value and writes it as a decimal integer",
        Opcode::OutChar => "pops a value and writes it as a character",
    }
}

/// Formats one recorded step, e.g.
/// `0003  (1, 0) -> (2, 0)  push(2)  dp=right cc=left depth=1`.
pub fn describe_step(step: &TraceStep) -> String {
    let what = match &step.event {
        TraceEvent::Command {
            op,
            skipped: Some(reason),
            ..
        } => format!("{} (skipped: {})", op.name(), reason),
        TraceEvent::Command { op, args, .. } if args.is_empty() => op.name().to_string(),
        TraceEvent::Command { op, args, .. } => {
            let args: Vec<String> = args.iter().map(Value::to_string).collect();
            format!("{}({})", op.name(), args.join(", "))
        }
        TraceEvent::Slide => "slide".to_string(),
        TraceEvent::Halt => "halt".to_string(),
    };
    format!(
        "{:04}  {} -> {}  {}  dp={} cc={} depth={}",
        step.step, step.from, step.to, what, step.dp, step.cc, step.stack_depth
    )
}

/// Renders `grid` in text notation with `marker` bracketed, one row per
/// line and cells aligned on a four-column grid.
pub fn render_grid(grid: &Grid, marker: Option<Position>) -> String {
    let mut out = String::new();
    for (y, row) in grid.rows().enumerate() {
        let mut line = String::new();
        for (x, color) in row.iter().enumerate() {
            let cell = if marker == Some(Position::new(x, y)) {
                format!("[{color}]")
            } else {
                format!(" {color} ")
            };
            line.push_str(&format!("{cell:<4}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
