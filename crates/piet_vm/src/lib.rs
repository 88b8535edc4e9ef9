//! piet_vm - interpreter for programs drawn as grids of colored codels
//!
//! - Blocks: maximal 4-connected regions of one color
//! - Navigation: DP/CC state machine with boundary retries and white slides
//! - Stack machine: 17 commands over arbitrary-precision integers
//! - Step-at-a-time execution with an optional step budget and trace

pub mod block;
pub mod color;
pub mod direction;
pub mod disasm;
pub mod exec;
pub mod grid;
pub mod navigator;
pub mod opcode;
pub mod providers;
pub mod stack;
pub mod types;

pub use block::Block;
pub use color::{Color, Hue, Lightness, Rgb};
pub use direction::{CodelChooser, Direction};
pub use disasm::{describe_opcode, describe_step, render_grid};
pub use exec::{
    ExecError, Snapshot, StepOutcome, TraceEvent, TraceStep, Vm, VmConfig, VmOutcome,
};
pub use grid::{Grid, GridError};
pub use navigator::{Navigator, Transition};
pub use opcode::Opcode;
pub use providers::{
    CapturedOutput, InputProvider, OutputProvider, ScriptedInput, StreamInput, StreamOutput,
};
pub use stack::{Invalid, Stack};
pub use types::{Position, Value};
