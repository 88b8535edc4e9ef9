use crate::block::Block;
use crate::direction::{CodelChooser, Direction};
use crate::grid::Grid;
use crate::navigator::{Navigator, Transition};
use crate::opcode::Opcode;
use crate::providers::{InputProvider, OutputProvider};
use crate::stack::{Invalid, Stack};
use crate::types::{Position, Value};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, trace};

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("step limit of {0} exhausted")]
    StepLimit(u64),
    #[error("i/o failure on attached stream: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default)]
pub struct VmConfig {
    /// Upper bound on `step` calls. `None` runs until the program is stuck.
    pub max_steps: Option<u64>,
    pub trace: bool,
}

impl VmConfig {
    /// Reads `PIET_MAX_STEPS` and `PIET_TRACE`. Unset or unparsable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        let max_steps = std::env::var("PIET_MAX_STEPS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&n| n > 0);
        Self {
            max_steps,
            trace: env_bool("PIET_TRACE", false),
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "on"))
        .unwrap_or(default)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    Continued,
    Halted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A command fired. `args` holds the values it popped, bottom first,
    /// or the value it pushed for `push` and the input commands; it is
    /// empty when `skipped` is set.
    Command {
        op: Opcode,
        args: Vec<Value>,
        skipped: Option<Invalid>,
    },
    Slide,
    Halt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    pub step: u64,
    pub from: Position,
    pub to: Position,
    pub event: TraceEvent,
    /// DP and CC after the step.
    pub dp: Direction,
    pub cc: CodelChooser,
    pub stack_depth: usize,
}

#[derive(Debug, Serialize)]
pub struct VmOutcome {
    pub steps: u64,
    pub stack: Vec<Value>,
    pub trace: Vec<TraceStep>,
}

/// Read-only view of the execution state between steps.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub position: Position,
    pub dp: Direction,
    pub cc: CodelChooser,
    pub stack: &'a [Value],
    pub steps: u64,
    pub halted: bool,
}

/// The execution loop. Owns the whole interpreter state; the grid is shared
/// read-only so observers can hold on to it.
pub struct Vm<I: InputProvider, O: OutputProvider> {
    cfg: VmConfig,
    grid: Arc<Grid>,
    navigator: Navigator,
    stack: Stack,
    position: Position,
    steps: u64,
    halted: bool,
    input: I,
    output: O,
    trace: Vec<TraceStep>,
}

impl<I: InputProvider, O: OutputProvider> Vm<I, O> {
    pub fn new(cfg: VmConfig, grid: impl Into<Arc<Grid>>, input: I, output: O) -> Self {
        Self {
            cfg,
            grid: grid.into(),
            navigator: Navigator::default(),
            stack: Stack::new(),
            position: Position::ORIGIN,
            steps: 0,
            halted: false,
            input,
            output,
            trace: Vec::new(),
        }
    }

    /// Swaps in a new program and starts over from the top-left codel.
    pub fn replace_grid(&mut self, grid: impl Into<Arc<Grid>>) {
        self.grid = grid.into();
        self.reset();
    }

    /// Back to the initial state: DP right, CC left, empty stack.
    pub fn reset(&mut self) {
        self.navigator = Navigator::default();
        self.stack = Stack::new();
        self.position = Position::ORIGIN;
        self.steps = 0;
        self.halted = false;
        self.trace.clear();
    }

    fn charge(&mut self) -> Result<(), ExecError> {
        if let Some(limit) = self.cfg.max_steps {
            if self.steps >= limit {
                return Err(ExecError::StepLimit(limit));
            }
        }
        self.steps += 1;
        Ok(())
    }

    /// Advances by one block transition. Once the program is stuck every
    /// further call returns `Halted` without doing anything.
    pub fn step(&mut self) -> Result<StepOutcome, ExecError> {
        if self.halted {
            return Ok(StepOutcome::Halted);
        }
        self.charge()?;

        let from = self.position;
        let block = Block::locate(&self.grid, from);
        let event = match self.navigator.advance(&self.grid, &block) {
            Transition::Stuck => {
                self.halted = true;
                info!(
                    steps = self.steps,
                    stack_depth = self.stack.len(),
                    "program halted"
                );
                TraceEvent::Halt
            }
            Transition::Slide { to, .. } => {
                self.position = to;
                TraceEvent::Slide
            }
            Transition::Enter { to, .. } => {
                let op = Opcode::for_transition(block.color(), self.grid[to])
                    .unwrap_or(Opcode::Nop);
                let operands = self.operands(op);
                let skipped = self.execute(op, &block)?.err();
                let args = match (skipped, op) {
                    (Some(reason), _) => {
                        debug!(op = op.name(), %reason, "command skipped");
                        Vec::new()
                    }
                    (None, Opcode::Push | Opcode::InInt | Opcode::InChar) => {
                        self.stack.top().cloned().into_iter().collect()
                    }
                    (None, _) => operands,
                };
                self.position = to;
                TraceEvent::Command { op, args, skipped }
            }
        };

        trace!(
            step = self.steps,
            %from,
            to = %self.position,
            dp = %self.navigator.dp(),
            cc = %self.navigator.cc(),
            ?event,
            "step"
        );
        if self.cfg.trace {
            self.trace.push(TraceStep {
                step: self.steps,
                from,
                to: self.position,
                event,
                dp: self.navigator.dp(),
                cc: self.navigator.cc(),
                stack_depth: self.stack.len(),
            });
        }

        Ok(if self.halted {
            StepOutcome::Halted
        } else {
            StepOutcome::Continued
        })
    }

    /// Steps until the program is stuck.
    pub fn run(&mut self) -> Result<VmOutcome, ExecError> {
        while self.step()? == StepOutcome::Continued {}
        self.output.flush()?;
        Ok(VmOutcome {
            steps: self.steps,
            stack: self.stack.values().to_vec(),
            trace: std::mem::take(&mut self.trace),
        })
    }

    // Values `op` would pop, bottom first.
    fn operands(&self, op: Opcode) -> Vec<Value> {
        let values = self.stack.values();
        values[values.len().saturating_sub(op.arity())..].to_vec()
    }

    /// Runs one command. The outer error is fatal; the inner one marks a
    /// command that was skipped and left the stack untouched.
    fn execute(&mut self, op: Opcode, exited: &Block) -> Result<Result<(), Invalid>, ExecError> {
        let stack = &mut self.stack;
        Ok(match op {
            Opcode::Nop => Ok(()),
            Opcode::Push => {
                stack.push(exited.size());
                Ok(())
            }
            Opcode::Pop => stack.pop().map(drop),
            Opcode::Add => stack.add(),
            Opcode::Subtract => stack.subtract(),
            Opcode::Multiply => stack.multiply(),
            Opcode::Divide => stack.divide(),
            Opcode::Mod => stack.modulo(),
            Opcode::Not => stack.not(),
            Opcode::Greater => stack.greater(),
            Opcode::Pointer => stack.pop_turns().map(|turns| self.navigator.turn(turns)),
            Opcode::Switch => stack.pop_toggles().map(|flip| {
                if flip {
                    self.navigator.toggle();
                }
            }),
            Opcode::Duplicate => stack.duplicate(),
            Opcode::Roll => stack.roll(),
            Opcode::InInt => {
                self.output.flush()?;
                let line = self.input.read_line()?;
                stack.in_int(line.as_deref())
            }
            Opcode::InChar => {
                self.output.flush()?;
                let line = self.input.read_line()?;
                stack.in_char(line.as_deref())
            }
            Opcode::OutInt => match stack.pop() {
                Ok(v) => {
                    self.output.write_str(&v.to_string())?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Opcode::OutChar => match stack.pop_char() {
                Ok(c) => {
                    self.output.write_str(c.encode_utf8(&mut [0; 4]))?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
        })
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn dp(&self) -> Direction {
        self.navigator.dp()
    }

    pub fn cc(&self) -> CodelChooser {
        self.navigator.cc()
    }

    pub fn stack(&self) -> &[Value] {
        self.stack.values()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn trace(&self) -> &[TraceStep] {
        &self.trace
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            position: self.position,
            dp: self.navigator.dp(),
            cc: self.navigator.cc(),
            stack: self.stack.values(),
            steps: self.steps,
            halted: self.halted,
        }
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}
