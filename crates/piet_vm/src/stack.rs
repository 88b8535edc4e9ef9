//! The integer stack and the semantics of every stack command.
//!
//! A command that cannot act (too few operands, division by zero, bad
//! input, ...) reports an [`Invalid`] reason and leaves the stack exactly as
//! it found it. Callers treat that as a no-op, never as a failure.

use crate::types::Value;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::Serialize;

/// Why a command was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum Invalid {
    #[error("stack underflow: {needed} operand(s) needed, {depth} present")]
    Underflow { needed: usize, depth: usize },
    #[error("division by zero")]
    DivideByZero,
    #[error("negative roll depth")]
    NegativeDepth,
    #[error("roll depth exceeds stack")]
    DepthExceedsStack,
    #[error("malformed input")]
    MalformedInput,
    #[error("value is not a character code point")]
    InvalidCodePoint,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom first, top last.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn top(&self) -> Option<&Value> {
        self.values.last()
    }

    pub fn push(&mut self, v: impl Into<Value>) {
        self.values.push(v.into());
    }

    fn require(&self, needed: usize) -> Result<(), Invalid> {
        if self.values.len() < needed {
            return Err(Invalid::Underflow {
                needed,
                depth: self.values.len(),
            });
        }
        Ok(())
    }

    // Top two values, top first.
    fn peek2(&self) -> Result<(&Value, &Value), Invalid> {
        self.require(2)?;
        let n = self.values.len();
        Ok((&self.values[n - 1], &self.values[n - 2]))
    }

    pub fn pop(&mut self) -> Result<Value, Invalid> {
        self.values.pop().ok_or(Invalid::Underflow {
            needed: 1,
            depth: 0,
        })
    }

    /// Pops `a` (top) then `b` and pushes `f(b, a)`.
    fn binary(&mut self, f: impl FnOnce(Value, Value) -> Value) -> Result<(), Invalid> {
        self.require(2)?;
        let a = self.pop()?;
        let b = self.pop()?;
        self.values.push(f(b, a));
        Ok(())
    }

    pub fn add(&mut self) -> Result<(), Invalid> {
        self.binary(|b, a| b + a)
    }

    pub fn subtract(&mut self) -> Result<(), Invalid> {
        self.binary(|b, a| b - a)
    }

    pub fn multiply(&mut self) -> Result<(), Invalid> {
        self.binary(|b, a| b * a)
    }

    /// Floored division, rounding toward negative infinity.
    pub fn divide(&mut self) -> Result<(), Invalid> {
        if self.peek2()?.0.is_zero() {
            return Err(Invalid::DivideByZero);
        }
        self.binary(|b, a| b.div_floor(&a))
    }

    /// `b mod |a|`; never negative.
    pub fn modulo(&mut self) -> Result<(), Invalid> {
        if self.peek2()?.0.is_zero() {
            return Err(Invalid::DivideByZero);
        }
        self.binary(|b, a| b.mod_floor(&a.abs()))
    }

    pub fn not(&mut self) -> Result<(), Invalid> {
        let v = self.pop()?;
        self.push(u8::from(v.is_zero()));
        Ok(())
    }

    pub fn greater(&mut self) -> Result<(), Invalid> {
        self.binary(|b, a| Value::from(u8::from(b > a)))
    }

    /// Pops `n` and returns the equivalent number of clockwise quarter
    /// turns (`n mod 4`), so negative values turn counterclockwise.
    pub fn pop_turns(&mut self) -> Result<u8, Invalid> {
        let n = self.pop()?;
        Ok(n.mod_floor(&Value::from(4)).to_u8().unwrap_or(0))
    }

    /// Pops `n`; true when toggling `|n|` times flips the chooser.
    pub fn pop_toggles(&mut self) -> Result<bool, Invalid> {
        Ok(self.pop()?.is_odd())
    }

    pub fn duplicate(&mut self) -> Result<(), Invalid> {
        let top = self.top().cloned().ok_or(Invalid::Underflow {
            needed: 1,
            depth: 0,
        })?;
        self.values.push(top);
        Ok(())
    }

    /// Pops `count` then `depth` and rotates the top `depth` values by
    /// `count` positions: positive counts bury the top value, negative
    /// counts bring buried values up.
    ///
    /// Depths of 0 and 1 consume the operands and change nothing else.
    pub fn roll(&mut self) -> Result<(), Invalid> {
        let (count, depth) = self.peek2()?;
        if depth.is_negative() {
            return Err(Invalid::NegativeDepth);
        }
        let below = self.values.len() - 2;
        let depth = match depth.to_usize() {
            Some(d) if d <= 1 => {
                self.values.truncate(below);
                return Ok(());
            }
            Some(d) if d <= below => d,
            _ => return Err(Invalid::DepthExceedsStack),
        };
        let shift = count
            .mod_floor(&Value::from(depth))
            .to_usize()
            .unwrap_or(0);
        self.values.truncate(below);
        self.values[below - depth..].rotate_right(shift);
        Ok(())
    }

    /// Pushes the integer read from one input line (terminator already
    /// stripped). `None` means the stream was exhausted.
    pub fn in_int(&mut self, line: Option<&str>) -> Result<(), Invalid> {
        let v = line.and_then(parse_integer).ok_or(Invalid::MalformedInput)?;
        self.values.push(v);
        Ok(())
    }

    /// Pushes the code point of a line holding exactly one character.
    pub fn in_char(&mut self, line: Option<&str>) -> Result<(), Invalid> {
        let mut chars = line.ok_or(Invalid::MalformedInput)?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                self.push(u32::from(c));
                Ok(())
            }
            _ => Err(Invalid::MalformedInput),
        }
    }

    /// Pops the top value as a character. A value that is not a Unicode
    /// scalar stays on the stack.
    pub fn pop_char(&mut self) -> Result<char, Invalid> {
        let top = self.top().ok_or(Invalid::Underflow {
            needed: 1,
            depth: 0,
        })?;
        let c = top
            .to_u32()
            .and_then(char::from_u32)
            .ok_or(Invalid::InvalidCodePoint)?;
        self.values.pop();
        Ok(c)
    }
}

impl From<Vec<Value>> for Stack {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

/// Optional sign followed by one or more ASCII digits, nothing else.
pub fn parse_integer(text: &str) -> Option<Value> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = Value::parse_bytes(digits.as_bytes(), 10)?;
    Some(if negative { -magnitude } else { magnitude })
}
