use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Commands, keyed by `3 * hue_shift + lightness_shift` between the block
/// left and the block entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    Nop = 0,        // (0, 0) same color
    Push = 1,       // (0, 1) push size of the block left
    Pop = 2,        // (0, 2)
    Add = 3,        // (1, 0) pop a,b -> push b+a
    Subtract = 4,   // (1, 1) pop a,b -> push b-a
    Multiply = 5,   // (1, 2) pop a,b -> push b*a
    Divide = 6,     // (2, 0) pop a,b -> push floor(b/a)
    Mod = 7,        // (2, 1) pop a,b -> push b mod |a|
    Not = 8,        // (2, 2) pop v -> push v==0
    Greater = 9,    // (3, 0) pop a,b -> push b>a
    Pointer = 10,   // (3, 1) pop n -> turn DP n times clockwise
    Switch = 11,    // (3, 2) pop n -> toggle CC |n| times
    Duplicate = 12, // (4, 0)
    Roll = 13,      // (4, 1) pop count, depth
    InInt = 14,     // (4, 2)
    InChar = 15,    // (5, 0)
    OutInt = 16,    // (5, 1)
    OutChar = 17,   // (5, 2)
}

impl Opcode {
    /// Command for a `(hue shift, lightness shift)` pair. `None` when either
    /// shift is out of range.
    pub fn from_shift(hue_shift: u8, lightness_shift: u8) -> Option<Self> {
        if hue_shift >= 6 || lightness_shift >= 3 {
            return None;
        }
        Self::try_from(hue_shift * 3 + lightness_shift).ok()
    }

    /// Command fired when moving from a block of color `from` into one of
    /// color `to`. `None` when either side is black or white.
    pub fn for_transition(from: Color, to: Color) -> Option<Self> {
        from.shift_to(to)
            .and_then(|(hue, lightness)| Self::from_shift(hue, lightness))
    }

    pub const fn shift(self) -> (u8, u8) {
        let code = self as u8;
        (code / 3, code % 3)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Push => "push",
            Opcode::Pop => "pop",
            Opcode::Add => "add",
            Opcode::Subtract => "subtract",
            Opcode::Multiply => "multiply",
            Opcode::Divide => "divide",
            Opcode::Mod => "mod",
            Opcode::Not => "not",
            Opcode::Greater => "greater",
            Opcode::Pointer => "pointer",
            Opcode::Switch => "switch",
            Opcode::Duplicate => "duplicate",
            Opcode::Roll => "roll",
            Opcode::InInt => "in_int",
            Opcode::InChar => "in_char",
            Opcode::OutInt => "out_int",
            Opcode::OutChar => "out_char",
        }
    }

    /// Operands popped before the command can act.
    pub const fn arity(self) -> usize {
        match self {
            Opcode::Nop | Opcode::Push | Opcode::InInt | Opcode::InChar => 0,
            Opcode::Pop
            | Opcode::Not
            | Opcode::Pointer
            | Opcode::Switch
            | Opcode::Duplicate
            | Opcode::OutInt
            | Opcode::OutChar => 1,
            Opcode::Add
            | Opcode::Subtract
            | Opcode::Multiply
            | Opcode::Divide
            | Opcode::Mod
            | Opcode::Greater
            | Opcode::Roll => 2,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = ();
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        use Opcode::*;
        Ok(match v {
            0 => Nop,
            1 => Push,
            2 => Pop,
            3 => Add,
            4 => Subtract,
            5 => Multiply,
            6 => Divide,
            7 => Mod,
            8 => Not,
            9 => Greater,
            10 => Pointer,
            11 => Switch,
            12 => Duplicate,
            13 => Roll,
            14 => InInt,
            15 => InChar,
            16 => OutInt,
            17 => OutChar,
            _ => return Err(()),
        })
    }
}
