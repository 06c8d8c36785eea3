use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

/// Placeholder names accepted in instruction templates, in encoding order.
pub const FIELD_NAMES: [&str; 5] = ["ri", "rj", "rk", "const4", "const8"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Ri,
    Rj,
    Rk,
    Const4,
    Const8,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::Ri, Field::Rj, Field::Rk, Field::Const4, Field::Const8];

    pub fn name(self) -> &'static str {
        match self {
            Field::Ri => "ri",
            Field::Rj => "rj",
            Field::Rk => "rk",
            Field::Const4 => "const4",
            Field::Const8 => "const8",
        }
    }

    /// Registers take unsigned digits only; constants may carry a leading `-`.
    pub fn is_signed(self) -> bool {
        !self.name().starts_with('r')
    }

    pub fn flag(self) -> FieldSet {
        match self {
            Field::Ri => FieldSet::RI,
            Field::Rj => FieldSet::RJ,
            Field::Rk => FieldSet::RK,
            Field::Const4 => FieldSet::CONST4,
            Field::Const8 => FieldSet::CONST8,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL.into_iter().find(|f| f.name() == s).ok_or(())
    }
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSet: u8 {
const RI = 1 << 0;
const RJ = 1 << 1;
const RK = 1 << 2;
const CONST4 = 1 << 3;
const CONST8 = 1 << 4;
// const8 occupies the whole second word
const SECOND_WORD = Self::RJ.bits() | Self::RK.bits() | Self::CONST4.bits();
}
}

/// Values captured by a successful match, plus the matcher's opcode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldValues {
    pub opcode: u32,
    values: Vec<(Field, i64)>,
}

impl FieldValues {
    pub fn new(opcode: u32) -> Self {
        Self { opcode, values: Vec::new() }
    }

    /// Sets `field`, replacing any earlier value.
    pub fn with(mut self, field: Field, value: i64) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: Field, value: i64) {
        match self.values.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.values.push((field, value)),
        }
    }

    pub fn get(&self, field: Field) -> Option<i64> {
        self.values.iter().find(|(f, _)| *f == field).map(|&(_, v)| v)
    }

    /// Absent fields encode as zero.
    pub fn get_or_zero(&self, field: Field) -> i64 {
        self.get(field).unwrap_or(0)
    }

    pub fn present(&self) -> FieldSet {
        self.values.iter().fold(FieldSet::empty(), |acc, (f, _)| acc | f.flag())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, i64)> + '_ {
        self.values.iter().copied()
    }
}
