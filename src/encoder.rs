use crate::error::EncodingError;
use crate::field::{Field, FieldSet, FieldValues};

pub const OPCODE_WIDTH: usize = 6;
pub const REG_WIDTH: usize = 2;
pub const CONST4_WIDTH: usize = 4;

/// Packs an instruction into its two output words.
///
/// Word 1 is `opcode ri`; word 2 is `rj rk const4`, or the decimal text of
/// `const8` when that field is present. Missing fields encode as zero.
pub fn encode(values: &FieldValues) -> Result<[String; 2], EncodingError> {
    let present = values.present();
    if present.contains(FieldSet::CONST8) && present.intersects(FieldSet::SECOND_WORD) {
        return Err(EncodingError::Const8Conflict);
    }

    let first = format!(
        "{} {}",
        binary(i64::from(values.opcode), OPCODE_WIDTH),
        binary(values.get_or_zero(Field::Ri), REG_WIDTH)
    );
    let second = match values.get(Field::Const8) {
        // full byte literal, read directly by the simulator's loader
        Some(byte) => byte.to_string(),
        None => format!(
            "{} {} {}",
            binary(values.get_or_zero(Field::Rj), REG_WIDTH),
            binary(values.get_or_zero(Field::Rk), REG_WIDTH),
            binary(values.get_or_zero(Field::Const4), CONST4_WIDTH)
        ),
    };
    Ok([first, second])
}

/// Binary digits zero-padded to at least `width` characters, sign included.
/// Negative values are written as `-` and the magnitude. Never truncates.
pub fn binary(value: i64, width: usize) -> String {
    let digits = format!("{:b}", value.unsigned_abs());
    if value < 0 {
        format!("-{:0>pad$}", digits, pad = width.saturating_sub(1))
    } else {
        format!("{:0>width$}", digits)
    }
}
