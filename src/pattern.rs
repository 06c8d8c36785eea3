//! Structural matchers compiled from instruction templates.
//!
//! A template such as `LD R{ri}, [{const8}]` is split into segments: literal
//! text (`LD`, `R`, `,`, `[`, `]`), field captures (`ri`, `const8`) and the
//! whitespace gaps separating the original tokens. Matching walks the input
//! once, left to right, with no backtracking. A field takes the longest run
//! of digits available, so two adjacent placeholders such as `{ri}{rj}` can
//! never both be satisfied and the template matches nothing.

use crate::error::ConfigError;
use crate::field::{Field, FieldSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Exact text, compared ASCII case-insensitively.
    Literal(String),
    /// One or more whitespace characters.
    Gap,
    Field(Field),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
    fields: FieldSet,
}

impl Pattern {
    /// Compiles whitespace-separated template tokens. `line` is only used for
    /// error reporting.
    pub fn compile<S: AsRef<str>>(tokens: &[S], line: usize) -> Result<Self, ConfigError> {
        let mut segments = Vec::new();
        let mut fields = FieldSet::empty();
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                segments.push(Segment::Gap);
            }
            split_token(token.as_ref(), line, &mut fields, &mut segments)?;
        }
        Ok(Self { segments, fields })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn fields(&self) -> FieldSet {
        self.fields
    }

    /// Matches `line` from its start. Text left over once every segment is
    /// consumed is ignored. Captures are returned in template order.
    pub fn captures(&self, line: &str) -> Option<Vec<(Field, i64)>> {
        let mut rest = line;
        let mut out = Vec::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(lit) => {
                    let head = rest.get(..lit.len())?;
                    if !head.eq_ignore_ascii_case(lit) {
                        return None;
                    }
                    rest = &rest[lit.len()..];
                }
                Segment::Gap => {
                    let trimmed = rest.trim_start();
                    if trimmed.len() == rest.len() {
                        return None;
                    }
                    rest = trimmed;
                }
                Segment::Field(field) => {
                    let (value, tail) = take_number(rest, field.is_signed())?;
                    out.push((*field, value));
                    rest = tail;
                }
            }
        }
        Some(out)
    }
}

fn split_token(
    token: &str,
    line: usize,
    seen: &mut FieldSet,
    out: &mut Vec<Segment>,
) -> Result<(), ConfigError> {
    let mut literal = String::new();
    let mut rest = token;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(0) => {
                // `{}` names nothing and stays literal
                literal.push_str(&rest[..open + 2]);
                rest = &after[1..];
            }
            Some(close) => {
                literal.push_str(&rest[..open]);
                if !literal.is_empty() {
                    out.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let name = &after[..close];
                let field = name.parse::<Field>().map_err(|_| ConfigError::UnknownField {
                    line,
                    field: name.to_string(),
                })?;
                if seen.contains(field.flag()) {
                    return Err(ConfigError::DuplicateField { line, field: name.to_string() });
                }
                seen.insert(field.flag());
                out.push(Segment::Field(field));
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        out.push(Segment::Literal(literal));
    }
    Ok(())
}

/// Takes a decimal number off the front of `s`, with an optional `-` when
/// `signed`. Values that do not fit an `i64` do not match.
fn take_number(s: &str, signed: bool) -> Option<(i64, &str)> {
    let sign = usize::from(signed && s.starts_with('-'));
    let digits = s[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let end = sign + digits;
    let value = s[..end].parse::<i64>().ok()?;
    Some((value, &s[end..]))
}
