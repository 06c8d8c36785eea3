//! Single-pass translation of source lines into MEM image lines.

use std::fmt;

use crate::encoder::encode;
use crate::error::{AllocError, Error, Result};
use crate::isa::{strip_comment, InstructionSet};
use crate::memory::LocationAllocator;

/// Which source dialect a run accepts.
#[derive(Debug, Clone, Copy)]
pub enum Profile<'a> {
    /// Mnemonic instructions matched against an instruction set.
    Assembly(&'a InstructionSet),
    /// Data lines and relocation directives only.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Blank,
    /// Text following the `//` marker.
    Comment(String),
    Word { address: u64, payload: String },
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLine::Blank => Ok(()),
            OutputLine::Comment(text) => write!(f, "// {text}"),
            OutputLine::Word { address, payload } => write!(f, "{address:03}: {payload}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translation {
    pub lines: Vec<OutputLine>,
}

impl Translation {
    pub fn words(&self) -> impl Iterator<Item = (u64, &str)> + '_ {
        self.lines.iter().filter_map(|l| match l {
            OutputLine::Word { address, payload } => Some((*address, payload.as_str())),
            _ => None,
        })
    }

    /// The image text, one `\n` after every line.
    pub fn render(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }
}

pub struct Translator<'a> {
    profile: Profile<'a>,
}

impl<'a> Translator<'a> {
    pub fn new(profile: Profile<'a>) -> Self {
        Self { profile }
    }

    pub fn assembly(set: &'a InstructionSet) -> Self {
        Self::new(Profile::Assembly(set))
    }

    pub fn raw() -> Self {
        Self::new(Profile::Raw)
    }

    pub fn translate_str(&self, source: &str) -> Result<Translation> {
        self.translate(source.lines())
    }

    /// Translates `lines` with a fresh allocator. The first failing line
    /// aborts the whole run.
    pub fn translate<I, S>(&self, lines: I) -> Result<Translation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pass = Pass { alloc: LocationAllocator::new(), out: Vec::new() };
        for (idx, raw) in lines.into_iter().enumerate() {
            self.line(&mut pass, idx + 1, raw.as_ref().trim())?;
        }
        pass.out.push(OutputLine::Blank);
        Ok(Translation { lines: pass.out })
    }

    fn line(&self, pass: &mut Pass, n: usize, line: &str) -> Result<()> {
        if line.is_empty() {
            pass.out.push(OutputLine::Blank);
        } else if let Some(data) = line.strip_prefix(':') {
            // inline comments in data are kept, turned into target comments
            let payload = data.trim().replacen('#', "//", 1);
            pass.word(n, line, payload)?;
        } else if let Some(text) = line.strip_prefix('#') {
            pass.out.push(OutputLine::Comment(defuse_colons(text)));
        } else {
            let code = strip_comment(line).trim();
            if let Some(digits) = relocation_digits(code) {
                let start = digits.parse::<u64>().map_err(|_| Error::AddressRange {
                    line: n,
                    text: line.to_string(),
                })?;
                tracing::debug!(line = n, start, "relocation directive");
                pass.out.push(OutputLine::Comment(defuse_colons(line)));
                pass.alloc.set_start(start);
                return Ok(());
            }
            match self.profile {
                Profile::Assembly(set) => {
                    pass.out.push(OutputLine::Comment(line.to_string()));
                    let values = set.find(code).ok_or_else(|| Error::Instruction {
                        line: n,
                        text: code.to_string(),
                        suggestion: set.suggest(code).map(|m| m.template.clone()),
                    })?;
                    tracing::debug!(line = n, opcode = values.opcode, "matched");
                    let words = encode(&values).map_err(|source| Error::Encoding { line: n, source })?;
                    for word in words {
                        pass.word(n, line, word)?;
                    }
                }
                Profile::Raw => {
                    return Err(Error::Parse { line: n, text: line.to_string() });
                }
            }
        }
        Ok(())
    }
}

struct Pass {
    alloc: LocationAllocator,
    out: Vec<OutputLine>,
}

impl Pass {
    fn word(&mut self, n: usize, line: &str, payload: String) -> Result<()> {
        let address = self.alloc.get_next().map_err(|e| match e {
            AllocError::Overlap(source) => Error::Overlap { line: n, source },
            AllocError::Exhausted => Error::AddressRange { line: n, text: line.to_string() },
        })?;
        self.out.push(OutputLine::Word { address, payload });
        Ok(())
    }
}

/// The simulator's parser chokes on `:` inside comments.
fn defuse_colons(text: &str) -> String {
    text.replace(':', ".")
}

/// Leading digits of a `<digits>:` directive.
fn relocation_digits(code: &str) -> Option<&str> {
    let len = code.bytes().take_while(u8::is_ascii_digit).count();
    if len > 0 && code[len..].starts_with(':') {
        Some(&code[..len])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relocation_needs_digits_then_colon() {
        assert_eq!(relocation_digits("016:"), Some("016"));
        assert_eq!(relocation_digits("16: ADD 1 2 3"), Some("16"));
        assert_eq!(relocation_digits("16 :"), None);
        assert_eq!(relocation_digits(":"), None);
        assert_eq!(relocation_digits("ADD 1"), None);
    }

    #[test]
    fn output_line_display() {
        assert_eq!(OutputLine::Blank.to_string(), "");
        assert_eq!(OutputLine::Comment("ADD 1 2 3".into()).to_string(), "// ADD 1 2 3");
        assert_eq!(OutputLine::Word { address: 7, payload: "42".into() }.to_string(), "007: 42");
        assert_eq!(OutputLine::Word { address: 1234, payload: "1".into() }.to_string(), "1234: 1");
    }
}
