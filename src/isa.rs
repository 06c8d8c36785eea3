//! Instruction-set definitions.
//!
//! Config text holds one definition per line, `<opcode>: <token> <token> ...`,
//! where each token is a literal keyword or a `{field}` placeholder. `#` starts
//! a comment. Definition order is match priority.

use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, Error, Result};
use crate::field::FieldValues;
use crate::pattern::Pattern;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionMatcher {
    pub opcode: u32,
    /// First template token, uppercased.
    pub name: String,
    /// Template tokens joined by single spaces, for diagnostics.
    pub template: String,
    pattern: Pattern,
}

impl InstructionMatcher {
    pub fn new<S: AsRef<str>>(opcode: u32, tokens: &[S], line: usize) -> Result<Self, ConfigError> {
        let first = tokens
            .first()
            .ok_or(ConfigError::MissingMnemonic { line, opcode })?;
        Ok(Self {
            opcode,
            name: first.as_ref().to_uppercase(),
            template: tokens.iter().map(|t| t.as_ref()).collect::<Vec<&str>>().join(" "),
            pattern: Pattern::compile(tokens, line)?,
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Matches a comment-stripped, trimmed source line.
    pub fn matches(&self, line: &str) -> Option<FieldValues> {
        let captures = self.pattern.captures(line)?;
        Some(
            captures
                .into_iter()
                .fold(FieldValues::new(self.opcode), |v, (f, x)| v.with(f, x)),
        )
    }
}

/// Ordered list of matchers; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionSet {
    matchers: Vec<InstructionMatcher>,
}

impl InstructionSet {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut matchers = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let def = strip_comment(raw).trim();
            if def.is_empty() {
                continue;
            }
            let mut tokens = def.split_whitespace();
            let head = tokens.next().unwrap_or_default();
            let opcode = head.strip_suffix(':').ok_or_else(|| ConfigError::InvalidSyntax {
                line,
                text: def.to_string(),
            })?;
            let opcode = opcode.parse::<u32>().map_err(|_| ConfigError::InvalidOpcode {
                line,
                opcode: opcode.to_string(),
            })?;
            let tokens: Vec<&str> = tokens.collect();
            matchers.push(InstructionMatcher::new(opcode, &tokens, line)?);
        }
        Ok(Self { matchers })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let set = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), matchers = set.len(), "loaded instruction set");
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstructionMatcher> {
        self.matchers.iter()
    }

    /// First matcher, in definition order, that accepts `line`.
    pub fn find(&self, line: &str) -> Option<FieldValues> {
        self.matchers.iter().find_map(|m| m.matches(line))
    }

    /// Best-effort hint for a line nothing matched: a matcher whose name
    /// prefixes the line, else one whose name extends the line's mnemonic.
    pub fn suggest(&self, line: &str) -> Option<&InstructionMatcher> {
        let upper = line.to_uppercase();
        let mnemonic = upper.split_whitespace().next().unwrap_or_default();
        self.matchers
            .iter()
            .find(|m| upper.starts_with(&m.name))
            .or_else(|| {
                if mnemonic.is_empty() {
                    return None;
                }
                self.matchers.iter().find(|m| m.name.starts_with(mnemonic))
            })
    }
}

impl FromStr for InstructionSet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a InstructionSet {
    type Item = &'a InstructionMatcher;
    type IntoIter = std::slice::Iter<'a, InstructionMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Drops everything from the first `#`.
pub(crate) fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(head, _)| head)
}
