use std::path::PathBuf;

use crate::field::FIELD_NAMES;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Problems found while compiling an instruction-set config.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config line {line}: invalid syntax: {text:?}")]
    InvalidSyntax { line: usize, text: String },
    #[error("config line {line}: invalid opcode {opcode:?}")]
    InvalidOpcode { line: usize, opcode: String },
    #[error("config line {line}: opcode {opcode} has no mnemonic")]
    MissingMnemonic { line: usize, opcode: u32 },
    #[error("config line {line}: {field} is undefined. It should be one of {{{}}}", FIELD_NAMES.join(", "))]
    UnknownField { line: usize, field: String },
    #[error("config line {line}: field {field} is used more than once")]
    DuplicateField { line: usize, field: String },
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    #[error("an instruction cannot have both const8 and any of rj, rk, const4")]
    Const8Conflict,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("memory regions overlap at address {address:03}")]
pub struct OverlapError {
    pub address: u64,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    #[error(transparent)]
    Overlap(#[from] OverlapError),
    #[error("no address left after {}", u64::MAX)]
    Exhausted,
}

/// Error category, used where only the class of a failure matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Instruction,
    Encoding,
    Overlap,
    Range,
    Parse,
    Io,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("line {line}: {}", no_match_message(.text, .suggestion.as_deref()))]
    Instruction {
        line: usize,
        text: String,
        suggestion: Option<String>,
    },
    #[error("line {line}: {source}")]
    Encoding {
        line: usize,
        #[source]
        source: EncodingError,
    },
    #[error("line {line}: {source}")]
    Overlap {
        line: usize,
        #[source]
        source: OverlapError,
    },
    #[error("line {line}: address out of range: \"{text}\"")]
    AddressRange { line: usize, text: String },
    #[error("cannot parse line {line}: \"{text}\"")]
    Parse { line: usize, text: String },
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn no_match_message(text: &str, suggestion: Option<&str>) -> String {
    let msg = format!("\"{text}\" does not match any instruction.");
    match suggestion {
        Some(template) => format!("{msg} Did you want to use \"{template}\"?"),
        None => msg,
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Instruction { .. } => ErrorKind::Instruction,
            Error::Encoding { .. } => ErrorKind::Encoding,
            Error::Overlap { .. } => ErrorKind::Overlap,
            Error::AddressRange { .. } => ErrorKind::Range,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
