//! One complete translation run: read, translate, write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::isa::InstructionSet;
use crate::translate::Translator;

/// Default extension of produced images.
pub const OUTPUT_EXTENSION: &str = "mem";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ProfileConfig {
    Assembly { config: PathBuf },
    Raw,
}

/// Everything a run needs, built once by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub profile: ProfileConfig,
    pub output: Option<PathBuf>,
    pub echo: bool,
    pub watch: bool,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, profile: ProfileConfig) -> Self {
        Self { input: input.into(), profile, output: None, echo: false, watch: false }
    }

    /// The explicit output path, else the input with a `.mem` extension.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension(OUTPUT_EXTENSION))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    pub lines: usize,
    pub words: usize,
    pub first_address: Option<u64>,
    pub last_address: Option<u64>,
}

/// Runs one translation from scratch. The instruction set is recompiled on
/// every call so edits to it are seen by watch mode.
pub fn run(cfg: &RunConfig) -> Result<RunSummary> {
    let set = match &cfg.profile {
        ProfileConfig::Assembly { config } => Some(InstructionSet::load(config)?),
        ProfileConfig::Raw => None,
    };
    let translator = match &set {
        Some(set) => Translator::assembly(set),
        None => Translator::raw(),
    };

    let source = fs::read_to_string(&cfg.input).map_err(|e| Error::io(&cfg.input, e))?;
    let translation = translator.translate_str(&source)?;

    let lines: Vec<String> = translation
        .lines
        .iter()
        .map(|l| sanitize_ascii(&l.to_string()))
        .collect();
    let mut text = String::new();
    for line in &lines {
        text.push_str(line);
        text.push('\n');
    }

    let output = cfg.output_path();
    replace_file(&output, text.as_bytes())?;
    if cfg.echo {
        for line in &lines {
            println!("{line}");
        }
    }

    let addresses: Vec<u64> = translation.words().map(|(a, _)| a).collect();
    let summary = RunSummary {
        output,
        lines: lines.len(),
        words: addresses.len(),
        first_address: addresses.iter().min().copied(),
        last_address: addresses.iter().max().copied(),
    };
    tracing::info!(output = %summary.output.display(), words = summary.words, "translated");
    Ok(summary)
}

/// Drops every non-ASCII character.
pub fn sanitize_ascii(line: &str) -> String {
    line.chars().filter(char::is_ascii).collect()
}

/// Writes to a sibling temp file, then renames it over `path`.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    let mut file = fs::File::create(&tmp).map_err(|e| Error::io(&tmp, e))?;
    file.write_all(bytes).map_err(|e| Error::io(&tmp, e))?;
    file.sync_all().map_err(|e| Error::io(&tmp, e))?;
    drop(file);
    fs::rename(&tmp, path).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_defaults_to_mem_extension() {
        let cfg = RunConfig::new("prog/test.asm", ProfileConfig::Raw);
        assert_eq!(cfg.output_path(), PathBuf::from("prog/test.mem"));
        let cfg = RunConfig::new("noext", ProfileConfig::Raw);
        assert_eq!(cfg.output_path(), PathBuf::from("noext.mem"));
        let cfg = RunConfig { output: Some("out.txt".into()), ..RunConfig::new("a.asm", ProfileConfig::Raw) };
        assert_eq!(cfg.output_path(), PathBuf::from("out.txt"));
    }

    #[test]
    fn sanitize_drops_non_ascii() {
        assert_eq!(sanitize_ascii("// čćž komentar ✓"), "//  komentar ");
        assert_eq!(sanitize_ascii("000: 1"), "000: 1");
    }
}
