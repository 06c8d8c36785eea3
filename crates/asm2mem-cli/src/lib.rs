use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use clap::{Args, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use asm2mem_rs::watch::{watch, POLL_INTERVAL};
use asm2mem_rs::{run, ProfileConfig, RunConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Flags shared by both tools.
#[derive(Args, Debug)]
pub struct CommonOpts {
    /// Input source path
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Output MEM file path (default: input with a .mem extension)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Print output to the console
    #[arg(short, long)]
    pub print: bool,
    /// Watch the input file for changes and translate it whenever it is changed
    #[arg(short, long)]
    pub watch: bool,
    /// Run summary format (json prints a summary after one-shot runs)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CommonOpts {
    pub fn into_config(self, profile: ProfileConfig) -> (RunConfig, OutputFormat) {
        let cfg = RunConfig {
            input: self.input,
            profile,
            output: self.output,
            echo: self.print,
            watch: self.watch,
        };
        (cfg, self.format)
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Translate mnemonic assembly into a MEM image", long_about = None)]
pub struct AsmOpts {
    #[command(flatten)]
    pub common: CommonOpts,
    /// Instruction-set config path
    #[arg(short, long, value_name = "FILE", default_value = "asm2mem.cfg")]
    pub config: PathBuf,
}

impl AsmOpts {
    pub fn into_config(self) -> (RunConfig, OutputFormat) {
        self.common.into_config(ProfileConfig::Assembly { config: self.config })
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Translate a raw (pre-encoded) source into a MEM image", long_about = None)]
pub struct RawOpts {
    #[command(flatten)]
    pub common: CommonOpts,
}

impl RawOpts {
    pub fn into_config(self) -> (RunConfig, OutputFormat) {
        self.common.into_config(ProfileConfig::Raw)
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Runs once, or in watch mode re-runs on every input change until the
/// process is killed.
pub fn drive(cfg: &RunConfig, format: OutputFormat) -> Result<()> {
    if cfg.watch {
        // nothing sets the flag, so this never returns
        watch(&cfg.input, POLL_INTERVAL, &AtomicBool::new(false), || run(cfg));
        return Ok(());
    }
    let summary = run(cfg).with_context(|| format!("translating {}", cfg.input.display()))?;
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
