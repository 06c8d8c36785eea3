use anyhow::Result;
use clap::Parser;

use asm2mem_cli::{drive, init_tracing, AsmOpts};

fn main() -> Result<()> {
    init_tracing();
    let (cfg, format) = AsmOpts::parse().into_config();
    drive(&cfg, format)
}
