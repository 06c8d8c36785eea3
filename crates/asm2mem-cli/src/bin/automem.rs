use anyhow::Result;
use clap::Parser;

use asm2mem_cli::{drive, init_tracing, RawOpts};

fn main() -> Result<()> {
    init_tracing();
    let (cfg, format) = RawOpts::parse().into_config();
    drive(&cfg, format)
}
