use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tenet", version, about = "Rule-driven standards audit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Audit a source tree and emit a score report
    Audit(AuditArgs),
    /// Print the JSON Schema for rule documents
    Schema,
}

#[derive(clap::Args)]
pub struct AuditArgs {
    /// Directory to audit
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Quick scan: a bounded, deterministic sample instead of every file
    #[arg(long)]
    pub quick: bool,

    /// Force an ecosystem instead of detecting one
    #[arg(long)]
    pub ecosystem: Option<String>,

    /// Restrict detection to these ecosystems (repeatable)
    #[arg(long = "enable")]
    pub enable: Vec<String>,

    /// Advisory strictness: error findings downgraded one level
    #[arg(long)]
    pub advisory: bool,

    /// Abort evaluation after this many milliseconds (partial report, exit 3)
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// Worker threads (0 = one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Append fix suggestions to the report
    #[arg(long)]
    pub fixes: bool,

    /// Report audit phases and scan progress on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Console,
    Json,
}
