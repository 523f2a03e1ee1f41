use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable report, one line per outcome
    Terminal,
    /// Machine-readable JSON report
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "declsplit")]
#[command(about = "Splits monolithic C++ header/source class families into per-class files", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split an aggregate header/source pair into one file pair per derived class
    Split {
        /// Aggregate header file (rewritten in place to reference the split files)
        #[arg(long)]
        header: PathBuf,

        /// Aggregate implementation file
        #[arg(long)]
        source: PathBuf,

        /// Output directory for per-class headers
        #[arg(long = "header-out")]
        header_out: PathBuf,

        /// Output directory for per-class implementation files
        #[arg(long = "source-out")]
        source_out: PathBuf,

        /// Base class name (overrides the conventions file)
        #[arg(long)]
        base: Option<String>,

        /// Conventions file (defaults to .declsplit.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: ReportFormat,

        /// Run the full pipeline and report without writing any file
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Worker threads for per-class extraction (0 = rayon default)
        #[arg(long, default_value = "0")]
        jobs: usize,
    },
    /// Initialize a default .declsplit.toml conventions file
    Init {
        /// Overwrite an existing conventions file
        #[arg(long)]
        force: bool,
    },
}
