use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "claimguard")]
#[command(about = "Redact claim documents and enrich instructions with policy context", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "CLAIMGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redact sensitive data from a claim document
    Redact {
        /// Claim file (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Only apply these detectors (comma separated)
        #[arg(long, value_delimiter = ',')]
        detectors: Vec<String>,

        /// Print a human-readable report instead of JSON
        #[arg(long)]
        report: bool,
    },

    /// Report sensitive data without redacting it
    Audit {
        /// Claim file (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Only apply these detectors (comma separated)
        #[arg(long, value_delimiter = ',')]
        detectors: Vec<String>,

        /// Characters of context captured around each match
        #[arg(long)]
        context_chars: Option<usize>,
    },

    /// Prepend policy context to an instruction
    Enrich {
        /// Base instruction text
        #[arg(long)]
        instruction: String,

        /// Claim file (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Skip redaction before retrieval
        #[arg(long)]
        no_filter: bool,

        /// Print only the enriched instruction
        #[arg(long)]
        text: bool,
    },

    /// Score extracted claim content against category requirements
    Validate {
        /// File holding the extracted information
        #[arg(long)]
        extracted: PathBuf,

        /// Claim file (reads stdin when omitted or "-")
        input: Option<PathBuf>,
    },

    /// List registered detectors
    Detectors,
}
