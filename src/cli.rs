use crate::activity::{self, View};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gtally")]
#[command(about = "Per-contributor monthly git activity ledger with outlier filtering")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Path to project taxonomy config (JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Months of history to scan", default_value_t = 6)]
    pub months: u32,

    #[arg(long, help = "Start date (YYYY-MM-DD), overrides --months")]
    pub since: Option<String>,

    #[arg(long, help = "End date (YYYY-MM-DD), defaults to today")]
    pub until: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full activity ledger, outlier commits included
    Ledger {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Ledger with outlier commits subtracted
    Typical {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Commits flagged as statistical outliers
    Outliers {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Ledger { json, ndjson } => {
                activity::exec(self.common, View::Full, json, ndjson)
            }
            Commands::Typical { json, ndjson } => {
                activity::exec(self.common, View::Typical, json, ndjson)
            }
            Commands::Outliers { json, ndjson } => {
                activity::exec(self.common, View::Outliers, json, ndjson)
            }
        }
    }
}
