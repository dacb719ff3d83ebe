//! CLI for burpsluice.

use anyhow::Result;
use clap::Parser;
use sluice_core::config::{self, SluiceConfig};
use sluice_core::RunSummary;
use std::io::{self, Write};
use std::path::PathBuf;

/// Default base name for the two output files.
pub const DEFAULT_OUTPUT_BASE: &str = "burp_params";

/// Extract unique cookie and parameter names from a Burp Suite XML export.
#[derive(Debug, Parser)]
#[command(name = "burpsluice")]
#[command(about = "Extract cookie and parameter names from a Burp Suite XML export", long_about = None)]
pub struct Cli {
    /// Burp Suite XML export to parse.
    #[arg(value_name = "XML_FILE")]
    pub xml_file: PathBuf,

    /// Base name for output files ({BASE}_cookies.txt and {BASE}_params.txt).
    #[arg(short, long, value_name = "BASE", default_value = DEFAULT_OUTPUT_BASE)]
    pub output: String,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config();
        let summary = execute(&cli, &cfg)?;
        write_summary(&mut std::io::stdout().lock(), &cli, &summary)?;
        Ok(())
    }
}

/// Config is optional: an unusable config location falls back to defaults.
fn load_config() -> SluiceConfig {
    match config::load_or_init() {
        Ok(cfg) => {
            tracing::debug!("loaded config: {:?}", cfg);
            cfg
        }
        Err(err) => {
            tracing::warn!("using default config: {err:#}");
            SluiceConfig::default()
        }
    }
}

/// Runs one extraction for the parsed arguments.
pub fn execute(cli: &Cli, cfg: &SluiceConfig) -> Result<RunSummary> {
    Ok(sluice_core::run(&cli.xml_file, &cli.output, cfg)?)
}

fn write_summary(out: &mut impl Write, cli: &Cli, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "Successfully parsed {}", cli.xml_file.display())?;
    writeln!(out, "Found:")?;
    writeln!(out, "  {} unique cookies", summary.cookies)?;
    writeln!(out, "  {} unique parameters", summary.params)?;
    writeln!(out)?;
    writeln!(out, "Results saved with base filename: {}", cli.output)
}
