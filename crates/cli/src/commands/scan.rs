//! Scenario discovery command

use crate::output::{self, OutputFormat};
use clap::Args;
use karabatch_runner::{ProjectContext, RunnerConfig, ScenarioCatalog};
use std::path::PathBuf;

#[derive(Args)]
pub struct ScanArgs {
    /// Maven project root
    #[arg(short, long)]
    pub project: PathBuf,

    /// Runner configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn execute(args: ScanArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };

    let ctx = ProjectContext::configure(&args.project)?;
    let groups = ScenarioCatalog::new(&ctx, &config.discovery).scan();

    output::print_catalog(&groups, format);
    Ok(())
}
