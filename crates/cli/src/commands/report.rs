//! Report location command

use clap::Args;
use karabatch_runner::{ProjectContext, RunnerConfig};
use std::path::PathBuf;

#[derive(Args)]
pub struct ReportArgs {
    /// Maven project root
    #[arg(short, long)]
    pub project: PathBuf,

    /// Runner configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Feature path relative to the resource base
    pub feature: String,
}

pub fn execute(args: ReportArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };

    let ctx = ProjectContext::configure(&args.project)?;
    println!("{}", ctx.report_uri(&config.maven.reports_dir, &args.feature));
    Ok(())
}
