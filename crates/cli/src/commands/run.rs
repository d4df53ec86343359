//! Batch execution command

use crate::output::{self, OutputFormat};
use anyhow::bail;
use clap::Args;
use karabatch_common::RunSummary;
use karabatch_runner::{BatchRunner, ProjectContext, RunnerConfig, ScenarioCatalog};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Args)]
pub struct RunArgs {
    /// Maven project root
    #[arg(short, long)]
    pub project: PathBuf,

    /// Runner configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run every discovered scenario in catalog order
    #[arg(long, conflicts_with = "features")]
    pub all: bool,

    /// Feature paths relative to the resource base, run in the given order
    pub features: Vec<String>,
}

pub async fn execute(args: RunArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };

    let ctx = ProjectContext::configure(&args.project)?;

    let features = if args.all {
        ScenarioCatalog::new(&ctx, &config.discovery)
            .scan()
            .iter()
            .flat_map(|g| g.scenarios.iter().map(|s| s.feature.clone()))
            .collect()
    } else {
        args.features
    };
    if features.is_empty() {
        bail!("no scenarios selected; pass feature paths or --all");
    }

    let runner = Arc::new(BatchRunner::new(ctx, config.maven.clone()));
    let started_at = chrono::Utc::now().timestamp();
    let started = Instant::now();

    let mut batch = {
        let runner = Arc::clone(&runner);
        let features = features.clone();
        tokio::spawn(async move { runner.run_batch(&features).await })
    };

    // Ctrl-C kills the in-flight Maven process and cancels the tail; the
    // batch still completes with a full record list.
    let records = tokio::select! {
        result = &mut batch => result??,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupt received, stopping current scenario");
            runner.request_stop();
            (&mut batch).await??
        }
    };

    for record in &records {
        if record.success {
            info!("✓ {} ({} ms)", record.feature, record.duration_ms);
        } else {
            error!(
                "✗ {} - {}",
                record.feature,
                record.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    let summary = RunSummary::from_records(records, started_at, started.elapsed().as_millis() as u64);
    output::print_summary(&summary, format);

    if summary.failed > 0 || summary.cancelled > 0 {
        bail!("{} scenario(s) did not pass", summary.failed + summary.cancelled);
    }
    Ok(())
}
