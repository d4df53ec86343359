//! Batch execution integration tests against stub Maven executables
//!
//! The stub scripts key their behavior off the `-Dkarate.options=...`
//! argument, so one binary serves every scenario in a batch.

#![cfg(unix)]

use karabatch_common::{Error, EXECUTION_CANCELLED, EXECUTION_INTERRUPTED, UNKNOWN_EXECUTION_ERROR};
use karabatch_runner::{BatchRunner, MavenConfig, ProjectContext};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const STUB_MAVEN: &str = r#"case "$2" in
  *fail.feature*) echo boom >&2; exit 1 ;;
  *silent.feature*) exit 3 ;;
  *slow.feature*) echo starting; exec sleep 30 ;;
esac
echo "BUILD SUCCESS"
exit 0"#;

fn write_stub(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("stub-mvn");
    fs::write(&path, format!("#!/bin/sh\n{STUB_MAVEN}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn stub_runner(tmp: &TempDir) -> BatchRunner {
    let stub = write_stub(tmp.path());
    let ctx = ProjectContext::configure(tmp.path()).unwrap();
    let config = MavenConfig {
        binary_path: Some(stub.display().to_string()),
        ..Default::default()
    };
    BatchRunner::new(ctx, config)
}

fn features(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn records_keep_input_order_across_mixed_outcomes() {
    let tmp = TempDir::new().unwrap();
    let runner = stub_runner(&tmp);

    let batch = features(&["fail.feature", "pass.feature"]);
    let records = runner.run_batch(&batch).await.unwrap();

    assert_eq!(records.len(), 2);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.original_index, i);
        assert_eq!(record.feature, batch[i]);
    }

    assert!(!records[0].success);
    assert_eq!(records[0].error.as_deref().map(str::trim), Some("boom"));
    assert!(records[0].report.as_deref().unwrap().ends_with("fail.html"));

    assert!(records[1].success);
    assert!(records[1].output.as_deref().unwrap().contains("BUILD SUCCESS"));
    assert!(records[1].report.as_deref().unwrap().ends_with("pass.html"));
    assert!(records[1].error.is_none());
}

#[tokio::test]
async fn report_uri_points_into_target_reports_dir() {
    let tmp = TempDir::new().unwrap();
    let runner = stub_runner(&tmp);

    let batch = features(&["demo/karateTests/UITests/cotizador.feature"]);
    let records = runner.run_batch(&batch).await.unwrap();

    let expected = format!(
        "file://{}",
        tmp.path()
            .join("target/karate-reports/demo.karateTests.UITests.cotizador.html")
            .display()
    );
    assert_eq!(records[0].report.as_deref(), Some(expected.as_str()));
}

#[tokio::test]
async fn silent_failure_gets_fallback_diagnostic() {
    let tmp = TempDir::new().unwrap();
    let runner = stub_runner(&tmp);

    let records = runner.run_batch(&features(&["silent.feature"])).await.unwrap();
    assert!(!records[0].success);
    assert_eq!(records[0].error.as_deref(), Some(UNKNOWN_EXECUTION_ERROR));
}

#[tokio::test]
async fn launch_failure_is_recorded_and_does_not_abort_the_batch() {
    let tmp = TempDir::new().unwrap();
    let ctx = ProjectContext::configure(tmp.path()).unwrap();
    let config = MavenConfig {
        binary_path: Some("/nonexistent/karabatch-test-mvn".to_string()),
        ..Default::default()
    };
    let runner = BatchRunner::new(ctx, config);

    let batch = features(&["a.feature", "b.feature"]);
    let records = runner.run_batch(&batch).await.unwrap();

    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(!record.success);
        assert!(record.error.as_deref().unwrap().starts_with("failed to execute:"));
        assert!(record.report.is_none());
    }
}

#[tokio::test]
async fn empty_batch_yields_empty_results() {
    let tmp = TempDir::new().unwrap();
    let runner = stub_runner(&tmp);

    let records = runner.run_batch(&[]).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn stop_kills_current_scenario_and_cancels_the_tail() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(stub_runner(&tmp));

    let batch = features(&["slow.feature", "b.feature", "c.feature"]);
    let task = {
        let runner = Arc::clone(&runner);
        let batch = batch.clone();
        tokio::spawn(async move { runner.run_batch(&batch).await })
    };

    // Let the first process start, then pull the plug
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(runner.request_stop());

    let records = task.await.unwrap().unwrap();
    assert_eq!(records.len(), 3);

    assert!(!records[0].success);
    assert_eq!(records[0].error.as_deref(), Some(EXECUTION_INTERRUPTED));

    for (i, record) in records.iter().enumerate().skip(1) {
        assert_eq!(record.original_index, i);
        assert_eq!(record.feature, batch[i]);
        assert!(!record.success);
        assert_eq!(record.error.as_deref(), Some(EXECUTION_CANCELLED));
        assert!(record.report.is_none());
    }
}

#[tokio::test]
async fn a_new_batch_runs_after_a_stop() {
    let tmp = TempDir::new().unwrap();
    let runner = stub_runner(&tmp);

    // Flip the flag with nothing running
    assert!(runner.request_stop());

    let records = runner.run_batch(&features(&["pass.feature"])).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].success);
}

#[tokio::test]
async fn concurrent_batches_are_rejected() {
    let tmp = TempDir::new().unwrap();
    let runner = Arc::new(stub_runner(&tmp));

    let task = {
        let runner = Arc::clone(&runner);
        tokio::spawn(async move { runner.run_batch(&features(&["slow.feature"])).await })
    };

    tokio::time::sleep(Duration::from_millis(300)).await;
    let second = runner.run_batch(&features(&["pass.feature"])).await;
    assert!(matches!(second, Err(Error::BatchInFlight)));

    runner.request_stop();
    let records = task.await.unwrap().unwrap();
    assert_eq!(records.len(), 1);
}
