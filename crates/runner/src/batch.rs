//! Sequential batch execution of Karate scenarios via Maven subprocesses

use crate::config::MavenConfig;
use crate::project::ProjectContext;
use crate::supervisor::ProcessSupervisor;
use karabatch_common::{
    Error, ExecutionRecord, Result, EXECUTION_INTERRUPTED, UNKNOWN_EXECUTION_ERROR,
};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info, warn};

/// Runs an ordered batch of feature paths, one Maven process at a time.
///
/// Scenarios run strictly sequentially: the external tool writes into a
/// shared report directory, so two concurrent runs would trample each other.
pub struct BatchRunner {
    ctx: ProjectContext,
    config: MavenConfig,
    supervisor: Arc<ProcessSupervisor>,
    batch_active: AtomicBool,
}

impl BatchRunner {
    pub fn new(ctx: ProjectContext, config: MavenConfig) -> Self {
        Self {
            ctx,
            config,
            supervisor: Arc::new(ProcessSupervisor::new()),
            batch_active: AtomicBool::new(false),
        }
    }

    /// The supervisor owning the live process handle and continue flag.
    ///
    /// Clone the Arc to wire stop requests from another task (a signal
    /// handler, a UI thread).
    pub fn supervisor(&self) -> Arc<ProcessSupervisor> {
        Arc::clone(&self.supervisor)
    }

    /// Terminate the in-flight process and cancel the rest of the batch.
    pub fn request_stop(&self) -> bool {
        self.supervisor.request_stop()
    }

    /// Execute the given feature paths in order and return one record per
    /// input, in input order, regardless of how the run ends.
    ///
    /// The continue flag is checked once per scenario, before spawning; a
    /// stop request mid-process kills that process and marks every later
    /// scenario cancelled. Only a second concurrent call fails - per-scenario
    /// problems are captured in the records, never raised.
    pub async fn run_batch(&self, features: &[String]) -> Result<Vec<ExecutionRecord>> {
        if self.batch_active.swap(true, Ordering::SeqCst) {
            return Err(Error::BatchInFlight);
        }

        self.supervisor.begin_batch();

        // Index-ordered slots: position i belongs to input i, so the output
        // order cannot drift even if records are produced out of order.
        let mut slots: Vec<Option<ExecutionRecord>> = vec![None; features.len()];

        for (index, feature) in features.iter().enumerate() {
            if !self.supervisor.should_continue() {
                info!("stop requested, cancelling {} remaining scenario(s)", features.len() - index);
                for (skipped, slot) in slots.iter_mut().enumerate().skip(index) {
                    *slot = Some(ExecutionRecord::cancelled(skipped, &features[skipped]));
                }
                break;
            }

            info!("running scenario {}/{}: {}", index + 1, features.len(), feature);
            slots[index] = Some(self.run_one(index, feature).await);
        }

        self.batch_active.store(false, Ordering::SeqCst);
        Ok(slots.into_iter().flatten().collect())
    }

    async fn run_one(&self, index: usize, feature: &str) -> ExecutionRecord {
        let started = Instant::now();
        let command = self.config.maven_command();
        let selector = format!("-D{}=classpath:{}", self.config.karate_option, feature);
        debug!("command: {} test {}", command, selector);

        let mut cmd = if cfg!(windows) {
            // mvn.cmd is a batch script and needs the shell to run it
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&command);
            cmd
        } else {
            Command::new(&command)
        };

        let spawned = cmd
            .arg("test")
            .arg(&selector)
            .current_dir(self.ctx.root())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                error!("failed to spawn {}: {}", command, e);
                return ExecutionRecord {
                    original_index: index,
                    feature: feature.to_string(),
                    success: false,
                    report: None,
                    output: None,
                    error: Some(format!("failed to execute: {e}")),
                    duration_ms: started.elapsed().as_millis() as u64,
                };
            }
        };

        if let Some(pid) = child.id() {
            self.supervisor.track(pid, feature);
        }

        // Stream both pipes as output arrives; Maven runs can be long and
        // the lines double as live progress in the log.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let (stdout_buf, stderr_buf) = tokio::join!(drain(stdout, false), drain(stderr, true));

        let status = child.wait().await;
        self.supervisor.untrack();
        let duration_ms = started.elapsed().as_millis() as u64;

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                error!("failed to collect {}: {}", command, e);
                return ExecutionRecord {
                    original_index: index,
                    feature: feature.to_string(),
                    success: false,
                    report: None,
                    output: None,
                    error: Some(format!("failed to execute: {e}")),
                    duration_ms,
                };
            }
        };

        let report = Some(self.ctx.report_uri(&self.config.reports_dir, feature));

        // A stop request that arrived while this process ran counts as
        // attempted-but-interrupted, distinct from never-started.
        if !self.supervisor.should_continue() {
            info!("scenario {} interrupted by stop request", feature);
            return ExecutionRecord {
                original_index: index,
                feature: feature.to_string(),
                success: false,
                report,
                output: non_empty(stdout_buf),
                error: Some(EXECUTION_INTERRUPTED.to_string()),
                duration_ms,
            };
        }

        info!("scenario {} finished with {}", feature, status);

        if status.success() {
            ExecutionRecord {
                original_index: index,
                feature: feature.to_string(),
                success: true,
                report,
                output: Some(stdout_buf),
                error: None,
                duration_ms,
            }
        } else {
            let diagnostic = non_empty(stderr_buf)
                .or_else(|| non_empty(stdout_buf))
                .unwrap_or_else(|| UNKNOWN_EXECUTION_ERROR.to_string());
            ExecutionRecord {
                original_index: index,
                feature: feature.to_string(),
                success: false,
                report,
                output: None,
                error: Some(diagnostic),
                duration_ms,
            }
        }
    }
}

/// Accumulate one of the child's pipes line by line, echoing each line into
/// the log as it arrives.
async fn drain<R>(stream: Option<R>, is_stderr: bool) -> String
where
    R: AsyncRead + Unpin,
{
    let mut buf = String::new();
    let Some(stream) = stream else {
        return buf;
    };

    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if is_stderr {
                    warn!(target: "maven", "{}", line);
                } else {
                    info!(target: "maven", "{}", line);
                }
                buf.push_str(&line);
                buf.push('\n');
            }
            Ok(None) => break,
            Err(e) => {
                warn!("error reading Maven output: {}", e);
                break;
            }
        }
    }
    buf
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_drops_empty_buffers() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("boom\n".to_string()), Some("boom\n".to_string()));
    }

    #[tokio::test]
    async fn drain_accumulates_lines() {
        let text = drain(Some(&b"first\nsecond\n"[..]), false).await;
        assert_eq!(text, "first\nsecond\n");
    }

    #[tokio::test]
    async fn drain_tolerates_missing_pipe() {
        let text = drain(None::<&[u8]>, true).await;
        assert!(text.is_empty());
    }
}
