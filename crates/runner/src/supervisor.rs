//! Live subprocess tracking and platform-specific termination

use parking_lot::Mutex;
use tracing::{error, info};

/// Runtime state for the single in-flight Maven process
#[derive(Debug, Clone)]
pub struct RunningProcess {
    pub pid: u32,
    pub feature: String,
    pub started_at: i64,
}

#[derive(Debug)]
struct SupervisorState {
    current: Option<RunningProcess>,
    keep_going: bool,
}

/// Owns the at-most-one live subprocess handle and the cooperative
/// continue flag shared between a running batch and stop requests.
pub struct ProcessSupervisor {
    inner: Mutex<SupervisorState>,
}

impl ProcessSupervisor {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SupervisorState {
                current: None,
                keep_going: true,
            }),
        }
    }

    /// Re-arm the continue flag; a fresh batch always starts runnable.
    pub(crate) fn begin_batch(&self) {
        self.inner.lock().keep_going = true;
    }

    pub(crate) fn track(&self, pid: u32, feature: &str) {
        let process = RunningProcess {
            pid,
            feature: feature.to_string(),
            started_at: chrono::Utc::now().timestamp(),
        };
        self.inner.lock().current = Some(process);
    }

    pub(crate) fn untrack(&self) {
        self.inner.lock().current = None;
    }

    /// True until a stop request arrives for the current batch.
    pub fn should_continue(&self) -> bool {
        self.inner.lock().keep_going
    }

    /// The tracked in-flight process, if any.
    pub fn current(&self) -> Option<RunningProcess> {
        self.inner.lock().current.clone()
    }

    /// Terminate the in-flight process (if any) and block further scenarios
    /// from starting. Idempotent; having no live process is a normal state.
    ///
    /// Returns false only when the OS-level kill itself failed.
    pub fn request_stop(&self) -> bool {
        let mut state = self.inner.lock();
        state.keep_going = false;

        if let Some(process) = state.current.take() {
            info!("terminating Maven process {} ({})", process.pid, process.feature);
            match terminate(process.pid) {
                Ok(()) => true,
                Err(e) => {
                    error!("failed to terminate process {}: {}", process.pid, e);
                    false
                }
            }
        } else {
            true
        }
    }
}

impl Default for ProcessSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn terminate(pid: u32) -> std::io::Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    kill(Pid::from_raw(pid as i32), Signal::SIGTERM)
        .map_err(|e| std::io::Error::from_raw_os_error(e as i32))
}

#[cfg(windows)]
fn terminate(pid: u32) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    // taskkill /T also reaps children of the mvn.cmd wrapper; a plain kill
    // would leave the JVM running
    let status = Command::new("taskkill")
        .args(["/pid", &pid.to_string(), "/T", "/F"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other(format!("taskkill exited with {status}")))
    }
}
