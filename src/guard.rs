use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::Result;

/// Single-instance lock: a plain-text file holding the pid of the running
/// process. Dropping the guard removes the file.
#[derive(Debug)]
pub struct InstanceGuard {
    lock_file: PathBuf,
}

impl InstanceGuard {
    /// Take ownership of the lock file.
    ///
    /// Returns `None` when the pid on file belongs to a live process, in
    /// which case the caller must exit without touching any shared state.
    /// A stale or unreadable lock is replaced with the current pid.
    pub fn acquire(lock_file: &Path) -> Result<Option<Self>> {
        if lock_file.exists() {
            let existing_pid = fs::read_to_string(lock_file)
                .ok()
                .and_then(|raw| raw.trim().parse::<i32>().ok())
                .unwrap_or(0);

            if existing_pid != 0 && pid_is_running(existing_pid) {
                return Ok(None);
            }
            if let Err(e) = fs::remove_file(lock_file) {
                warn!("Falha ao remover lock obsoleto: {e}");
            }
        }

        fs::write(lock_file, std::process::id().to_string())?;
        Ok(Some(Self {
            lock_file: lock_file.to_path_buf(),
        }))
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_file);
    }
}

/// Probe liveness with signal 0. EPERM means the pid exists but belongs to
/// another user: treat it as alive rather than risk two writers on one file.
#[cfg(unix)]
fn pid_is_running(pid: i32) -> bool {
    if unsafe { libc::kill(pid, 0) } == 0 {
        return true;
    }
    std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

/// Without a liveness probe, assume the other instance is alive.
#[cfg(not(unix))]
fn pid_is_running(_pid: i32) -> bool {
    true
}
