//! Helpers shared by unit tests.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::process::{BackgroundJobs, Finished};

static SERIAL: Mutex<()> = Mutex::new(());

/// Serialize tests that fork, reap any child, or change the working directory.
pub(crate) fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A path in the temp directory unique to this process and `name`.
pub(crate) fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vena-{}-{}", std::process::id(), name))
}

/// Poll the reaper until every tracked job has been collected.
pub(crate) fn reap_until_empty(jobs: &mut BackgroundJobs) -> Vec<Finished> {
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut finished = Vec::new();
    while !jobs.is_empty() {
        assert!(Instant::now() < deadline, "background jobs did not finish");
        finished.extend(jobs.reap());
        std::thread::sleep(Duration::from_millis(10));
    }
    finished
}
