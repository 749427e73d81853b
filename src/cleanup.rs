use log::debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Files to delete if the install is interrupted before they are complete.
#[derive(Default)]
pub struct CleanupContext {
    paths: Vec<PathBuf>,
}

impl CleanupContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    pub fn remove(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Best-effort removal of every registered file.
    pub fn cleanup(&self) {
        for path in &self.paths {
            debug!("Cleaning up: {:?}", path);
            let _ = std::fs::remove_file(path);
        }
    }
}

pub type SharedCleanupContext = Arc<Mutex<CleanupContext>>;

pub fn new_shared() -> SharedCleanupContext {
    Arc::new(Mutex::new(CleanupContext::new()))
}

/// Keeps a path registered for cleanup until [`CleanupGuard::success`] is
/// called.
pub struct CleanupGuard {
    ctx: SharedCleanupContext,
    path: PathBuf,
}

impl CleanupGuard {
    pub fn new(ctx: SharedCleanupContext, path: PathBuf) -> Self {
        if let Ok(mut guard) = ctx.lock() {
            guard.add(path.clone());
        }
        Self { ctx, path }
    }

    /// The file is complete; stop tracking it.
    pub fn success(self) {
        if let Ok(mut guard) = self.ctx.lock() {
            guard.remove(&self.path);
        }
    }
}

/// Run `cleanup` for the shared context and exit with the Ctrl-C status.
pub fn cleanup_and_exit(ctx: &SharedCleanupContext) -> ! {
    eprintln!("\nInterrupted, cleaning up...");
    if let Ok(guard) = ctx.lock() {
        guard.cleanup();
    }
    std::process::exit(130);
}
