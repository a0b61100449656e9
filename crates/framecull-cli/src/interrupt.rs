//! Ctrl+C handling for long triage runs.
//!
//! A watcher thread drives a single-threaded tokio runtime that waits for
//! SIGINT and raises a shared flag. The triage driver polls the flag between
//! frames, so an interrupted run never leaves a frame half-disposed.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Installs the Ctrl+C watcher and returns the flag it raises.
///
/// The signal handler is registered before this returns, replacing the
/// default terminate-on-SIGINT behavior for the rest of the process.
pub fn install() -> Result<Arc<AtomicBool>> {
    let flag = Arc::new(AtomicBool::new(false));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let mut listener = {
        let _guard = rt.enter();
        listen().context("Failed to register Ctrl+C handler")?
    };

    let watcher_flag = Arc::clone(&flag);
    thread::Builder::new()
        .name("framecull-interrupt".to_string())
        .spawn(move || {
            rt.block_on(async move {
                if listener.recv().await.is_some() {
                    eprintln!("\nInterrupted, finishing current frame...");
                    watcher_flag.store(true, Ordering::SeqCst);
                }
            })
        })
        .context("Failed to spawn interrupt watcher")?;

    Ok(flag)
}

#[cfg(unix)]
fn listen() -> std::io::Result<tokio::signal::unix::Signal> {
    use tokio::signal::unix::{signal, SignalKind};
    signal(SignalKind::interrupt())
}

#[cfg(windows)]
fn listen() -> std::io::Result<tokio::signal::windows::CtrlC> {
    tokio::signal::windows::ctrl_c()
}

/// Returns true once the flag has been raised.
pub fn is_interrupted(flag: &AtomicBool) -> bool {
    flag.load(Ordering::SeqCst)
}
