// src/watch/watcher.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{CritpathError, Result};
use crate::watch::runtime::WatchEvent;

/// Handle for the filesystem watcher.
///
/// Keeps the underlying `RecommendedWatcher` alive; dropping it stops
/// watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Watch the directory holding `plan_path` and send
/// [`WatchEvent::PlanChanged`] whenever an event touches the plan file.
///
/// The directory is watched rather than the file itself because most
/// editors save by writing a temporary file and renaming it over the
/// original, which would orphan a watch on the old inode.
pub fn spawn_plan_watcher(
    plan_path: impl Into<PathBuf>,
    runtime_tx: mpsc::Sender<WatchEvent>,
) -> Result<WatcherHandle> {
    let plan_path = plan_path.into();
    let file_name: OsString = plan_path
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| {
            CritpathError::ConfigError(format!("plan path {:?} has no file name", plan_path))
        })?;
    let dir = watch_dir(&plan_path);

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    eprintln!("critpath: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("critpath: file watch error: {err}");
            }
        },
        Config::default(),
    )
    .map_err(anyhow::Error::from)?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(anyhow::Error::from)?;

    info!("watching {:?} for changes", plan_path);

    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            debug!("received notify event: {:?}", event);

            if matches!(event.kind, EventKind::Access(_)) {
                continue;
            }
            let touches_plan = event
                .paths
                .iter()
                .any(|p| p.file_name() == Some(file_name.as_os_str()));
            if !touches_plan {
                continue;
            }

            if let Err(err) = runtime_tx.send(WatchEvent::PlanChanged).await {
                warn!("failed to send WatchEvent::PlanChanged: {err}");
                // The runtime is gone; nothing left to notify.
                return;
            }
        }

        debug!("plan watcher loop ended");
    });

    Ok(WatcherHandle { _inner: watcher })
}

/// Directory to watch for `plan_path`; a bare file name means the current
/// working directory.
fn watch_dir(plan_path: &Path) -> PathBuf {
    match plan_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_file_name_watches_the_working_directory() {
        let dir = watch_dir(Path::new("Plan.toml"));
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn nested_path_watches_its_parent() {
        assert_eq!(watch_dir(Path::new("plans/q3.toml")), PathBuf::from("plans"));
    }
}
