//! Settings hot-reload.
//!
//! Watches the settings file's directory (so delete + recreate by editors is
//! seen) and exposes changes through a non-blocking [`SettingsWatcher::poll`].

use crate::error::CanvasResult;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tracing::{debug, warn};

pub use crate::settings::default_settings_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Modified,
    Created,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<SettingsEvent>,
    path: PathBuf,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> CanvasResult<Self> {
        let (tx, rx) = mpsc::channel();
        let file_name: Option<OsString> = path.file_name().map(|n| n.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    let _ = tx.send(SettingsEvent::Error(e.to_string()));
                    return;
                }
            };
            let concerns_file = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
            if !concerns_file {
                return;
            }
            let mapped = match event.kind {
                EventKind::Create(_) => SettingsEvent::Created,
                EventKind::Modify(_) => SettingsEvent::Modified,
                EventKind::Remove(_) => SettingsEvent::Deleted,
                _ => return,
            };
            let _ = tx.send(mapped);
        })?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching settings file");

        Ok(Self {
            _watcher: watcher,
            rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending notifications and return the latest, if any.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(event) => latest = Some(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Settings watcher channel closed");
                    break;
                }
            }
        }
        latest
    }
}
