//! Settings hot-reload.
//!
//! Watches the settings file's directory (editors often replace the file
//! rather than write it) and reports changes to that file through a
//! non-blocking [`SettingsWatcher::poll`].

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tracing::debug;

pub use crate::settings::default_settings_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    Created,
    Modified,
    Deleted,
    Error(String),
}

pub struct SettingsWatcher {
    path: PathBuf,
    rx: Receiver<notify::Result<Event>>,
    _watcher: RecommendedWatcher,
}

impl SettingsWatcher {
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // Receiver dropped means the watcher is being torn down.
            let _ = tx.send(res);
        })?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        debug!(path = %path.display(), "Watching settings");

        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next change to the settings file, if one is pending.
    pub fn poll(&mut self) -> Option<SettingsEvent> {
        loop {
            let res = match self.rx.try_recv() {
                Ok(res) => res,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    return Some(SettingsEvent::Error("watcher disconnected".into()));
                }
            };
            match res {
                Ok(event) => {
                    if let Some(change) = self.classify(&event) {
                        return Some(change);
                    }
                }
                Err(e) => return Some(SettingsEvent::Error(e.to_string())),
            }
        }
    }

    fn classify(&self, event: &Event) -> Option<SettingsEvent> {
        let name = self.path.file_name()?;
        if !event.paths.iter().any(|p| p.file_name() == Some(name)) {
            return None;
        }
        match event.kind {
            EventKind::Create(_) => Some(SettingsEvent::Created),
            EventKind::Modify(_) => Some(SettingsEvent::Modified),
            EventKind::Remove(_) => Some(SettingsEvent::Deleted),
            _ => None,
        }
    }
}
