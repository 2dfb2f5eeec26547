use crate::{RemoteError, RemoteResult};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use pd_core::Session;

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// On-disk copy of the current session, so a restarted process can resume it.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored session, if any.
    ///
    /// A missing file is a normal first run. An unreadable or corrupted file
    /// is moved aside as `<name>.corrupted.<timestamp>` and treated as absent.
    pub fn load(&self) -> Option<Session> {
        if !self.path.exists() {
            debug!("No session file at {:?}", self.path);
            return None;
        }

        let parsed = fs::read_to_string(&self.path)
            .map_err(|e| e.to_string())
            .and_then(|contents| {
                serde_json::from_str::<Session>(&contents).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(session) => {
                info!("Restored session for {}", session.identity.id);
                Some(session)
            }
            Err(e) => {
                warn!("Session file corrupted at {:?}: {}", self.path, e);
                self.backup_corrupted();
                None
            }
        }
    }

    /// Atomic write: temp file, fsync, rename over the final path.
    pub fn save(&self, session: &Session) -> RemoteResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| RemoteError::session_file(dir.to_path_buf(), e.to_string()))?;
        }

        let temp_path = self.sibling(&format!("tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| RemoteError::session_file(self.path.clone(), e.to_string()))?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| RemoteError::session_file(temp_path.clone(), e.to_string()))?;

            file.write_all(json.as_bytes())
                .map_err(|e| RemoteError::session_file(temp_path.clone(), e.to_string()))?;

            file.sync_all()
                .map_err(|e| RemoteError::session_file(temp_path.clone(), e.to_string()))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            RemoteError::session_file(self.path.clone(), e.to_string())
        })?;

        debug!("Saved session for {}", session.identity.id);
        Ok(())
    }

    pub fn clear(&self) -> RemoteResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RemoteError::session_file(self.path.clone(), e.to_string())),
        }
    }

    /// `<dir>/<name>.<suffix>`
    fn sibling(&self, suffix: &str) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "session.json".to_string());
        self.path.with_file_name(format!("{}.{}", file_name, suffix))
    }

    fn backup_corrupted(&self) {
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self.sibling(&format!("corrupted.{}", timestamp));

        match fs::rename(&self.path, &backup_path) {
            Ok(()) => warn!("Backed up corrupted session file to {:?}", backup_path),
            Err(e) => warn!("Could not back up corrupted session file: {}", e),
        }
    }
}
