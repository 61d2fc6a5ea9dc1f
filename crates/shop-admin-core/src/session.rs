//! Credential storage

use parking_lot::RwLock;
use shop_admin_client::Credential;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Holds at most one credential. Nothing expires; the last value set
/// is returned until cleared.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Result<Option<Credential>, SessionError>;
    fn set(&self, credential: &Credential) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Credential kept in a single file, surviving restarts.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<Credential>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Credential::parse(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn set(&self, credential: &Credential) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        write_owner_only(&self.path, credential.as_str()).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "Credential stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Credential removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// The file is created 0600 on unix; an existing file is narrowed too.
#[cfg(unix)]
fn write_owner_only(path: &Path, contents: &str) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)
}

/// Process-local store, gone on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    credential: RwLock<Option<Credential>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(credential)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<Credential>, SessionError> {
        Ok(self.credential.read().clone())
    }

    fn set(&self, credential: &Credential) -> Result<(), SessionError> {
        *self.credential.write() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.credential.write() = None;
        Ok(())
    }
}
