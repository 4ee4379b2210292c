//! Session persistence and the in-process session holder.

use super::SessionFileError;
use crate::account::services::AuthSession;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::RwLock;

const SESSION_FILE_NAME: &str = "session.json";

/// JSON session file inside a capability-scoped directory.
#[derive(Debug)]
pub struct SessionFile {
    dir: Dir,
    path: Utf8PathBuf,
}

impl SessionFile {
    /// Opens (creating if needed) the session directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(path: &Utf8Path) -> Result<Self, SessionFileError> {
        let io = |source| SessionFileError::Io {
            path: path.to_owned(),
            source,
        };
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(io)?;
        Ok(Self {
            dir,
            path: path.to_owned(),
        })
    }

    /// Returns the directory holding the session file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Reads the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError::Io`] when the file exists but cannot be
    /// read, or [`SessionFileError::Corrupt`] when it is not a session.
    pub fn load(&self) -> Result<Option<AuthSession>, SessionFileError> {
        let contents = match self.dir.read_to_string(SESSION_FILE_NAME) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Writes `session`, replacing any stored one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError::Io`] when the file cannot be written.
    pub fn save(&self, session: &AuthSession) -> Result<(), SessionFileError> {
        let contents = serde_json::to_vec_pretty(session)?;
        self.dir
            .write(SESSION_FILE_NAME, contents)
            .map_err(|err| self.io_error(err))
    }

    /// Deletes the stored session; a missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError::Io`] when the file cannot be removed.
    pub fn remove(&self) -> Result<(), SessionFileError> {
        match self.dir.remove_file(SESSION_FILE_NAME) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> SessionFileError {
        SessionFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// Current sign-in state for the process.
///
/// Lifecycle: [`restore`](Self::restore) once at startup,
/// [`establish`](Self::establish) after login or registration, and
/// [`clear`](Self::clear) on logout. Every transition is mirrored to the
/// [`SessionFile`].
#[derive(Debug)]
pub struct SessionHolder {
    file: SessionFile,
    current: RwLock<Option<AuthSession>>,
}

impl SessionHolder {
    /// Creates an empty holder backed by `file`.
    #[must_use]
    pub const fn new(file: SessionFile) -> Self {
        Self {
            file,
            current: RwLock::new(None),
        }
    }

    /// Loads the persisted session into memory.
    ///
    /// A corrupt session file is discarded and treated as signed out.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError::Io`] when the file cannot be read or
    /// discarded.
    pub fn restore(&self) -> Result<Option<AuthSession>, SessionFileError> {
        let stored = match self.file.load() {
            Ok(stored) => stored,
            Err(SessionFileError::Corrupt(err)) => {
                tracing::warn!(error = %err, path = %self.file.path(), "discarding corrupt session");
                self.file.remove()?;
                None
            }
            Err(err) => return Err(err),
        };
        let mut current = self
            .current
            .write()
            .map_err(|_| SessionFileError::Poisoned)?;
        current.clone_from(&stored);
        Ok(stored)
    }

    /// Records a freshly issued session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError`] when the session cannot be persisted;
    /// the in-memory state is left unchanged in that case.
    pub fn establish(&self, session: AuthSession) -> Result<(), SessionFileError> {
        self.file.save(&session)?;
        let mut current = self
            .current
            .write()
            .map_err(|_| SessionFileError::Poisoned)?;
        tracing::debug!(user_id = %session.user.id, "session established");
        *current = Some(session);
        Ok(())
    }

    /// Forgets the session in memory and on disk.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError`] when the file cannot be removed.
    pub fn clear(&self) -> Result<(), SessionFileError> {
        let mut current = self
            .current
            .write()
            .map_err(|_| SessionFileError::Poisoned)?;
        *current = None;
        self.file.remove()
    }

    /// Returns the current session, if signed in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionFileError::Poisoned`] when the state lock is poisoned.
    pub fn current(&self) -> Result<Option<AuthSession>, SessionFileError> {
        self.current
            .read()
            .map(|current| current.clone())
            .map_err(|_| SessionFileError::Poisoned)
    }
}
