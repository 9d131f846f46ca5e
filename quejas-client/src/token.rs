//! Auth Token Persistence
//!
//! A single bearer token stored under a fixed key. Its absence means the
//! client falls back to the public credential.

use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, warn};

/// Fixed key the token is stored under
pub const AUTH_TOKEN_KEY: &str = "auth-token";

/// Storage for the current user's token
pub trait TokenStore: Send + Sync {
    /// Current token, if any
    fn get(&self) -> Option<String>;

    /// Replace the stored token
    fn set(&self, token: &str);

    /// Remove the stored token
    fn clear(&self);
}

/// In-process token store
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a token already set
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set(&self, token: &str) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// Token store backed by `<dir>/auth-token`
///
/// Reads go to disk every time so several processes sharing the directory
/// observe each other's logins and logouts.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store inside the given state directory
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(AUTH_TOKEN_KEY),
        }
    }

    /// Path of the token file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(_) => None,
        }
    }

    fn set(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Failed to create token directory");
                return;
            }
        }

        match std::fs::write(&self.path, token) {
            Ok(()) => debug!(path = %self.path.display(), "Auth token stored"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to store auth token"),
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Auth token removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove auth token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());

        store.set("abc");
        assert_eq!(store.get().as_deref(), Some("abc"));

        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_memory_store_survives_poisoned_lock() {
        let store = std::sync::Arc::new(MemoryTokenStore::with_token("before"));
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.token.write().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(store.token.is_poisoned());

        assert_eq!(store.get().as_deref(), Some("before"));
        store.set("after");
        assert_eq!(store.get().as_deref(), Some("after"));
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_persists_under_fixed_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("state"));

        assert!(store.get().is_none());
        store.set("jwt-token");
        assert!(store.path().ends_with(AUTH_TOKEN_KEY));

        let reopened = FileTokenStore::new(temp_dir.path().join("state"));
        assert_eq!(reopened.get().as_deref(), Some("jwt-token"));

        reopened.clear();
        assert!(store.get().is_none());
        // clearing twice is fine
        store.clear();
    }
}
