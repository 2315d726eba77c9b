use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use jam_model::user::User;

use crate::error::Result;

/// Where the user directory is saved between runs
pub trait UserStore: Send {
    /// The saved users, an empty list if nothing was saved yet
    fn load(&self) -> Result<Vec<User>>;

    fn save(&self, users: &[User]) -> Result<()>;
}

/// Keeps the directory as a pretty printed JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl UserStore for JsonFileStore {
    fn load(&self) -> Result<Vec<User>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;

        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, users: &[User]) -> Result<()> {
        let serialized = serde_json::to_string_pretty(users)?;
        fs::write(&self.path, serialized)?;

        Ok(())
    }
}

/// A store that lives as long as the process. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// What was saved last
    pub fn snapshot(&self) -> Vec<User> {
        self.users
            .lock()
            .map(|users| users.clone())
            .unwrap_or_default()
    }
}

impl UserStore for MemoryStore {
    fn load(&self) -> Result<Vec<User>> {
        Ok(self.snapshot())
    }

    fn save(&self, users: &[User]) -> Result<()> {
        if let Ok(mut saved) = self.users.lock() {
            *saved = users.to_vec();
        }

        Ok(())
    }
}
