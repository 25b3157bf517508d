// src/file/storage.rs
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context, anyhow};
use tracing::debug;

/// Session-scoped key/value storage. Values live no longer than the
/// session that owns them.
pub trait SessionStorage: std::fmt::Debug {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
    /// Drops everything the session stored.
    fn discard(&mut self) -> Result<()>;
}

impl<T: SessionStorage + ?Sized> SessionStorage for Box<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }

    fn discard(&mut self) -> Result<()> {
        (**self).discard()
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }

    fn discard(&mut self) -> Result<()> {
        self.items.clear();
        Ok(())
    }
}

/// One directory per session, one `<key>.ron` file per key.
#[derive(Debug)]
pub struct DirStorage {
    session_dir: PathBuf,
}

impl DirStorage {
    pub fn open(root: &Path, session_id: &str) -> Result<Self> {
        validate_key(session_id)
            .with_context(|| format!("Invalid session id: {}", session_id))?;

        let session_dir = root.join(format!("session-{}", session_id));
        fs::create_dir_all(&session_dir)
            .with_context(|| format!("Failed to create session directory: {}", session_dir.display()))?;

        debug!(dir = %session_dir.display(), "opened session storage");
        Ok(Self { session_dir })
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.session_dir.join(format!("{}.ron", key)))
    }
}

impl SessionStorage for DirStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session item: {}", path.display()))?;
        Ok(Some(content))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        fs::create_dir_all(&self.session_dir)
            .with_context(|| format!("Failed to create session directory: {}", self.session_dir.display()))?;

        // Write beside the target, then rename over it.
        let tmp_path = path.with_extension("ron.tmp");
        fs::write(&tmp_path, value)
            .with_context(|| format!("Failed to write session item: {}", tmp_path.display()))?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e)
                .with_context(|| format!("Failed to replace session item: {}", path.display()));
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove session item: {}", path.display()))?;
        }
        Ok(())
    }

    fn discard(&mut self) -> Result<()> {
        if self.session_dir.exists() {
            fs::remove_dir_all(&self.session_dir)
                .with_context(|| format!("Failed to remove session directory: {}", self.session_dir.display()))?;
        }
        debug!(dir = %self.session_dir.display(), "discarded session storage");
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(anyhow!("Storage keys may only contain letters, digits, '_' and '-': {:?}", key))
    }
}
