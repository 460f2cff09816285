//! JSON-file-backed proxy store.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::store::records::{NewProxy, ProxyPatch, ProxyTarget};

/// Store failures surfaced on the management API.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("proxy id already exists")]
    Duplicate,

    #[error("proxy not found")]
    Missing,

    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Keyed record store persisted as a single JSON file.
pub struct ProxyStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles; point reads take no lock.
    write_lock: Mutex<()>,
}

impl ProxyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Load every record. A missing or unparseable file reads as empty.
    pub fn list(&self) -> Vec<ProxyTarget> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "proxy store file is not valid json, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Fresh point lookup; no caching between calls.
    pub fn get(&self, id: &str) -> Option<ProxyTarget> {
        self.list().into_iter().find(|p| p.id == id)
    }

    pub fn create(&self, new: NewProxy) -> Result<ProxyTarget, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut records = self.list();
        let id = new.resolved_id();
        if records.iter().any(|p| p.id == id) {
            return Err(StoreError::Duplicate);
        }

        let record = ProxyTarget {
            id,
            name: new.name,
            target_url: new.target_url,
            description: new.description,
            enabled: new.enabled,
        };
        records.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    pub fn update(&self, id: &str, patch: ProxyPatch) -> Result<ProxyTarget, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut records = self.list();
        let record = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::Missing)?;

        if let Some(name) = patch.name {
            record.name = name;
        }
        if let Some(target_url) = patch.target_url {
            record.target_url = target_url;
        }
        if let Some(description) = patch.description {
            record.description = description;
        }
        if let Some(enabled) = patch.enabled {
            record.enabled = enabled;
        }

        let updated = record.clone();
        self.save(&records)?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut records = self.list();
        let before = records.len();
        records.retain(|p| p.id != id);
        if records.len() == before {
            return Err(StoreError::Missing);
        }
        self.save(&records)?;
        Ok(())
    }

    fn save(&self, records: &[ProxyTarget]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> ProxyStore {
        let path = std::env::temp_dir()
            .join("framegate-store-tests")
            .join(format!("{}-{}.json", name, std::process::id()));
        let _ = fs::remove_file(&path);
        ProxyStore::new(path)
    }

    fn new_proxy(name: &str, target: &str) -> NewProxy {
        NewProxy {
            name: name.to_string(),
            target_url: target.to_string(),
            description: String::new(),
            enabled: true,
            id: None,
        }
    }

    #[test]
    fn test_crud_round_trip() {
        let store = temp_store("crud");
        assert!(store.list().is_empty());

        let created = store
            .create(new_proxy("Grafana", "http://10.0.0.5:3000"))
            .unwrap();
        assert_eq!(created.id, "grafana");
        assert_eq!(store.get("grafana").unwrap(), created);

        let updated = store
            .update(
                "grafana",
                ProxyPatch {
                    enabled: Some(false),
                    ..ProxyPatch::default()
                },
            )
            .unwrap();
        assert!(!updated.enabled);
        // Unspecified fields survive a partial update.
        assert_eq!(updated.target_url, "http://10.0.0.5:3000");

        store.delete("grafana").unwrap();
        assert!(store.get("grafana").is_none());
    }

    #[test]
    fn test_duplicate_create_rejected() {
        let store = temp_store("dup");
        store.create(new_proxy("App", "http://a")).unwrap();
        let err = store.create(new_proxy("App", "http://b")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[test]
    fn test_missing_update_and_delete_rejected() {
        let store = temp_store("missing");
        assert!(matches!(
            store.update("ghost", ProxyPatch::default()),
            Err(StoreError::Missing)
        ));
        assert!(matches!(store.delete("ghost"), Err(StoreError::Missing)));
    }

    #[test]
    fn test_corrupt_file_reads_empty() {
        let store = temp_store("corrupt");
        if let Some(parent) = store.path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&store.path, "{ not json").unwrap();
        assert!(store.list().is_empty());
    }
}
