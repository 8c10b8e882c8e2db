use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::ProjectStore;
use crate::models::{InsertProject, ProjectRecord};

#[derive(Debug)]
struct Inner {
    projects: BTreeMap<i64, ProjectRecord>,
    next_id: i64,
}

/// Process-local store; contents vanish with the process.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                projects: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectStore for MemoryStore {
    fn create_project(&self, input: InsertProject) -> Result<ProjectRecord> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        let id = inner.next_id;
        inner.next_id += 1;

        let record = input.into_record(id);
        inner.projects.insert(id, record.clone());
        Ok(record)
    }

    fn get_project(&self, id: i64) -> Result<Option<ProjectRecord>> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        Ok(inner.projects.get(&id).cloned())
    }

    fn get_all_projects(&self) -> Result<Vec<ProjectRecord>> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        Ok(inner.projects.values().cloned().collect())
    }

    fn update_project(&self, id: i64, input: InsertProject) -> Result<Option<ProjectRecord>> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        match inner.projects.get_mut(&id) {
            Some(existing) => {
                *existing = input.into_record(id);
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete_project(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        Ok(inner.projects.remove(&id).is_some())
    }
}
