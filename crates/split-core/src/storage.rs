use std::{collections::HashMap, sync::RwLock};

use split_domain::{Group, SettlementModel};
use uuid::Uuid;

use crate::{integrity::integrity_report, CoreError};

/// Abstraction over persistence backends that hold group snapshots.
pub trait GroupStorage: Send + Sync {
    fn save_group(&self, group: &Group) -> Result<(), CoreError>;
    fn find_group(&self, id: Uuid) -> Result<Option<Group>, CoreError>;
    fn list_groups(&self) -> Result<Vec<Uuid>, CoreError>;
    fn delete_group(&self, id: Uuid) -> Result<(), CoreError>;
}

/// Keeps groups in process memory; useful for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryGroupStorage {
    groups: RwLock<HashMap<Uuid, Group>>,
}

impl MemoryGroupStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GroupStorage for MemoryGroupStorage {
    fn save_group(&self, group: &Group) -> Result<(), CoreError> {
        let mut groups = self
            .groups
            .write()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        groups.insert(group.id, group.clone());
        Ok(())
    }

    fn find_group(&self, id: Uuid) -> Result<Option<Group>, CoreError> {
        let groups = self
            .groups
            .read()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        Ok(groups.get(&id).cloned())
    }

    fn list_groups(&self) -> Result<Vec<Uuid>, CoreError> {
        let groups = self
            .groups
            .read()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        let mut ids: Vec<Uuid> = groups.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn delete_group(&self, id: Uuid) -> Result<(), CoreError> {
        let mut groups = self
            .groups
            .write()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        groups.remove(&id);
        Ok(())
    }
}

/// Describes every integrity problem in a loaded snapshot as a readable line.
pub fn group_warnings(group: &Group, model: SettlementModel) -> Vec<String> {
    integrity_report(group, model)
        .into_iter()
        .map(|violation| violation.to_string())
        .collect()
}
