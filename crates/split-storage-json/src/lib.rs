//! split-storage-json
//!
//! Filesystem-backed JSON persistence for group snapshots.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use split_core::{group_warnings, CoreError, GroupStorage};
use split_domain::{Group, SettlementModel};
use tracing::{info, warn};
use uuid::Uuid;

const GROUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%3f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Stores each group as `<groups_dir>/<id>.json` and keeps rolling backups.
#[derive(Debug, Clone)]
pub struct JsonGroupStorage {
    groups_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
    model: SettlementModel,
}

impl JsonGroupStorage {
    pub fn new(groups_dir: PathBuf, backups_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(groups_dir, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        groups_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&groups_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            groups_dir,
            backups_dir,
            retention: retention.max(1),
            model: SettlementModel::default(),
        })
    }

    /// Settlement model used when checking loaded snapshots for integrity problems.
    pub fn with_settlement_model(mut self, model: SettlementModel) -> Self {
        self.model = model;
        self
    }

    pub fn group_path(&self, id: Uuid) -> PathBuf {
        self.groups_dir.join(format!("{id}.{GROUP_EXTENSION}"))
    }

    pub fn list_group_metadata(&self) -> Result<Vec<GroupMetadata>, CoreError> {
        let mut entries = Vec::new();
        for id in self.list_groups()? {
            let path = self.group_path(id);
            let group = load_group_from_path(&path)?;
            entries.push(GroupMetadata {
                id,
                name: group.name,
                path,
                updated_at: group.updated_at,
                member_count: group.members.len(),
                expense_count: group.expenses.len(),
                payment_count: group.payments.len(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Backup files for `id`, newest first.
    pub fn list_backups(&self, id: Uuid) -> Result<Vec<PathBuf>, CoreError> {
        let dir = self.backup_dir(id);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(GROUP_EXTENSION) {
                entries.push(path);
            }
        }
        // Timestamps are fixed-width, so file names sort chronologically.
        entries.sort_by_key(|path| Reverse(path.file_name().map(|name| name.to_owned())));
        Ok(entries)
    }

    /// Replaces the live snapshot of `id` with the named backup and returns it.
    pub fn restore_backup(&self, id: Uuid, backup_name: &str) -> Result<Group, CoreError> {
        let source = self.backup_dir(id).join(backup_name);
        if !source.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{backup_name}` not found for group {id}"
            )));
        }
        let group = load_group_from_path(&source)?;
        save_group_to_path(&group, &self.group_path(id))?;
        info!(group_id = %id, backup = backup_name, "group restored from backup");
        Ok(group)
    }

    fn backup_dir(&self, id: Uuid) -> PathBuf {
        self.backups_dir.join(id.to_string())
    }

    fn backup_existing_file(&self, id: Uuid, path: &Path) -> Result<(), CoreError> {
        let dir = self.backup_dir(id);
        fs::create_dir_all(&dir)?;
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        fs::copy(path, dir.join(format!("{id}_{stamp}.{GROUP_EXTENSION}")))?;
        self.prune_backups(id)
    }

    fn prune_backups(&self, id: Uuid) -> Result<(), CoreError> {
        for stale in self.list_backups(id)?.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&stale) {
                warn!(path = %stale.display(), error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl GroupStorage for JsonGroupStorage {
    fn save_group(&self, group: &Group) -> Result<(), CoreError> {
        let path = self.group_path(group.id);
        if path.exists() {
            self.backup_existing_file(group.id, &path)?;
        }
        save_group_to_path(group, &path)?;
        info!(group_id = %group.id, path = %path.display(), "group saved");
        Ok(())
    }

    fn find_group(&self, id: Uuid) -> Result<Option<Group>, CoreError> {
        let path = self.group_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let group = load_group_from_path(&path)?;
        for warning in group_warnings(&group, self.model) {
            warn!(group_id = %id, "{warning}");
        }
        Ok(Some(group))
    }

    fn list_groups(&self) -> Result<Vec<Uuid>, CoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.groups_dir)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(GROUP_EXTENSION)
            {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| Uuid::parse_str(stem).ok())
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn delete_group(&self, id: Uuid) -> Result<(), CoreError> {
        let path = self.group_path(id);
        if path.exists() {
            fs::remove_file(path)?;
            info!(group_id = %id, "group deleted");
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GroupMetadata {
    pub id: Uuid,
    pub name: String,
    pub path: PathBuf,
    pub updated_at: DateTime<Utc>,
    pub member_count: usize,
    pub expense_count: usize,
    pub payment_count: usize,
}

/// Saves a group snapshot to an arbitrary path on disk.
pub fn save_group_to_path(group: &Group, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(group).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a group snapshot from the provided filesystem path.
pub fn load_group_from_path(path: &Path) -> Result<Group, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| {
        CoreError::Serde(format!("{}: {err}", path.display()))
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
