use rust_decimal_macros::dec;
use split_core::{BalanceService, CoreError, GroupService, GroupStorage};
use split_domain::{Expense, Group, Member, SettlementModel};
use split_storage_json::{load_group_from_path, save_group_to_path, JsonGroupStorage};
use tempfile::tempdir;
use uuid::Uuid;

fn storage_in(dir: &std::path::Path, retention: usize) -> JsonGroupStorage {
    JsonGroupStorage::with_retention(dir.join("groups"), dir.join("backups"), retention)
        .expect("create storage")
}

fn sample_group() -> Group {
    let mut group = GroupService::create("Road trip");
    let alice = GroupService::add_member(&mut group, Member::new("Alice")).expect("alice");
    let bob = GroupService::add_member(&mut group, Member::new("Bob")).expect("bob");
    let expense = Expense::even(Uuid::nil(), "Fuel", dec!(80), alice, [alice, bob]);
    GroupService::add_expense(&mut group, expense).expect("fuel");
    group
}

#[test]
fn json_storage_can_save_and_load_group() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path(), 5);
    let group = sample_group();

    storage.save_group(&group).expect("save group");
    let loaded = storage
        .find_group(group.id)
        .expect("load group")
        .expect("group exists");

    assert_eq!(loaded, group);
    assert_eq!(storage.list_groups().expect("list"), vec![group.id]);
    let path = storage.group_path(group.id);
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
}

#[test]
fn missing_group_is_none_and_maps_to_not_found() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path(), 5);
    let id = Uuid::new_v4();

    assert!(storage.find_group(id).expect("lookup").is_none());
    let err = BalanceService::for_group(&storage, id, SettlementModel::Transfer)
        .expect_err("absent group");
    assert!(matches!(err, CoreError::GroupNotFound(missing) if missing == id));
}

#[test]
fn overwriting_keeps_a_bounded_backup_history() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path(), 2);
    let mut group = sample_group();

    storage.save_group(&group).expect("first save");
    assert!(storage.list_backups(group.id).expect("backups").is_empty());

    for name in ["Road trip 2", "Road trip 3", "Road trip 4"] {
        GroupService::rename(&mut group, name);
        storage.save_group(&group).expect("resave");
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    let backups = storage.list_backups(group.id).expect("backups");
    assert!(!backups.is_empty());
    assert!(backups.len() <= 2);

    let newest = backups[0]
        .file_name()
        .and_then(|name| name.to_str())
        .expect("backup name")
        .to_string();
    let restored = storage.restore_backup(group.id, &newest).expect("restore");
    assert_eq!(restored.name, "Road trip 3");
    let live = storage.find_group(group.id).expect("load").expect("exists");
    assert_eq!(live.name, "Road trip 3");
}

#[test]
fn metadata_and_delete_reflect_stored_groups() {
    let dir = tempdir().expect("tempdir");
    let storage = storage_in(dir.path(), 5);
    let group = sample_group();
    storage.save_group(&group).expect("save");

    let metadata = storage.list_group_metadata().expect("metadata");
    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata[0].name, "Road trip");
    assert_eq!(metadata[0].member_count, 2);
    assert_eq!(metadata[0].expense_count, 1);

    storage.delete_group(group.id).expect("delete");
    assert!(storage.list_groups().expect("list").is_empty());
}

#[test]
fn snapshots_round_trip_through_arbitrary_paths() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("trip.json");
    let group = sample_group();

    save_group_to_path(&group, &path).expect("save to path");
    let loaded = load_group_from_path(&path).expect("load from path");
    let view = BalanceService::compute(&loaded).expect("compute");

    assert_eq!(view.total_expense_amount, dec!(80));
    assert!(view.balances.iter().all(|b| b.share_total == dec!(40)));
}

#[test]
fn malformed_snapshot_reports_serialization_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write");

    assert!(matches!(
        load_group_from_path(&path),
        Err(CoreError::Serde(_))
    ));
}
