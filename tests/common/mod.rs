#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_decimal_macros::dec;
use splitledger::{
    balance::GroupService,
    domain::{Expense, Group, Member, Payment},
    storage::save_group_to_path,
};
use uuid::Uuid;

pub struct Trip {
    pub group: Group,
    pub alice: Uuid,
    pub bob: Uuid,
}

/// Two members sharing a 100 and a 200 expense, both paid by Alice.
pub fn shared_trip() -> Trip {
    let mut group = GroupService::create("Lisbon");
    let alice = GroupService::add_member(&mut group, Member::new("Alice")).expect("alice");
    let bob = GroupService::add_member(&mut group, Member::new("Bob")).expect("bob");
    let gid = group.id;
    GroupService::add_expense(
        &mut group,
        Expense::even(gid, "Hotel", dec!(100), alice, [alice, bob]),
    )
    .expect("hotel");
    GroupService::add_expense(
        &mut group,
        Expense::even(gid, "Flights", dec!(200), alice, [alice, bob]),
    )
    .expect("flights");
    Trip { group, alice, bob }
}

/// The shared trip plus pool payments of 100 from Alice and 50 from Bob.
pub fn pooled_trip() -> Trip {
    let mut trip = shared_trip();
    let gid = trip.group.id;
    trip.group
        .payments
        .push(Payment::into_pool(gid, trip.alice, dec!(100)));
    trip.group
        .payments
        .push(Payment::into_pool(gid, trip.bob, dec!(50)));
    trip
}

pub fn write_group(dir: &Path, group: &Group) -> PathBuf {
    let path = dir.join(format!("{}.json", group.id));
    save_group_to_path(group, &path).expect("write group file");
    path
}
