//! Settlement payments recorded within a group.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Money handed over by a member, either to another member or into the pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub group_id: Uuid,
    pub sender: Uuid,
    #[serde(default)]
    pub receiver: Option<Uuid>,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Payment {
    /// A payment from `sender` to `receiver`.
    pub fn transfer(group_id: Uuid, sender: Uuid, receiver: Uuid, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            sender,
            receiver: Some(receiver),
            amount,
            note: None,
        }
    }

    /// A payment from `sender` into the shared pool.
    pub fn into_pool(group_id: Uuid, sender: Uuid, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            sender,
            receiver: None,
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn involves(&self, member_id: Uuid) -> bool {
        self.sender == member_id || self.receiver == Some(member_id)
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Payment {
    fn amount(&self) -> Money {
        self.amount
    }
}
