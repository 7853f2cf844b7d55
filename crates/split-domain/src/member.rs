//! Group member identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A person who shares expenses within a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Identifiable for Member {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Member {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Member {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}
