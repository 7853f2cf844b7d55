//! The group aggregate: members plus the expenses and payments they record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, expense::Expense, member::Member, payment::Payment};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members: Vec::new(),
            expenses: Vec::new(),
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn member(&self, id: Uuid) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn has_member(&self, id: Uuid) -> bool {
        self.member(id).is_some()
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        self.payments.iter().find(|payment| payment.id == id)
    }

    /// Returns `true` when any expense or payment references `member_id`.
    pub fn member_is_referenced(&self, member_id: Uuid) -> bool {
        self.expenses.iter().any(|expense| expense.involves(member_id))
            || self.payments.iter().any(|payment| payment.involves(member_id))
    }

    /// `None` if the expense total overflows [`Money`].
    pub fn total_expenses(&self) -> Option<Money> {
        total_amount(&self.expenses)
    }

    pub fn total_payments(&self) -> Option<Money> {
        total_amount(&self.payments)
    }
}

impl Identifiable for Group {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Group {
    fn display_label(&self) -> String {
        format!("{} ({} members)", self.name, self.members.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn snapshot_without_timestamps_still_loads() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"id":"{id}","name":"Trip"}}"#);
        let group: Group = serde_json::from_str(&json).expect("group json");

        assert_eq!(group.id, id);
        assert!(group.members.is_empty());
        assert_eq!(group.total_expenses(), Some(Money::ZERO));
    }

    #[test]
    fn totals_sum_expenses_and_payments() {
        let mut group = Group::new("Flat");
        let alice = Member::new("Alice");
        let bob = Member::new("Bob");
        let (a, b) = (alice.id, bob.id);
        group.members.extend([alice, bob]);
        group
            .expenses
            .push(Expense::even(group.id, "Rent", dec!(900), a, [a, b]));
        group
            .expenses
            .push(Expense::even(group.id, "Power", dec!(85.40), b, [a, b]));
        group
            .payments
            .push(Payment::transfer(group.id, b, a, dec!(400)));

        assert_eq!(group.total_expenses(), Some(dec!(985.40)));
        assert_eq!(group.total_payments(), Some(dec!(400)));
        assert!(group.member_is_referenced(a));
        assert!(!group.member_is_referenced(Uuid::new_v4()));
    }
}
