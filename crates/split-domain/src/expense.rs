//! Expenses and the strategies used to split them among participants.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A cost one member fronted on behalf of some subset of the group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub description: String,
    pub amount: Money,
    pub paid_by: Uuid,
    pub split: Split,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incurred_on: Option<NaiveDate>,
}

impl Expense {
    pub fn new(
        group_id: Uuid,
        description: impl Into<String>,
        amount: Money,
        paid_by: Uuid,
        split: Split,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            description: description.into(),
            amount,
            paid_by,
            split,
            incurred_on: None,
        }
    }

    /// Builds an expense divided evenly among `participants`.
    pub fn even(
        group_id: Uuid,
        description: impl Into<String>,
        amount: Money,
        paid_by: Uuid,
        participants: impl IntoIterator<Item = Uuid>,
    ) -> Self {
        let split = Split::Even {
            participants: participants.into_iter().collect(),
        };
        Self::new(group_id, description, amount, paid_by, split)
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.incurred_on = Some(date);
        self
    }

    pub fn split_type(&self) -> SplitType {
        self.split.split_type()
    }

    /// Returns `true` when `member_id` shares this expense.
    pub fn involves(&self, member_id: Uuid) -> bool {
        self.paid_by == member_id || self.split.participants().contains(&member_id)
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> Money {
        self.amount
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.description, self.amount, self.split_type())
    }
}

/// How an expense amount is divided. Share data lives only on the variant that uses it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Split {
    Even { participants: Vec<Uuid> },
    Percentage { shares: Vec<PercentageShare> },
    ExactAmount { shares: Vec<ExactShare> },
}

impl Split {
    pub fn split_type(&self) -> SplitType {
        match self {
            Split::Even { .. } => SplitType::Even,
            Split::Percentage { .. } => SplitType::Percentage,
            Split::ExactAmount { .. } => SplitType::ExactAmount,
        }
    }

    /// Member ids sharing the expense, in declaration order.
    pub fn participants(&self) -> Vec<Uuid> {
        match self {
            Split::Even { participants } => participants.clone(),
            Split::Percentage { shares } => shares.iter().map(|share| share.member_id).collect(),
            Split::ExactAmount { shares } => shares.iter().map(|share| share.member_id).collect(),
        }
    }

    pub fn participant_count(&self) -> usize {
        match self {
            Split::Even { participants } => participants.len(),
            Split::Percentage { shares } => shares.len(),
            Split::ExactAmount { shares } => shares.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PercentageShare {
    pub member_id: Uuid,
    pub percent: u8,
}

impl PercentageShare {
    pub fn new(member_id: Uuid, percent: u8) -> Self {
        Self { member_id, percent }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExactShare {
    pub member_id: Uuid,
    pub amount: Money,
}

impl ExactShare {
    pub fn new(member_id: Uuid, amount: Money) -> Self {
        Self { member_id, amount }
    }
}

/// Data-less tag of a [`Split`], used by read models.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
    Even,
    Percentage,
    ExactAmount,
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SplitType::Even => "Even",
            SplitType::Percentage => "Percentage",
            SplitType::ExactAmount => "Exact amount",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn split_reports_participants_in_declaration_order() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let split = Split::Percentage {
            shares: vec![PercentageShare::new(b, 30), PercentageShare::new(a, 70)],
        };

        assert_eq!(split.participants(), vec![b, a]);
        assert_eq!(split.split_type(), SplitType::Percentage);
    }

    #[test]
    fn split_deserializes_from_tagged_json() {
        let member = Uuid::new_v4();
        let json = format!(
            r#"{{"type":"exact_amount","shares":[{{"member_id":"{member}","amount":"12.50"}}]}}"#
        );
        let split: Split = serde_json::from_str(&json).expect("valid split");

        assert_eq!(
            split,
            Split::ExactAmount {
                shares: vec![ExactShare::new(member, dec!(12.50))]
            }
        );
    }

    #[test]
    fn payer_counts_as_involved_without_participating() {
        let group = Uuid::new_v4();
        let (payer, guest) = (Uuid::new_v4(), Uuid::new_v4());
        let expense = Expense::even(group, "Taxi", dec!(20), payer, [guest]);

        assert!(expense.involves(payer));
        assert!(expense.involves(guest));
        assert!(!expense.involves(Uuid::new_v4()));
    }
}
