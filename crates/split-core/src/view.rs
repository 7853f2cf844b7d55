//! Read models produced by the balance calculator.

use serde::{Deserialize, Serialize};
use split_domain::{Money, RoundingPolicy, SettlementModel, SplitType};
use uuid::Uuid;

/// A group's recorded data together with its derived totals and balances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetailedGroupView {
    pub id: Uuid,
    pub name: String,
    pub settlement_model: SettlementModel,
    pub members: Vec<MemberView>,
    pub expenses: Vec<ExpenseView>,
    pub payments: Vec<PaymentView>,
    pub total_expense_amount: Money,
    pub total_payment_amount: Money,
    pub amount_due: Money,
    pub balances: Vec<MemberBalance>,
}

impl DetailedGroupView {
    pub fn balance_of(&self, member_id: Uuid) -> Option<&MemberBalance> {
        self.balances
            .iter()
            .find(|balance| balance.member_id == member_id)
    }

    /// Returns a copy with every monetary field rounded for presentation.
    pub fn rounded(&self, policy: RoundingPolicy) -> Self {
        let round = |amount: Money| policy.apply(amount);
        Self {
            id: self.id,
            name: self.name.clone(),
            settlement_model: self.settlement_model,
            members: self.members.clone(),
            expenses: self
                .expenses
                .iter()
                .map(|expense| ExpenseView {
                    amount: round(expense.amount),
                    participants: expense
                        .participants
                        .iter()
                        .map(|participant| ParticipantShare {
                            exact_share: participant.exact_share.map(round),
                            share: round(participant.share),
                            ..participant.clone()
                        })
                        .collect(),
                    ..expense.clone()
                })
                .collect(),
            payments: self
                .payments
                .iter()
                .map(|payment| PaymentView {
                    amount: round(payment.amount),
                    ..payment.clone()
                })
                .collect(),
            total_expense_amount: round(self.total_expense_amount),
            total_payment_amount: round(self.total_payment_amount),
            amount_due: round(self.amount_due),
            balances: self
                .balances
                .iter()
                .map(|balance| MemberBalance {
                    member_id: balance.member_id,
                    name: balance.name.clone(),
                    share_total: round(balance.share_total),
                    expenses_paid: round(balance.expenses_paid),
                    payments_sent: round(balance.payments_sent),
                    payments_received: round(balance.payments_received),
                    amount_owed: round(balance.amount_owed),
                    net_balance: round(balance.net_balance),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberView {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseView {
    pub id: Uuid,
    pub description: String,
    pub amount: Money,
    pub split_type: SplitType,
    pub paid_by: Uuid,
    pub participants: Vec<ParticipantShare>,
}

/// One participant's computed share of an expense.
///
/// `percentual_share` is set only for percentage splits and `exact_share`
/// only for exact-amount splits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantShare {
    pub member_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentual_share: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_share: Option<Money>,
    pub share: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentView {
    pub id: Uuid,
    pub sender: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Uuid>,
    pub amount: Money,
}

/// Per-member position within a group.
///
/// `amount_owed` is the member's expense shares net of their payments;
/// `net_balance` is what the member fronted minus `amount_owed`, positive
/// when the rest of the group owes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberBalance {
    pub member_id: Uuid,
    pub name: String,
    pub share_total: Money,
    pub expenses_paid: Money,
    pub payments_sent: Money,
    pub payments_received: Money,
    pub amount_owed: Money,
    pub net_balance: Money,
}
