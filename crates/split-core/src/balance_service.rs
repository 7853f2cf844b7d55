//! The balance calculator: a pure function from a group snapshot to its read model.

use std::collections::HashMap;

use split_domain::{total_amount, Expense, Group, Member, Money, SettlementModel, Split};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    integrity::{validate_group, validate_split},
    storage::GroupStorage,
    view::{DetailedGroupView, ExpenseView, MemberBalance, MemberView, ParticipantShare, PaymentView},
    CoreError, IntegrityError,
};

pub struct BalanceService;

impl BalanceService {
    /// Computes balances under the default transfer settlement model.
    pub fn compute(group: &Group) -> Result<DetailedGroupView, CoreError> {
        Self::compute_with(group, SettlementModel::default())
    }

    /// Computes the detailed view of `group`, treating payments per `model`.
    pub fn compute_with(
        group: &Group,
        model: SettlementModel,
    ) -> Result<DetailedGroupView, CoreError> {
        debug!(
            group_id = %group.id,
            members = group.members.len(),
            expenses = group.expenses.len(),
            payments = group.payments.len(),
            model = %model,
            "computing group balances"
        );
        if let Err(err) = validate_group(group, model) {
            warn!(group_id = %group.id, error = %err, "group failed integrity validation");
            return Err(err.into());
        }

        let mut tallies: HashMap<Uuid, Tally> = group
            .members
            .iter()
            .map(|member| (member.id, Tally::default()))
            .collect();

        let mut expenses = Vec::with_capacity(group.expenses.len());
        for expense in &group.expenses {
            let participants = expense_shares(expense)?;
            let payer = tallies.entry(expense.paid_by).or_default();
            payer.expenses_paid = checked_add(expense.id, payer.expenses_paid, expense.amount)?;
            for participant in &participants {
                let tally = tallies.entry(participant.member_id).or_default();
                tally.share_total = checked_add(expense.id, tally.share_total, participant.share)?;
            }
            expenses.push(ExpenseView {
                id: expense.id,
                description: expense.description.clone(),
                amount: expense.amount,
                split_type: expense.split_type(),
                paid_by: expense.paid_by,
                participants,
            });
        }

        for payment in &group.payments {
            let sender = tallies.entry(payment.sender).or_default();
            sender.payments_sent = checked_add(payment.id, sender.payments_sent, payment.amount)?;
            if let (SettlementModel::Transfer, Some(receiver)) = (model, payment.receiver) {
                let tally = tallies.entry(receiver).or_default();
                tally.payments_received =
                    checked_add(payment.id, tally.payments_received, payment.amount)?;
            }
        }

        let balances = group
            .members
            .iter()
            .map(|member| {
                let tally = tallies.get(&member.id).copied().unwrap_or_default();
                tally.balance(member)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let overflow = IntegrityError::AmountOverflow { record: group.id };
        let total_expense_amount = total_amount(&group.expenses).ok_or(overflow.clone())?;
        let total_payment_amount = total_amount(&group.payments).ok_or(overflow.clone())?;
        let amount_due = total_expense_amount
            .checked_sub(total_payment_amount)
            .ok_or(overflow)?;

        Ok(DetailedGroupView {
            id: group.id,
            name: group.name.clone(),
            settlement_model: model,
            members: group
                .members
                .iter()
                .map(|member| MemberView {
                    id: member.id,
                    name: member.name.clone(),
                })
                .collect(),
            expenses,
            payments: group
                .payments
                .iter()
                .map(|payment| PaymentView {
                    id: payment.id,
                    sender: payment.sender,
                    receiver: payment.receiver,
                    amount: payment.amount,
                })
                .collect(),
            total_expense_amount,
            total_payment_amount,
            amount_due,
            balances,
        })
    }

    /// Loads the group identified by `id` and computes its view.
    pub fn for_group(
        storage: &dyn GroupStorage,
        id: Uuid,
        model: SettlementModel,
    ) -> Result<DetailedGroupView, CoreError> {
        let group = storage
            .find_group(id)?
            .ok_or(CoreError::GroupNotFound(id))?;
        Self::compute_with(&group, model)
    }
}

/// Computes each participant's share of `expense`, in declaration order.
pub fn expense_shares(expense: &Expense) -> Result<Vec<ParticipantShare>, IntegrityError> {
    validate_split(expense)?;
    let shares: Vec<ParticipantShare> = match &expense.split {
        Split::Even { participants } => {
            let each = expense.amount / Money::from(participants.len() as u64);
            participants
                .iter()
                .map(|member_id| ParticipantShare {
                    member_id: *member_id,
                    percentual_share: None,
                    exact_share: None,
                    share: each,
                })
                .collect()
        }
        Split::Percentage { shares } => shares
            .iter()
            .map(|share| {
                Ok(ParticipantShare {
                    member_id: share.member_id,
                    percentual_share: Some(share.percent),
                    exact_share: None,
                    share: percent_of(expense, share.percent)?,
                })
            })
            .collect::<Result<Vec<_>, IntegrityError>>()?,
        Split::ExactAmount { shares } => shares
            .iter()
            .map(|share| ParticipantShare {
                member_id: share.member_id,
                percentual_share: None,
                exact_share: Some(share.amount),
                share: share.amount,
            })
            .collect(),
    };
    Ok(shares)
}

/// Scales by the fraction first so the product never exceeds `expense.amount`.
fn percent_of(expense: &Expense, percent: u8) -> Result<Money, IntegrityError> {
    let fraction = Money::from(percent) / Money::ONE_HUNDRED;
    expense
        .amount
        .checked_mul(fraction)
        .ok_or(IntegrityError::AmountOverflow { record: expense.id })
}

fn checked_add(record: Uuid, total: Money, amount: Money) -> Result<Money, IntegrityError> {
    total
        .checked_add(amount)
        .ok_or(IntegrityError::AmountOverflow { record })
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    share_total: Money,
    expenses_paid: Money,
    payments_sent: Money,
    payments_received: Money,
}

impl Tally {
    fn balance(self, member: &Member) -> Result<MemberBalance, IntegrityError> {
        let overflow = || IntegrityError::AmountOverflow { record: member.id };
        let amount_owed = self
            .share_total
            .checked_sub(self.payments_sent)
            .and_then(|owed| owed.checked_add(self.payments_received))
            .ok_or_else(overflow)?;
        let net_balance = self
            .expenses_paid
            .checked_sub(amount_owed)
            .ok_or_else(overflow)?;
        Ok(MemberBalance {
            member_id: member.id,
            name: member.name.clone(),
            share_total: self.share_total,
            expenses_paid: self.expenses_paid,
            payments_sent: self.payments_sent,
            payments_received: self.payments_received,
            amount_owed,
            net_balance,
        })
    }
}
