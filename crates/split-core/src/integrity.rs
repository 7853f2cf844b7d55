//! Data-integrity guards run before any balance arithmetic.
//!
//! Each split strategy has its own validator. [`validate_group`] stops at the
//! first violation; [`integrity_report`] collects the first violation of every
//! record so callers can show them all at once.

use std::collections::HashSet;

use split_domain::{
    ExactShare, Expense, Group, Money, Payment, PercentageShare, SettlementModel, Split,
};
use uuid::Uuid;

use crate::IntegrityError;

/// Even splits need at least one participant, each listed once.
pub fn validate_even(expense: Uuid, participants: &[Uuid]) -> Result<(), IntegrityError> {
    ensure_unique(expense, participants.iter().copied())
}

/// Percentage splits need shares within 0-100 that sum to exactly 100.
pub fn validate_percentage(
    expense: Uuid,
    shares: &[PercentageShare],
) -> Result<(), IntegrityError> {
    ensure_unique(expense, shares.iter().map(|share| share.member_id))?;
    if let Some(share) = shares.iter().find(|share| share.percent > 100) {
        return Err(IntegrityError::PercentOutOfRange {
            expense,
            member: share.member_id,
            percent: share.percent,
        });
    }
    let actual: u32 = shares.iter().map(|share| u32::from(share.percent)).sum();
    if actual != 100 {
        return Err(IntegrityError::PercentageSumMismatch { expense, actual });
    }
    Ok(())
}

/// Exact splits need non-negative shares that sum to the expense amount.
pub fn validate_exact(
    expense: Uuid,
    amount: Money,
    shares: &[ExactShare],
) -> Result<(), IntegrityError> {
    ensure_unique(expense, shares.iter().map(|share| share.member_id))?;
    if let Some(share) = shares.iter().find(|share| share.amount.is_sign_negative()) {
        return Err(IntegrityError::NegativeShare {
            expense,
            member: share.member_id,
        });
    }
    let actual = shares
        .iter()
        .try_fold(Money::ZERO, |total, share| total.checked_add(share.amount))
        .ok_or(IntegrityError::AmountOverflow { record: expense })?;
    if actual != amount {
        return Err(IntegrityError::ExactSumMismatch {
            expense,
            expected: amount,
            actual,
        });
    }
    Ok(())
}

/// Dispatches to the validator matching the expense's split strategy.
pub fn validate_split(expense: &Expense) -> Result<(), IntegrityError> {
    match &expense.split {
        Split::Even { participants } => validate_even(expense.id, participants),
        Split::Percentage { shares } => validate_percentage(expense.id, shares),
        Split::ExactAmount { shares } => validate_exact(expense.id, expense.amount, shares),
    }
}

/// Checks one expense against the group it is about to join or already belongs to.
pub fn validate_expense(group: &Group, expense: &Expense) -> Result<(), IntegrityError> {
    GroupCheck::new(group, SettlementModel::default()).expense(expense)
}

/// Checks one payment against the group under the given settlement model.
pub fn validate_payment(
    group: &Group,
    payment: &Payment,
    model: SettlementModel,
) -> Result<(), IntegrityError> {
    GroupCheck::new(group, model).payment(payment)
}

/// Fails with the first integrity violation found in `group`.
pub fn validate_group(group: &Group, model: SettlementModel) -> Result<(), IntegrityError> {
    let check = GroupCheck::new(group, model);
    let first = check.violations().next();
    match first {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Lists every member-level violation and the first violation of each record.
pub fn integrity_report(group: &Group, model: SettlementModel) -> Vec<IntegrityError> {
    let check = GroupCheck::new(group, model);
    let report = check.violations().collect();
    report
}

struct GroupCheck<'a> {
    group: &'a Group,
    known: HashSet<Uuid>,
    model: SettlementModel,
}

impl<'a> GroupCheck<'a> {
    fn new(group: &'a Group, model: SettlementModel) -> Self {
        Self {
            group,
            known: group.members.iter().map(|member| member.id).collect(),
            model,
        }
    }

    fn violations(&self) -> impl Iterator<Item = IntegrityError> + '_ {
        let mut seen = HashSet::new();
        let duplicates = self
            .group
            .members
            .iter()
            .filter(move |member| !seen.insert(member.id))
            .map(|member| IntegrityError::DuplicateMember(member.id));
        let expenses = self
            .group
            .expenses
            .iter()
            .filter_map(move |expense| self.expense(expense).err());
        let payments = self
            .group
            .payments
            .iter()
            .filter_map(move |payment| self.payment(payment).err());
        duplicates.chain(expenses).chain(payments)
    }

    fn expense(&self, expense: &Expense) -> Result<(), IntegrityError> {
        self.owned(expense.id, expense.group_id)?;
        positive(expense.id, expense.amount)?;
        self.known_member(expense.id, expense.paid_by)?;
        validate_split(expense)?;
        for member in expense.split.participants() {
            self.known_member(expense.id, member)?;
        }
        Ok(())
    }

    fn payment(&self, payment: &Payment) -> Result<(), IntegrityError> {
        self.owned(payment.id, payment.group_id)?;
        positive(payment.id, payment.amount)?;
        self.known_member(payment.id, payment.sender)?;
        match (self.model, payment.receiver) {
            (SettlementModel::Transfer, None) => {
                Err(IntegrityError::MissingReceiver { payment: payment.id })
            }
            (SettlementModel::Transfer, Some(receiver)) if receiver == payment.sender => {
                Err(IntegrityError::SelfTransfer { payment: payment.id })
            }
            (SettlementModel::Transfer, Some(receiver)) => {
                self.known_member(payment.id, receiver)
            }
            (SettlementModel::Pool, _) => Ok(()),
        }
    }

    fn owned(&self, record: Uuid, owner: Uuid) -> Result<(), IntegrityError> {
        if owner != self.group.id {
            return Err(IntegrityError::ForeignRecord {
                record,
                owner,
                group: self.group.id,
            });
        }
        Ok(())
    }

    fn known_member(&self, record: Uuid, member: Uuid) -> Result<(), IntegrityError> {
        if !self.known.contains(&member) {
            return Err(IntegrityError::UnknownMember { record, member });
        }
        Ok(())
    }
}

fn positive(record: Uuid, amount: Money) -> Result<(), IntegrityError> {
    if amount <= Money::ZERO {
        return Err(IntegrityError::NonPositiveAmount { record, amount });
    }
    Ok(())
}

fn ensure_unique(
    expense: Uuid,
    members: impl Iterator<Item = Uuid>,
) -> Result<(), IntegrityError> {
    let mut seen = HashSet::new();
    let mut empty = true;
    for member in members {
        empty = false;
        if !seen.insert(member) {
            return Err(IntegrityError::DuplicateParticipant { expense, member });
        }
    }
    if empty {
        return Err(IntegrityError::EmptyParticipants { expense });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use split_domain::Member;

    fn group_with(names: &[&str]) -> (Group, Vec<Uuid>) {
        let mut group = Group::new("Integrity");
        let ids = names
            .iter()
            .map(|name| {
                let member = Member::new(*name);
                let id = member.id;
                group.members.push(member);
                id
            })
            .collect();
        (group, ids)
    }

    #[test]
    fn even_split_without_participants_is_rejected() {
        let expense = Uuid::new_v4();
        assert_eq!(
            validate_even(expense, &[]),
            Err(IntegrityError::EmptyParticipants { expense })
        );
    }

    #[test]
    fn percentage_split_must_total_one_hundred() {
        let expense = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let shares = [PercentageShare::new(a, 60), PercentageShare::new(b, 30)];

        assert_eq!(
            validate_percentage(expense, &shares),
            Err(IntegrityError::PercentageSumMismatch { expense, actual: 90 })
        );
    }

    #[test]
    fn percentage_share_above_one_hundred_is_out_of_range() {
        let expense = Uuid::new_v4();
        let member = Uuid::new_v4();
        let shares = [PercentageShare::new(member, 120)];

        assert!(matches!(
            validate_percentage(expense, &shares),
            Err(IntegrityError::PercentOutOfRange { percent: 120, .. })
        ));
    }

    #[test]
    fn exact_split_must_match_expense_amount() {
        let expense = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let shares = [ExactShare::new(a, dec!(10)), ExactShare::new(b, dec!(15.5))];

        assert!(validate_exact(expense, dec!(25.50), &shares).is_ok());
        assert_eq!(
            validate_exact(expense, dec!(30), &shares),
            Err(IntegrityError::ExactSumMismatch {
                expense,
                expected: dec!(30),
                actual: dec!(25.5),
            })
        );
    }

    #[test]
    fn negative_exact_share_is_rejected_even_when_the_sum_matches() {
        let expense = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let shares = [ExactShare::new(a, dec!(-5)), ExactShare::new(b, dec!(25))];

        assert_eq!(
            validate_exact(expense, dec!(20), &shares),
            Err(IntegrityError::NegativeShare { expense, member: a })
        );
    }

    #[test]
    fn exact_shares_that_overflow_are_reported() {
        let expense = Uuid::new_v4();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let shares = [ExactShare::new(a, Money::MAX), ExactShare::new(b, Money::MAX)];

        assert_eq!(
            validate_exact(expense, Money::MAX, &shares),
            Err(IntegrityError::AmountOverflow { record: expense })
        );
    }

    #[test]
    fn payments_must_carry_a_positive_amount() {
        let (group, ids) = group_with(&["Alice", "Bob"]);

        for amount in [Money::ZERO, dec!(-12.5)] {
            let payment = Payment::transfer(group.id, ids[0], ids[1], amount);
            assert_eq!(
                validate_payment(&group, &payment, SettlementModel::Transfer),
                Err(IntegrityError::NonPositiveAmount {
                    record: payment.id,
                    amount,
                })
            );
        }
    }

    #[test]
    fn duplicate_participant_is_reported() {
        let expense = Uuid::new_v4();
        let member = Uuid::new_v4();
        assert_eq!(
            validate_even(expense, &[member, member]),
            Err(IntegrityError::DuplicateParticipant { expense, member })
        );
    }

    #[test]
    fn transfer_payment_needs_a_receiver_but_pool_does_not() {
        let (group, ids) = group_with(&["Alice", "Bob"]);
        let payment = Payment::into_pool(group.id, ids[0], dec!(20));

        assert_eq!(
            validate_payment(&group, &payment, SettlementModel::Transfer),
            Err(IntegrityError::MissingReceiver { payment: payment.id })
        );
        assert!(validate_payment(&group, &payment, SettlementModel::Pool).is_ok());
    }

    #[test]
    fn report_collects_violations_across_records() {
        let (mut group, ids) = group_with(&["Alice", "Bob"]);
        let stranger = Uuid::new_v4();
        group.expenses.push(Expense::even(
            group.id,
            "Dinner",
            dec!(40),
            ids[0],
            [ids[0], stranger],
        ));
        group
            .payments
            .push(Payment::transfer(group.id, ids[1], ids[1], dec!(5)));
        group.payments.push(Payment::transfer(
            Uuid::new_v4(),
            ids[0],
            ids[1],
            dec!(-1),
        ));

        let report = integrity_report(&group, SettlementModel::Transfer);
        assert_eq!(report.len(), 3);
        assert!(matches!(report[0], IntegrityError::UnknownMember { member, .. } if member == stranger));
        assert!(matches!(report[1], IntegrityError::SelfTransfer { .. }));
        assert!(matches!(report[2], IntegrityError::ForeignRecord { .. }));
        assert_eq!(
            validate_group(&group, SettlementModel::Transfer),
            Err(report[0].clone())
        );
    }

    #[test]
    fn duplicate_members_are_reported_once_per_repeat() {
        let (mut group, _) = group_with(&["Alice"]);
        let twin = group.members[0].clone();
        group.members.push(twin.clone());

        assert_eq!(
            integrity_report(&group, SettlementModel::Pool),
            vec![IntegrityError::DuplicateMember(twin.id)]
        );
    }
}
