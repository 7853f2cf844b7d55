//! Writing-side helpers that keep a group consistent before it is ever balanced.

use split_domain::{Expense, Group, Member, Payment, SettlementModel};
use tracing::info;
use uuid::Uuid;

use crate::{
    integrity::{validate_expense, validate_payment},
    CoreError,
};

/// Provides constructor and mutation helpers for [`Group`] instances.
pub struct GroupService;

impl GroupService {
    /// Creates a new, empty group.
    pub fn create(name: impl Into<String>) -> Group {
        let group = Group::new(name);
        info!(group_id = %group.id, name = %group.name, "group created");
        group
    }

    pub fn rename(group: &mut Group, new_name: impl Into<String>) {
        group.name = new_name.into();
        group.touch();
    }

    /// Adds a member and returns its identifier.
    pub fn add_member(group: &mut Group, member: Member) -> Result<Uuid, CoreError> {
        if group.has_member(member.id) {
            return Err(CoreError::DuplicateMember(member.id));
        }
        let id = member.id;
        group.members.push(member);
        group.touch();
        Ok(id)
    }

    /// Removes a member that no expense or payment refers to.
    pub fn remove_member(group: &mut Group, member_id: Uuid) -> Result<Member, CoreError> {
        let index = group
            .members
            .iter()
            .position(|member| member.id == member_id)
            .ok_or(CoreError::MemberNotFound(member_id))?;
        if group.member_is_referenced(member_id) {
            return Err(CoreError::MemberInUse(member_id));
        }
        let member = group.members.remove(index);
        group.touch();
        Ok(member)
    }

    /// Attaches `expense` to the group after validating its split.
    pub fn add_expense(group: &mut Group, mut expense: Expense) -> Result<Uuid, CoreError> {
        expense.group_id = group.id;
        if group.expense(expense.id).is_some() {
            return Err(CoreError::InvalidOperation(format!(
                "expense {} already recorded",
                expense.id
            )));
        }
        validate_expense(group, &expense)?;
        let id = expense.id;
        group.expenses.push(expense);
        group.touch();
        Ok(id)
    }

    /// Applies `update` to a copy of the expense and keeps it only if it stays valid.
    pub fn update_expense<F>(group: &mut Group, expense_id: Uuid, update: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Expense),
    {
        let index = group
            .expenses
            .iter()
            .position(|expense| expense.id == expense_id)
            .ok_or(CoreError::ExpenseNotFound(expense_id))?;
        let mut candidate = group.expenses[index].clone();
        update(&mut candidate);
        candidate.id = expense_id;
        candidate.group_id = group.id;
        validate_expense(group, &candidate)?;
        group.expenses[index] = candidate;
        group.touch();
        Ok(())
    }

    pub fn remove_expense(group: &mut Group, expense_id: Uuid) -> Result<Expense, CoreError> {
        let index = group
            .expenses
            .iter()
            .position(|expense| expense.id == expense_id)
            .ok_or(CoreError::ExpenseNotFound(expense_id))?;
        let expense = group.expenses.remove(index);
        group.touch();
        Ok(expense)
    }

    /// Records a payment, validated under the settlement model the group uses.
    pub fn record_payment(
        group: &mut Group,
        mut payment: Payment,
        model: SettlementModel,
    ) -> Result<Uuid, CoreError> {
        payment.group_id = group.id;
        if group.payment(payment.id).is_some() {
            return Err(CoreError::InvalidOperation(format!(
                "payment {} already recorded",
                payment.id
            )));
        }
        validate_payment(group, &payment, model)?;
        let id = payment.id;
        group.payments.push(payment);
        group.touch();
        Ok(id)
    }

    pub fn remove_payment(group: &mut Group, payment_id: Uuid) -> Result<Payment, CoreError> {
        let index = group
            .payments
            .iter()
            .position(|payment| payment.id == payment_id)
            .ok_or(CoreError::PaymentNotFound(payment_id))?;
        let payment = group.payments.remove(index);
        group.touch();
        Ok(payment)
    }
}
