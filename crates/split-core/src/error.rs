use std::io;

use split_domain::Money;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Group not found: {0}")]
    GroupNotFound(Uuid),
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),
    #[error("Member {0} is already part of the group")]
    DuplicateMember(Uuid),
    #[error("Member {0} is still referenced by expenses or payments")]
    MemberInUse(Uuid),
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),
    #[error("Data integrity violation: {0}")]
    Integrity(#[from] IntegrityError),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Upstream data breaks an invariant the balance calculation depends on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("expense {expense} has no participants")]
    EmptyParticipants { expense: Uuid },
    #[error("member {member} appears more than once in expense {expense}")]
    DuplicateParticipant { expense: Uuid, member: Uuid },
    #[error("member {member} has a {percent}% share in expense {expense}; shares must be 0-100")]
    PercentOutOfRange {
        expense: Uuid,
        member: Uuid,
        percent: u8,
    },
    #[error("percentage shares of expense {expense} sum to {actual}, expected 100")]
    PercentageSumMismatch { expense: Uuid, actual: u32 },
    #[error("exact shares of expense {expense} sum to {actual}, expected {expected}")]
    ExactSumMismatch {
        expense: Uuid,
        expected: Money,
        actual: Money,
    },
    #[error("member {member} has a negative share in expense {expense}")]
    NegativeShare { expense: Uuid, member: Uuid },
    #[error("amounts of record {record} overflow the supported decimal range")]
    AmountOverflow { record: Uuid },
    #[error("record {record} has non-positive amount {amount}")]
    NonPositiveAmount { record: Uuid, amount: Money },
    #[error("record {record} references unknown member {member}")]
    UnknownMember { record: Uuid, member: Uuid },
    #[error("member {0} is listed more than once in the group")]
    DuplicateMember(Uuid),
    #[error("record {record} belongs to group {owner}, not {group}")]
    ForeignRecord {
        record: Uuid,
        owner: Uuid,
        group: Uuid,
    },
    #[error("payment {payment} has no receiver under the transfer model")]
    MissingReceiver { payment: Uuid },
    #[error("payment {payment} sends money from a member to themselves")]
    SelfTransfer { payment: Uuid },
}
