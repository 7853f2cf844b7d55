//! Suggests the transfers that would square up a group.

use serde::{Deserialize, Serialize};
use split_domain::{Money, RoundingPolicy};
use tracing::debug;
use uuid::Uuid;

use crate::view::DetailedGroupView;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettlementTransfer {
    pub from: Uuid,
    pub to: Uuid,
    pub amount: Money,
}

pub struct SettlementService;

impl SettlementService {
    /// Pairs debtors with creditors until one side runs out.
    ///
    /// Net balances are rounded with `policy` first, so every suggested
    /// amount is payable. Residue left after matching is dropped.
    pub fn suggest(view: &DetailedGroupView, policy: RoundingPolicy) -> Vec<SettlementTransfer> {
        let mut debtors = Vec::new();
        let mut creditors = Vec::new();
        for (position, balance) in view.balances.iter().enumerate() {
            let net = policy.apply(balance.net_balance);
            if net > Money::ZERO {
                creditors.push(Position::new(balance.member_id, position, net));
            } else if net < Money::ZERO {
                debtors.push(Position::new(balance.member_id, position, -net));
            }
        }

        // Largest at the back; earlier group members win ties.
        let order = |a: &Position, b: &Position| {
            a.remaining
                .cmp(&b.remaining)
                .then_with(|| b.position.cmp(&a.position))
        };
        debtors.sort_by(order);
        creditors.sort_by(order);

        let mut transfers = Vec::new();
        while let (Some(debtor), Some(creditor)) = (debtors.last_mut(), creditors.last_mut()) {
            let amount = debtor.remaining.min(creditor.remaining);
            transfers.push(SettlementTransfer {
                from: debtor.member_id,
                to: creditor.member_id,
                amount,
            });
            debtor.remaining -= amount;
            creditor.remaining -= amount;
            let debtor_done = debtor.remaining.is_zero();
            let creditor_done = creditor.remaining.is_zero();
            if debtor_done {
                debtors.pop();
            }
            if creditor_done {
                creditors.pop();
            }
        }

        let residue = debtors
            .iter()
            .chain(creditors.iter())
            .try_fold(Money::ZERO, |total, entry| total.checked_add(entry.remaining));
        debug!(
            group_id = %view.id,
            transfers = transfers.len(),
            residue = ?residue,
            "settlement suggested"
        );
        transfers
    }
}

#[derive(Debug, Clone, Copy)]
struct Position {
    member_id: Uuid,
    position: usize,
    remaining: Money,
}

impl Position {
    fn new(member_id: Uuid, position: usize, remaining: Money) -> Self {
        Self {
            member_id,
            position,
            remaining,
        }
    }
}
