//! Shared traits, the money type, and policy enums for group accounting.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Monetary amounts are base-10 decimals end to end.
pub type Money = Decimal;

/// Exposes a stable identifier for entities stored in a group.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving monetary amounts.
pub trait Amounted {
    fn amount(&self) -> Money;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Sums the amounts of any collection of [`Amounted`] records.
///
/// Returns `None` when the total does not fit in [`Money`].
pub fn total_amount<'a, T, I>(items: I) -> Option<Money>
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .try_fold(Money::ZERO, |total, item| total.checked_add(item.amount()))
}

/// Selects how recorded payments move member balances.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SettlementModel {
    /// A payment is a transfer from a sender to a specific receiver.
    #[default]
    Transfer,
    /// A payment is a single member paying into the shared pool.
    Pool,
}

impl SettlementModel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "transfer" => Some(SettlementModel::Transfer),
            "pool" => Some(SettlementModel::Pool),
            _ => None,
        }
    }
}

impl fmt::Display for SettlementModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SettlementModel::Transfer => "transfer",
            SettlementModel::Pool => "pool",
        };
        f.write_str(label)
    }
}

/// Rounding rule applied when money is presented.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    #[default]
    HalfEven,
    HalfUp,
    Truncate,
}

impl RoundingMode {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::Truncate => RoundingStrategy::ToZero,
        }
    }
}

/// Scale and rounding rule used for presentation; never applied mid-calculation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundingPolicy {
    pub scale: u32,
    pub mode: RoundingMode,
}

impl RoundingPolicy {
    pub fn new(scale: u32, mode: RoundingMode) -> Self {
        Self { scale, mode }
    }

    pub fn apply(&self, amount: Money) -> Money {
        amount.round_dp_with_strategy(self.scale, self.mode.strategy())
    }
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        Self::new(2, RoundingMode::HalfEven)
    }
}
