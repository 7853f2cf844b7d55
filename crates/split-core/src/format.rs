use split_domain::{Money, RoundingPolicy};

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: Money, currency: &str) -> String;
}

/// Rounds with a [`RoundingPolicy`] and always prints the full scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyFormatter {
    pub policy: RoundingPolicy,
}

impl PolicyFormatter {
    pub fn new(policy: RoundingPolicy) -> Self {
        Self { policy }
    }
}

impl CurrencyFormatter for PolicyFormatter {
    fn format_amount(&self, amount: Money, currency: &str) -> String {
        let mut rounded = self.policy.apply(amount);
        rounded.rescale(self.policy.scale);
        format!("{rounded} {currency}")
    }
}
