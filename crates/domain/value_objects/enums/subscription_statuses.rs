/// Status text stored on a subscription row. Only `active` unlocks the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
    Unpaid,
    Unknown,
}

impl SubscriptionStatus {
    /// Exact match only: padded or differently cased text is `Unknown`.
    pub fn from_str(value: &str) -> Self {
        match value {
            "active" => SubscriptionStatus::Active,
            "trialing" => SubscriptionStatus::Trialing,
            "past_due" => SubscriptionStatus::PastDue,
            "canceled" | "cancelled" => SubscriptionStatus::Canceled,
            "incomplete" => SubscriptionStatus::Incomplete,
            "unpaid" => SubscriptionStatus::Unpaid,
            _ => SubscriptionStatus::Unknown,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_active_is_active() {
        assert!(SubscriptionStatus::from_str("active").is_active());
        assert!(!SubscriptionStatus::from_str("trialing").is_active());
        assert!(!SubscriptionStatus::from_str("Active").is_active());
        assert!(!SubscriptionStatus::from_str(" active ").is_active());
        assert!(!SubscriptionStatus::from_str("active\n").is_active());
        assert_eq!(
            SubscriptionStatus::from_str("paused"),
            SubscriptionStatus::Unknown
        );
    }
}
