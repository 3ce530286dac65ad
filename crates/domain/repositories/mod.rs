pub mod auth_provider;
pub mod checkout;
pub mod plans;
pub mod subscriptions;
