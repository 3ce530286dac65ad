pub mod accounts;
pub mod checkout;
pub mod dashboard;
pub mod downloads;
pub mod guides;
pub mod plans;
