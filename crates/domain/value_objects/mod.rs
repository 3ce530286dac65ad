pub mod checkout;
pub mod enums;
pub mod guides;
pub mod iam;
pub mod landing;
pub mod navigation;
pub mod plans;
pub mod subscriptions;
