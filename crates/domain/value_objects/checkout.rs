use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Body sent to the checkout function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutModel {
    pub product_price_id: String,
    pub success_url: String,
    pub customer_email: String,
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutSessionModel {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCheckoutRequest {
    pub price_id: String,
}
