use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Envelope returned by the plan-listing function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanListing {
    #[serde(default)]
    pub items: Vec<PlanEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntity {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recurring_interval: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_recurring: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_archived: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Absent or null on some plans; treated as "no price".
    #[serde(default)]
    pub prices: Option<Vec<PlanPriceEntity>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPriceEntity {
    pub id: String,
    /// Minor currency units. Null for custom or free prices, which show no price.
    #[serde(default)]
    pub price_amount: Option<i64>,
    #[serde(default = "default_currency", deserialize_with = "null_as_currency")]
    pub price_currency: String,
    #[serde(default)]
    pub recurring_interval: Option<String>,
    #[serde(default)]
    pub amount_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_archived: bool,
}

fn default_currency() -> String {
    "usd".to_string()
}

/// `#[serde(default)]` only covers a missing key; the plan function also sends explicit nulls.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_currency))
}

impl PlanEntity {
    pub fn first_price(&self) -> Option<&PlanPriceEntity> {
        self.prices.as_ref().and_then(|prices| prices.first())
    }
}
