use serde::Serialize;

use crate::domain::entities::plans::PlanEntity;

pub const PLANS_LOAD_FAILED: &str = "Failed to load plans. Please try again later.";

const DEFAULT_PLAN_NAME: &str = "Basic";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanPriceDto {
    pub id: String,
    pub formatted: String,
    pub interval: Option<String>,
}

/// One pricing card as shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanCardDto {
    pub id: String,
    pub name: String,
    pub available: bool,
    pub interval_label: String,
    pub price: Option<PlanPriceDto>,
    pub features: Vec<String>,
    pub checkout_price_id: Option<String>,
    pub checkout_enabled: bool,
}

impl From<PlanEntity> for PlanCardDto {
    fn from(plan: PlanEntity) -> Self {
        // A price without an amount is shown as no price at all.
        let price = plan.first_price().and_then(|price| {
            price.price_amount.map(|amount| PlanPriceDto {
                id: price.id.clone(),
                formatted: format_currency(amount, &price.price_currency),
                interval: price.recurring_interval.clone(),
            })
        });
        let checkout_price_id = price.as_ref().map(|price| price.id.clone());

        Self {
            name: plan
                .name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string()),
            available: !plan.is_archived,
            interval_label: interval_label(plan.is_recurring, plan.recurring_interval.as_deref()),
            features: feature_bullets(plan.description.as_deref()),
            checkout_enabled: checkout_price_id.is_some(),
            checkout_price_id,
            price,
            id: plan.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBannerDto {
    pub message: String,
    pub dismissible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingDto {
    pub plans: Vec<PlanCardDto>,
    pub error: Option<ErrorBannerDto>,
}

impl PricingDto {
    /// An empty catalog is shown the same way as a failed fetch.
    pub fn loaded(plans: Vec<PlanEntity>) -> Self {
        if plans.is_empty() {
            return Self::failed();
        }

        Self {
            plans: plans.into_iter().map(PlanCardDto::from).collect(),
            error: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            plans: Vec::new(),
            error: Some(ErrorBannerDto {
                message: PLANS_LOAD_FAILED.to_string(),
                dismissible: true,
            }),
        }
    }
}

/// Splits a newline-delimited description into feature bullets. Lines are trimmed and
/// blank lines dropped so trailing newlines never render empty bullets.
pub fn feature_bullets(description: Option<&str>) -> Vec<String> {
    description
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn interval_label(is_recurring: bool, interval: Option<&str>) -> String {
    if !is_recurring {
        return "One-time".to_string();
    }

    match interval.map(str::trim).filter(|value| !value.is_empty()) {
        // Plain suffixing would give "Dayly".
        Some("day") => "Daily".to_string(),
        Some(value) => {
            let mut chars = value.chars();
            match chars.next() {
                Some(first) => format!("{}{}ly", first.to_uppercase(), chars.as_str()),
                None => "Recurring".to_string(),
            }
        }
        None => "Recurring".to_string(),
    }
}

/// Formats an amount in minor units, e.g. `1900, "usd"` -> `$19.00`.
pub fn format_currency(amount_minor: i64, currency: &str) -> String {
    let code = currency.trim().to_uppercase();
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    let units = group_thousands(abs / 100);
    let cents = abs % 100;

    let prefix = match code.as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        "INR" => "₹".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        _ => format!("{} ", code),
    };

    format!("{sign}{prefix}{units}.{cents:02}")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
