use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    entities::subscriptions::SubscriptionEntity,
    value_objects::{enums::subscription_statuses::SubscriptionStatus, iam::AuthProviderUser},
};

const DEFAULT_SUBSCRIPTION_PLAN_NAME: &str = "Premium";
const MISSING_DATE: &str = "N/A";

pub const DESKTOP_APP_FEATURES: [&str; 5] = [
    "Bulk content processing",
    "Advanced metadata customization",
    "Offline processing capability",
    "Export in multiple formats",
    "Content performance tracking",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallToActionDto {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubscriptionPanelDto {
    Active {
        title: String,
        message: String,
        plan_name: String,
        status: String,
        started: String,
        next_billing: String,
    },
    Inactive {
        title: String,
        message: String,
        call_to_action: CallToActionDto,
    },
}

impl SubscriptionPanelDto {
    /// Active only when the latest row says `active`; anything else, including no row,
    /// falls back to the call-to-action panel.
    pub fn from_latest(subscription: Option<&SubscriptionEntity>) -> Self {
        match subscription {
            Some(subscription)
                if SubscriptionStatus::from_str(&subscription.status).is_active() =>
            {
                SubscriptionPanelDto::Active {
                    title: "Active Subscription".to_string(),
                    message: "Your subscription is active and in good standing.".to_string(),
                    plan_name: subscription
                        .plan_name()
                        .unwrap_or(DEFAULT_SUBSCRIPTION_PLAN_NAME)
                        .to_string(),
                    status: subscription.status.clone(),
                    started: format_date(subscription.started_at),
                    next_billing: format_date(subscription.current_period_end),
                }
            }
            _ => SubscriptionPanelDto::Inactive {
                title: "No Active Subscription".to_string(),
                message: "You don't have an active subscription. Subscribe to access the desktop app."
                    .to_string(),
                call_to_action: CallToActionDto {
                    label: "View Subscription Plans".to_string(),
                    href: "/".to_string(),
                },
            },
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionPanelDto::Active { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesktopAppDto {
    pub features: Vec<String>,
    pub download_enabled: bool,
    pub button_label: String,
    pub note: Option<String>,
}

impl DesktopAppDto {
    pub fn for_subscription(active: bool) -> Self {
        Self {
            features: DESKTOP_APP_FEATURES.iter().map(|f| f.to_string()).collect(),
            download_enabled: active,
            button_label: if active {
                "Download Desktop App".to_string()
            } else {
                "Subscription Required".to_string()
            },
            note: (!active)
                .then(|| "Active subscription required to download the app".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfileDto {
    pub full_name: String,
    pub email: String,
    pub avatar_seed: String,
    pub avatar_initial: Option<String>,
    pub account_created: String,
    pub last_sign_in: String,
}

impl UserProfileDto {
    pub fn from_provider_user(user: &AuthProviderUser) -> Self {
        Self::build(
            user.full_name(),
            user.email.as_deref(),
            user.created_at,
            user.last_sign_in_at,
        )
    }

    /// Profile built from the session token alone when the provider lookup fails.
    pub fn from_email(email: Option<&str>) -> Self {
        Self::build(None, email, None, None)
    }

    fn build(
        full_name: Option<&str>,
        email: Option<&str>,
        created_at: Option<DateTime<Utc>>,
        last_sign_in_at: Option<DateTime<Utc>>,
    ) -> Self {
        let email = email.unwrap_or_default().to_string();
        Self {
            full_name: full_name.unwrap_or("Not provided").to_string(),
            avatar_seed: email.clone(),
            avatar_initial: email.chars().next().map(|c| c.to_uppercase().to_string()),
            email,
            account_created: format_date(created_at),
            last_sign_in: format_date(last_sign_in_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardDto {
    pub subscription: SubscriptionPanelDto,
    pub desktop_app: DesktopAppDto,
    pub profile: UserProfileDto,
}

/// Long US date, e.g. `June 5, 2024`.
pub fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(timestamp) => timestamp.format("%B %-d, %Y").to_string(),
        None => MISSING_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use uuid::Uuid;

    fn subscription(status: &str, metadata: Option<serde_json::Value>) -> SubscriptionEntity {
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status: status.to_string(),
            metadata,
            started_at: Some(Utc.with_ymd_and_hms(2024, 6, 5, 10, 0, 0).unwrap()),
            current_period_end: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn active_row_renders_active_panel() {
        let row = subscription("active", Some(json!({ "plan_name": "Pro" })));

        match SubscriptionPanelDto::from_latest(Some(&row)) {
            SubscriptionPanelDto::Active {
                plan_name,
                started,
                next_billing,
                ..
            } => {
                assert_eq!(plan_name, "Pro");
                assert_eq!(started, "June 5, 2024");
                assert_eq!(next_billing, "N/A");
            }
            other => panic!("expected active panel, got {other:?}"),
        }
    }

    #[test]
    fn active_row_without_plan_name_falls_back() {
        let row = subscription("active", None);
        let panel = SubscriptionPanelDto::from_latest(Some(&row));
        assert!(matches!(
            panel,
            SubscriptionPanelDto::Active { ref plan_name, .. } if plan_name == "Premium"
        ));
    }

    #[test]
    fn other_statuses_render_call_to_action() {
        for status in ["canceled", "past_due", "trialing", ""] {
            let row = subscription(status, None);
            let panel = SubscriptionPanelDto::from_latest(Some(&row));
            match panel {
                SubscriptionPanelDto::Inactive { call_to_action, .. } => {
                    assert_eq!(call_to_action.href, "/");
                }
                other => panic!("expected inactive panel for {status}, got {other:?}"),
            }
        }

        assert!(!SubscriptionPanelDto::from_latest(None).is_active());
    }

    #[test]
    fn desktop_app_requires_active_subscription() {
        let locked = DesktopAppDto::for_subscription(false);
        assert!(!locked.download_enabled);
        assert_eq!(locked.button_label, "Subscription Required");
        assert!(locked.note.is_some());

        let unlocked = DesktopAppDto::for_subscription(true);
        assert!(unlocked.download_enabled);
        assert!(unlocked.note.is_none());
    }

    #[test]
    fn profile_from_email_uses_fallbacks() {
        let profile = UserProfileDto::from_email(Some("ada@example.com"));
        assert_eq!(profile.full_name, "Not provided");
        assert_eq!(profile.avatar_initial.as_deref(), Some("A"));
        assert_eq!(profile.last_sign_in, "N/A");
    }
}
