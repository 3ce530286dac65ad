use std::sync::Arc;

use crates::domain::{
    repositories::plans::PlanCatalog,
    value_objects::{landing::LandingDto, plans::PricingDto},
};
use tracing::{error, info};

pub struct PlansUseCase<P>
where
    P: PlanCatalog + Send + Sync + 'static,
{
    plan_catalog: Arc<P>,
}

impl<P> PlansUseCase<P>
where
    P: PlanCatalog + Send + Sync + 'static,
{
    pub fn new(plan_catalog: Arc<P>) -> Self {
        Self { plan_catalog }
    }

    /// Never fails: a broken or empty catalog turns into zero cards and a dismissible banner.
    pub async fn pricing(&self) -> PricingDto {
        match self.plan_catalog.list_plans().await {
            Ok(plans) => {
                info!(plan_count = plans.len(), "plans: plan listing loaded");
                PricingDto::loaded(plans)
            }
            Err(err) => {
                error!(error = ?err, "plans: failed to fetch plans");
                PricingDto::failed()
            }
        }
    }

    pub async fn landing(&self, signed_in_email: Option<String>) -> LandingDto {
        LandingDto::new(signed_in_email, self.pricing().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::{
        entities::plans::{PlanEntity, PlanPriceEntity},
        repositories::plans::MockPlanCatalog,
        value_objects::plans::PLANS_LOAD_FAILED,
    };

    fn plan(id: &str) -> PlanEntity {
        PlanEntity {
            id: id.to_string(),
            name: Some("Pro".to_string()),
            description: Some("Unlimited titles".to_string()),
            recurring_interval: Some("month".to_string()),
            is_recurring: true,
            is_archived: false,
            created_at: None,
            metadata: serde_json::Value::Null,
            prices: Some(vec![PlanPriceEntity {
                id: format!("{id}_price"),
                price_amount: Some(1900),
                price_currency: "usd".to_string(),
                recurring_interval: Some("month".to_string()),
                amount_type: None,
                is_archived: false,
            }]),
        }
    }

    #[tokio::test]
    async fn lists_plans_as_cards() {
        let mut plan_catalog = MockPlanCatalog::new();
        plan_catalog
            .expect_list_plans()
            .times(1)
            .returning(|| Box::pin(async move { Ok(vec![plan("prod_a"), plan("prod_b")]) }));

        let usecase = PlansUseCase::new(Arc::new(plan_catalog));
        let pricing = usecase.pricing().await;

        assert_eq!(pricing.plans.len(), 2);
        assert!(pricing.error.is_none());
        assert_eq!(
            pricing.plans[1].checkout_price_id.as_deref(),
            Some("prod_b_price")
        );
    }

    #[tokio::test]
    async fn failed_fetch_renders_no_cards_and_banner() {
        let mut plan_catalog = MockPlanCatalog::new();
        plan_catalog
            .expect_list_plans()
            .returning(|| Box::pin(async move { Err(anyhow::anyhow!("function timed out")) }));

        let usecase = PlansUseCase::new(Arc::new(plan_catalog));
        let pricing = usecase.pricing().await;

        assert!(pricing.plans.is_empty());
        let banner = pricing.error.expect("banner expected");
        assert_eq!(banner.message, PLANS_LOAD_FAILED);
        assert!(banner.dismissible);
    }

    #[tokio::test]
    async fn empty_listing_renders_no_cards_and_banner() {
        let mut plan_catalog = MockPlanCatalog::new();
        plan_catalog
            .expect_list_plans()
            .returning(|| Box::pin(async move { Ok(Vec::new()) }));

        let usecase = PlansUseCase::new(Arc::new(plan_catalog));
        let landing = usecase.landing(Some("ada@example.com".to_string())).await;

        assert!(landing.pricing.plans.is_empty());
        assert_eq!(
            landing.pricing.error.map(|banner| banner.message).as_deref(),
            Some(PLANS_LOAD_FAILED)
        );
        assert_eq!(landing.features.len(), 4);
        assert_eq!(landing.steps.len(), 3);
    }
}
