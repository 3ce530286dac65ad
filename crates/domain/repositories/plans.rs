use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::plans::PlanEntity;

#[async_trait]
#[automock]
pub trait PlanCatalog {
    async fn list_plans(&self) -> Result<Vec<PlanEntity>>;
}
