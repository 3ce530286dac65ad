use serde::Serialize;

use crate::domain::value_objects::{
    guides::{GenerationStepDto, MarketingFeatureDto, generation_steps, marketing_features},
    plans::PricingDto,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingDto {
    pub signed_in_email: Option<String>,
    pub features: Vec<MarketingFeatureDto>,
    pub steps: Vec<GenerationStepDto>,
    pub pricing: PricingDto,
}

impl LandingDto {
    pub fn new(signed_in_email: Option<String>, pricing: PricingDto) -> Self {
        Self {
            signed_in_email,
            features: marketing_features(),
            steps: generation_steps(),
            pricing,
        }
    }
}
