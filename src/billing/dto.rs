use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingPlan {
    pub name: String,
    /// Price in cents.
    pub price: i64,
    pub interval: String,
    pub trial_days: i64,
    pub features: Vec<&'static str>,
    pub price_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequestBody {
    pub price_id: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutCompleteQuery {
    pub session_id: Option<String>,
}
