use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Billing subject. Every user owns one team created at sign-up.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub stripe_product_id: Option<String>,
    pub plan_name: Option<String>,
    pub subscription_status: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct TeamWithMembers {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<TeamMember>,
}

/// Subscription fields written back after checkout.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionUpdate {
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub stripe_product_id: Option<String>,
    pub plan_name: Option<String>,
    pub subscription_status: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ActivityLog {
    pub id: Uuid,
    pub action: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub ip_address: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    SignUp,
    SignIn,
    DeleteAccount,
    CreateTeam,
    AnalyzeMeal,
    UpdateMeal,
    DeleteMeal,
    UpdateSubscription,
}

impl ActivityType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityType::SignUp => "SIGN_UP",
            ActivityType::SignIn => "SIGN_IN",
            ActivityType::DeleteAccount => "DELETE_ACCOUNT",
            ActivityType::CreateTeam => "CREATE_TEAM",
            ActivityType::AnalyzeMeal => "ANALYZE_MEAL",
            ActivityType::UpdateMeal => "UPDATE_MEAL",
            ActivityType::DeleteMeal => "DELETE_MEAL",
            ActivityType::UpdateSubscription => "UPDATE_SUBSCRIPTION",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
