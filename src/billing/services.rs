use anyhow::Context;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::PricingPlan;
use super::stripe::{CheckoutRequest, CompletedCheckout, Price, Product};
use crate::{
    state::AppState,
    teams::{
        repo as teams_repo,
        repo_types::{ActivityType, SubscriptionUpdate},
        services::record_activity,
    },
};

struct PlanTemplate {
    name: &'static str,
    fallback_price: i64,
    features: &'static [&'static str],
}

const PLANS: [PlanTemplate; 2] = [
    PlanTemplate {
        name: "Base",
        fallback_price: 800,
        features: &[
            "Unlimited Usage",
            "Unlimited Workspace Members",
            "Email Support",
        ],
    },
    PlanTemplate {
        name: "Plus",
        fallback_price: 1200,
        features: &[
            "Everything in Base, and:",
            "Early Access to New Features",
            "24/7 Support + Slack Access",
        ],
    },
];

const FALLBACK_INTERVAL: &str = "month";
const FALLBACK_TRIAL_DAYS: i64 = 7;

/// Matches provider products to the two advertised plans by name.
/// Anything the provider does not know about falls back to the list price.
pub fn pricing_plans(products: &[Product], prices: &[Price]) -> Vec<PricingPlan> {
    PLANS
        .iter()
        .map(|tpl| {
            let product = products.iter().find(|p| p.name == tpl.name);
            let price = product.and_then(|prod| prices.iter().find(|p| p.product_id == prod.id));
            PricingPlan {
                name: product.map_or(tpl.name, |p| p.name.as_str()).to_string(),
                price: price
                    .and_then(|p| p.unit_amount)
                    .filter(|amount| *amount != 0)
                    .unwrap_or(tpl.fallback_price),
                interval: price
                    .and_then(|p| p.interval.clone())
                    .unwrap_or_else(|| FALLBACK_INTERVAL.to_string()),
                trial_days: price
                    .and_then(|p| p.trial_period_days)
                    .filter(|d| *d != 0)
                    .unwrap_or(FALLBACK_TRIAL_DAYS),
                features: tpl.features.to_vec(),
                price_id: price.map(|p| p.id.clone()),
            }
        })
        .collect()
}

pub async fn load_pricing(st: &AppState) -> anyhow::Result<Vec<PricingPlan>> {
    let (prices, products) = tokio::try_join!(st.payments.list_prices(), st.payments.list_products())?;
    Ok(pricing_plans(&products, &prices))
}

/// Creates a hosted checkout for the user's team and returns its URL.
pub async fn start_checkout(st: &AppState, user_id: Uuid, price_id: &str) -> anyhow::Result<String> {
    let team = teams_repo::get_team_for_user(&st.db, user_id)
        .await?
        .context("user has no team")?;
    let base = st.config.base_url.trim_end_matches('/');
    let req = CheckoutRequest {
        price_id: price_id.to_string(),
        client_reference_id: user_id.to_string(),
        customer_id: team.team.stripe_customer_id,
        success_url: format!(
            "{base}/api/billing/checkout/complete?session_id={{CHECKOUT_SESSION_ID}}"
        ),
        cancel_url: format!("{base}/pricing"),
    };
    st.payments.create_checkout_session(&req).await
}

/// Writes the purchased subscription onto the buyer's team.
pub async fn complete_checkout(st: &AppState, session_id: &str) -> anyhow::Result<()> {
    let session = st.payments.retrieve_checkout_session(session_id).await?;
    let team_id = resolve_team(st, &session).await?;

    let subscription_id = session
        .subscription_id
        .clone()
        .context("no subscription found for this session")?;
    let product_id = session
        .product_id
        .clone()
        .context("no product found for this subscription")?;
    let product = st.payments.retrieve_product(&product_id).await?;

    let update = SubscriptionUpdate {
        stripe_customer_id: session.customer_id.clone(),
        stripe_subscription_id: Some(subscription_id),
        stripe_product_id: Some(product.id),
        plan_name: Some(product.name),
        subscription_status: session
            .subscription_status
            .clone()
            .unwrap_or_else(|| "active".into()),
    };
    teams_repo::update_team_subscription(&st.db, team_id, &update).await?;
    info!(%team_id, plan = ?update.plan_name, status = %update.subscription_status, "subscription updated");

    if let Some(user_id) = reference_user(&session) {
        record_activity(st, user_id, ActivityType::UpdateSubscription, None).await;
    }
    Ok(())
}

fn reference_user(session: &CompletedCheckout) -> Option<Uuid> {
    session
        .client_reference_id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id).ok())
}

// the buyer's team by reference id, else by an already linked customer
async fn resolve_team(st: &AppState, session: &CompletedCheckout) -> anyhow::Result<Uuid> {
    if let Some(user_id) = reference_user(session) {
        match teams_repo::get_user_with_team(&st.db, user_id).await? {
            Some((_, Some(team_id))) => return Ok(team_id),
            Some((_, None)) => warn!(%user_id, "checkout user has no team"),
            None => warn!(%user_id, "checkout user not found"),
        }
    }
    let customer = session
        .customer_id
        .as_deref()
        .context("checkout session has no customer")?;
    let team = teams_repo::get_team_by_stripe_customer_id(&st.db, customer)
        .await?
        .with_context(|| format!("no team for customer {customer}"))?;
    Ok(team.id)
}
