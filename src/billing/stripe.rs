//! Payments provider client. Stripe's REST API takes form-encoded bodies and
//! answers JSON; expandable fields arrive either as an id or as the full object.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, error};

use crate::config::StripeConfig;

pub const CHECKOUT_TRIAL_DAYS: u32 = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    pub id: String,
    pub product_id: String,
    pub unit_amount: Option<i64>,
    pub interval: Option<String>,
    pub trial_period_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
}

/// Checkout session ids are `cs_` followed by url-safe characters only.
pub fn is_checkout_session_id(id: &str) -> bool {
    lazy_static! {
        static ref SESSION_ID_RE: Regex = Regex::new(r"^cs_[A-Za-z0-9_]+$").unwrap();
    }
    SESSION_ID_RE.is_match(id)
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub price_id: String,
    pub client_reference_id: String,
    pub customer_id: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
}

/// A finished checkout as needed to update the buying team.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedCheckout {
    pub client_reference_id: Option<String>,
    pub customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub subscription_status: Option<String>,
    pub product_id: Option<String>,
}

#[async_trait]
pub trait PaymentsClient: Send + Sync {
    async fn list_prices(&self) -> anyhow::Result<Vec<Price>>;
    async fn list_products(&self) -> anyhow::Result<Vec<Product>>;
    /// Returns the hosted checkout URL.
    async fn create_checkout_session(&self, req: &CheckoutRequest) -> anyhow::Result<String>;
    async fn retrieve_checkout_session(&self, session_id: &str) -> anyhow::Result<CompletedCheckout>;
    async fn retrieve_product(&self, product_id: &str) -> anyhow::Result<Product>;
}

#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    pub fn new(cfg: &StripeConfig) -> anyhow::Result<Self> {
        if cfg.secret_key.is_empty() {
            anyhow::bail!("Stripe secret key cannot be empty");
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            secret_key: cfg.secret_key.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.secret_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(&self.secret_key)
    }

    async fn send<T: DeserializeOwned>(&self, what: &str, req: RequestBuilder) -> anyhow::Result<T> {
        let resp = req.send().await.with_context(|| format!("stripe {what}"))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(%status, %body, "stripe {what} failed");
            anyhow::bail!("stripe {what} failed: {status}");
        }
        debug!(%status, "stripe {what}");
        resp.json::<T>()
            .await
            .with_context(|| format!("decode stripe {what}"))
    }
}

#[async_trait]
impl PaymentsClient for StripeClient {
    async fn list_prices(&self) -> anyhow::Result<Vec<Price>> {
        let list: List<PriceObject> = self
            .send(
                "list prices",
                self.get("/v1/prices").query(&[
                    ("active", "true"),
                    ("type", "recurring"),
                    ("expand[]", "data.product"),
                ]),
            )
            .await?;
        Ok(list.data.into_iter().map(Price::from).collect())
    }

    async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
        let list: List<ProductObject> = self
            .send(
                "list products",
                self.get("/v1/products").query(&[("active", "true")]),
            )
            .await?;
        Ok(list.data.into_iter().map(Product::from).collect())
    }

    async fn create_checkout_session(&self, req: &CheckoutRequest) -> anyhow::Result<String> {
        let trial = CHECKOUT_TRIAL_DAYS.to_string();
        let mut form: Vec<(&str, &str)> = vec![
            ("payment_method_types[]", "card"),
            ("line_items[0][price]", req.price_id.as_str()),
            ("line_items[0][quantity]", "1"),
            ("mode", "subscription"),
            ("success_url", req.success_url.as_str()),
            ("cancel_url", req.cancel_url.as_str()),
            ("client_reference_id", req.client_reference_id.as_str()),
            ("allow_promotion_codes", "true"),
            ("subscription_data[trial_period_days]", trial.as_str()),
        ];
        if let Some(customer) = req.customer_id.as_deref() {
            form.push(("customer", customer));
        }

        let session: SessionObject = self
            .send("create checkout session", self.post("/v1/checkout/sessions").form(&form))
            .await?;
        session
            .url
            .context("checkout session has no url")
    }

    async fn retrieve_checkout_session(&self, session_id: &str) -> anyhow::Result<CompletedCheckout> {
        if !is_checkout_session_id(session_id) {
            anyhow::bail!("malformed checkout session id");
        }
        let session: SessionObject = self
            .send(
                "retrieve checkout session",
                self.get(&format!("/v1/checkout/sessions/{session_id}"))
                    .query(&[("expand[]", "customer"), ("expand[]", "subscription")]),
            )
            .await?;
        Ok(CompletedCheckout::from(session))
    }

    async fn retrieve_product(&self, product_id: &str) -> anyhow::Result<Product> {
        let product: ProductObject = self
            .send("retrieve product", self.get(&format!("/v1/products/{product_id}")))
            .await?;
        Ok(product.into())
    }
}

// wire types

#[derive(Debug, Deserialize)]
struct List<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct WithId {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Expandable<T> {
    Id(String),
    Object(T),
}

impl<T> Expandable<T> {
    fn into_object(self) -> Option<T> {
        match self {
            Expandable::Id(_) => None,
            Expandable::Object(o) => Some(o),
        }
    }
}

impl Expandable<WithId> {
    fn id(self) -> String {
        match self {
            Expandable::Id(id) => id,
            Expandable::Object(o) => o.id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Recurring {
    interval: Option<String>,
    trial_period_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct PriceObject {
    id: String,
    product: Expandable<WithId>,
    unit_amount: Option<i64>,
    recurring: Option<Recurring>,
}

impl From<PriceObject> for Price {
    fn from(p: PriceObject) -> Self {
        let (interval, trial_period_days) = p
            .recurring
            .map_or((None, None), |r| (r.interval, r.trial_period_days));
        Self {
            id: p.id,
            product_id: p.product.id(),
            unit_amount: p.unit_amount,
            interval,
            trial_period_days,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductObject {
    id: String,
    name: String,
}

impl From<ProductObject> for Product {
    fn from(p: ProductObject) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionObject {
    url: Option<String>,
    client_reference_id: Option<String>,
    customer: Option<Expandable<WithId>>,
    subscription: Option<Expandable<SubscriptionObject>>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionObject {
    id: String,
    status: String,
    items: List<SubscriptionItem>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionItem {
    price: SubscriptionPrice,
}

#[derive(Debug, Deserialize)]
struct SubscriptionPrice {
    product: Expandable<WithId>,
}

impl From<SessionObject> for CompletedCheckout {
    fn from(s: SessionObject) -> Self {
        let subscription = s.subscription.and_then(Expandable::into_object);
        let (subscription_id, subscription_status, product_id) = match subscription {
            Some(sub) => {
                let product = sub.items.data.into_iter().next().map(|i| i.price.product.id());
                (Some(sub.id), Some(sub.status), product)
            }
            None => (None, None, None),
        };
        Self {
            client_reference_id: s.client_reference_id,
            customer_id: s.customer.map(Expandable::id),
            subscription_id,
            subscription_status,
            product_id,
        }
    }
}
