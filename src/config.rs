use anyhow::Context;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Public origin of the web app, used to build checkout redirect URLs.
    pub base_url: String,
    pub jwt: JwtConfig,
    pub gemini: GeminiConfig,
    pub stripe: StripeConfig,
    pub storage: StorageConfig,
}

fn required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("missing env var {key}"))
}

fn or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn minutes_or(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = required("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            issuer: or_default("JWT_ISSUER", "caltrack"),
            audience: or_default("JWT_AUDIENCE", "caltrack-users"),
            ttl_minutes: minutes_or("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: minutes_or("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };
        let gemini = GeminiConfig {
            api_key: required("GOOGLE_API_KEY")?,
            model: or_default("GEMINI_MODEL", "gemini-1.5-flash"),
            base_url: or_default("GEMINI_BASE_URL", "https://generativelanguage.googleapis.com"),
        };
        let stripe = StripeConfig {
            secret_key: required("STRIPE_SECRET_KEY")?,
            base_url: or_default("STRIPE_BASE_URL", "https://api.stripe.com"),
        };
        let storage = StorageConfig {
            endpoint: required("MINIO_ENDPOINT")?,
            bucket: required("MINIO_BUCKET")?,
            access_key: required("MINIO_ACCESS_KEY")?,
            secret_key: required("MINIO_SECRET_KEY")?,
        };
        Ok(Self {
            database_url,
            base_url: or_default("BASE_URL", "http://localhost:3000"),
            jwt,
            gemini,
            stripe,
            storage,
        })
    }
}
