use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{analysis, auth, billing, fitness, meals, qanda, teams};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(analysis::router())
                .merge(meals::router())
                .merge(teams::router())
                .merge(billing::router())
                .merge(fitness::router())
                .merge(qanda::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn call(req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let res = build_app(AppState::fake()).oneshot(req).await.unwrap();
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, body)
    }

    fn json_of(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn health() {
        let (status, body) = call(Request::get("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn meals_require_a_token() {
        let (status, body) = call(Request::get("/api/meals").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(json_of(&body)["error"].is_string());
    }

    #[tokio::test]
    async fn analyze_without_session_is_a_failed_result() {
        let boundary = "X-BOUNDARY";
        let form = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"a.jpg\"\r\n\
             Content-Type: image/jpeg\r\n\r\nabc\r\n--{boundary}--\r\n"
        );
        let req = Request::post("/api/meals/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(form))
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_of(&body),
            json!({ "success": false, "error": "User not authenticated" })
        );
    }

    #[tokio::test]
    async fn token_without_an_active_account_is_not_a_session() {
        let state = AppState::fake();
        let keys = crate::auth::services::JwtKeys::from(&state.config.jwt);
        let token = keys.sign_access(uuid::Uuid::new_v4()).unwrap();
        let req = Request::post("/api/meals/analyze")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let res = build_app(state).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(
            json_of(&body),
            json!({ "success": false, "error": "User not authenticated" })
        );
    }

    #[tokio::test]
    async fn suggestions_by_goal() {
        let (status, body) =
            call(Request::get("/api/suggestions/cutting").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let v = json_of(&body);
        assert_eq!(v["daily_calories"], 1800);
        assert_eq!(v["routine"].as_array().map(Vec::len), Some(7));

        let (status, _) =
            call(Request::get("/api/suggestions/bulk").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn calculator_endpoint() {
        let req = Request::post("/api/calculator")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"sex":"male","age":30,"weight_kg":80,"height_cm":180,"activity":"sedentary"}"#,
            ))
            .unwrap();
        let (status, body) = call(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!({ "bmr": 1780.0, "tdee": 2136.0 }));
    }

    #[tokio::test]
    async fn pricing_merges_provider_data_with_fallbacks() {
        let (status, body) = call(Request::get("/api/pricing").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let v = json_of(&body);
        assert_eq!(v[0]["name"], "Base");
        assert_eq!(v[0]["price"], 900);
        assert_eq!(v[0]["trial_days"], 14);
        assert_eq!(v[0]["price_id"], "price_base");
        assert_eq!(v[1]["name"], "Plus");
        assert_eq!(v[1]["price"], 1200);
        assert_eq!(v[1]["price_id"], Value::Null);
    }

    #[tokio::test]
    async fn pricing_outage_is_bad_gateway() {
        use crate::billing::stripe::{CheckoutRequest, CompletedCheckout, PaymentsClient, Price, Product};
        use async_trait::async_trait;
        use std::sync::Arc;

        struct Down;
        #[async_trait]
        impl PaymentsClient for Down {
            async fn list_prices(&self) -> anyhow::Result<Vec<Price>> {
                anyhow::bail!("connection refused")
            }
            async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
                Ok(Vec::new())
            }
            async fn create_checkout_session(&self, _r: &CheckoutRequest) -> anyhow::Result<String> {
                anyhow::bail!("down")
            }
            async fn retrieve_checkout_session(&self, _id: &str) -> anyhow::Result<CompletedCheckout> {
                anyhow::bail!("down")
            }
            async fn retrieve_product(&self, _id: &str) -> anyhow::Result<Product> {
                anyhow::bail!("down")
            }
        }

        let app = build_app(AppState::fake().with_payments(Arc::new(Down)));
        let res = app
            .oneshot(Request::get("/api/pricing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn checkout_complete_without_session_goes_to_pricing() {
        let res = build_app(AppState::fake())
            .oneshot(
                Request::get("/api/billing/checkout/complete")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/pricing");
    }

    #[tokio::test]
    async fn checkout_complete_rejects_malformed_session_ids() {
        let res = build_app(AppState::fake())
            .oneshot(
                Request::get("/api/billing/checkout/complete?session_id=..%2F..%2Fv1%2Fcustomers")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/pricing");
    }
}
