mod scrape;

use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rivalguru_analysis::Analyzer;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    /// Deadline handed to every analysis.
    pub analysis_timeout: Duration,
}

/// Error response rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                detail: &self.detail,
            }),
        )
            .into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn scrape_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/scrape/{website_name}", get(scrape::scrape_website))
        .route_layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(scrape_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use rivalguru_core::Profile;
    use rivalguru_fetcher::{FetchError, ProfileFetcher};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Fetcher serving canned profiles; unknown targets fail, `slow.*` hangs.
    struct CannedFetcher(HashMap<&'static str, Profile>);

    #[async_trait]
    impl ProfileFetcher for CannedFetcher {
        async fn fetch_profile(&self, target: &str) -> Result<Profile, FetchError> {
            if target.starts_with("slow.") {
                tokio::time::sleep(Duration::from_secs(3_600)).await;
            }
            self.0
                .get(target)
                .cloned()
                .ok_or_else(|| FetchError::Unavailable(format!("no profile for {target}")))
        }
    }

    fn profile(description: &str, competitors: &[&str]) -> Profile {
        Profile {
            description: description.to_string(),
            category: "Computers Electronics and Technology/Software".to_string(),
            year_founded: 1975,
            employees: "10,000+".to_string(),
            annual_revenue: "$1B+".to_string(),
            global_rank: 20,
            visits: "1.2B".to_string(),
            bounce_rate: "45%".to_string(),
            avg_visit_duration: "00:04:12".to_string(),
            competitors: competitors.iter().map(ToString::to_string).collect(),
        }
    }

    fn app_with(rate_limit: usize) -> Router {
        let fetcher = CannedFetcher(HashMap::from([
            (
                "microsoft.com",
                profile("Software maker", &["apple.com", "google.com", "slow.com"]),
            ),
            ("apple.com", profile("Device maker", &[])),
            ("slow.com", profile("Never answers", &[])),
        ]));
        let fetcher: Arc<dyn ProfileFetcher> = Arc::new(fetcher);
        let state = AppState {
            analyzer: Analyzer::new(fetcher),
            analysis_timeout: Duration::from_secs(300),
        };
        build_app(state, RateLimitState::per_minute(rate_limit))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn json_body(res: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let res = app_with(10).oneshot(get("/health")).await.expect("response");
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test(start_paused = true)]
    async fn scrape_returns_company_and_positional_competitors() {
        let res = app_with(10)
            .oneshot(get("/scrape/microsoft.com"))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));

        let body = json_body(res).await;
        assert_eq!(body["company"]["description"], "Software maker");
        let competitors = body["competitors"].as_array().expect("competitors array");
        assert_eq!(competitors.len(), 3);
        assert_eq!(competitors[0]["description"], "Device maker");
        assert!(competitors[1].is_null(), "failed fetch must be null");
        assert!(competitors[2].is_null(), "timed out fetch must be null");
    }

    #[tokio::test(start_paused = true)]
    async fn scrape_accepts_percent_encoded_url_forms() {
        let res = app_with(10)
            .oneshot(get("/scrape/https%3A%2F%2Fwww.microsoft.com"))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn scrape_rejects_invalid_website_name() {
        let res = app_with(10)
            .oneshot(get("/scrape/not_a_site"))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        assert!(body["detail"]
            .as_str()
            .is_some_and(|d| d.starts_with("Please enter a valid website name")));
    }

    #[tokio::test]
    async fn scrape_root_failure_returns_detail_body() {
        let res = app_with(10)
            .oneshot(get("/scrape/unknown.com"))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(res).await;
        let detail = body["detail"].as_str().expect("detail string");
        assert!(detail.starts_with("An error occurred while analyzing the company: "));
        assert!(detail.contains("unknown.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn scrape_root_timeout_returns_detail_body() {
        let res = app_with(10)
            .oneshot(get("/scrape/slow.com"))
            .await
            .expect("response");
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(res).await;
        assert!(body["detail"]
            .as_str()
            .is_some_and(|d| d.contains("did not respond within 300s")));
    }

    #[tokio::test]
    async fn scrape_is_rate_limited_but_health_is_not() {
        let app = app_with(1);
        let first = app.clone().oneshot(get("/scrape/unknown.com")).await.expect("response");
        assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let second = app.clone().oneshot(get("/scrape/unknown.com")).await.expect("response");
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(json_body(second).await["detail"].is_string());

        let health = app.oneshot(get("/health")).await.expect("response");
        assert_eq!(health.status(), StatusCode::OK);
    }
}
