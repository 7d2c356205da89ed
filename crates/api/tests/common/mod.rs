#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use segmenter_api::config::{RulesConfig, ServerConfig, DEFAULT_RULES_PATH};
use segmenter_api::router::build_app_router;
use segmenter_api::state::AppState;
use segmenter_core::rules::{FeatureRule, RuleSet, SegmentScores, Thresholds};
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_json: false,
        rules: RulesConfig {
            rules_path: DEFAULT_RULES_PATH.into(),
            code_list_path: None,
            case_insensitive: false,
            apply_value_tables: false,
        },
    }
}

fn scores(pairs: &[(&str, f64)]) -> SegmentScores {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Two segments, two features: `status==Active` lifts both, `tier==Gold`
/// lifts only Alpha.
pub fn test_rule_set() -> RuleSet {
    RuleSet::from_parts(
        scores(&[("Alpha", 0.0), ("Beta", 0.0)]),
        Thresholds {
            core_threshold: 1.0,
            mid_threshold: 0.5,
        },
        vec![
            FeatureRule::new("status", "Active", scores(&[("Alpha", 1.0), ("Beta", 1.0)])),
            FeatureRule::new("tier", "Gold", scores(&[("Alpha", 2.0), ("Beta", 0.0)])),
        ],
        "test",
        false,
    )
    .expect("test rule set is valid")
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState::new(test_rule_set(), config.clone());
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
