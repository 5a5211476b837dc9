//! Integration tests for session reads, plan switching and the pricing table.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, put_json};
use script_studio_core::Plan;

#[tokio::test]
async fn initial_session_reflects_config() {
    let app = common::build_test_app(common::test_state(Plan::Free, 3));

    let response = get(&app, "/session").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["user"]["plan"], "free");
    assert_eq!(json["user"]["scripts_generated"], 3);
    assert_eq!(json["user"]["videos_edited"], 0);
    assert_eq!(json["user"]["script_limit"], 5);
    assert_eq!(json["user"]["usage"], "3/5");
    assert_eq!(json["status"], "idle");
    assert_eq!(json["topic"], "");
    assert_eq!(json["script_count"], 0);
    assert!(json["selected_video"].is_null());
    assert_eq!(json["caption_options"]["font_size"], "medium");
    assert_eq!(json["caption_options"]["position"], "bottom");
}

#[tokio::test]
async fn switching_to_monthly_shows_unbounded_usage() {
    let app = common::build_test_app(common::test_state(Plan::Free, 3));

    let response = put_json(&app, "/session/plan", serde_json::json!({ "plan": "monthly" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["plan"], "monthly");
    assert_eq!(json["user"]["script_limit"], 999);
    assert_eq!(json["user"]["usage"], "3/∞");
    assert_eq!(json["user"]["scripts_generated"], 3, "switching plans keeps the counter");
}

#[tokio::test]
async fn unknown_plan_is_bad_request() {
    let app = common::build_test_app(common::test_state(Plan::Free, 0));

    let response = put_json(&app, "/session/plan", serde_json::json!({ "plan": "enterprise" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(&app, "/session").await).await;
    assert_eq!(json["user"]["plan"], "free");
}

#[tokio::test]
async fn pricing_table_marks_current_plan() {
    let app = common::build_test_app(common::test_state(Plan::Weekly, 0));

    let response = get(&app, "/plans").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let plans = json.as_array().expect("plans should be an array");

    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0]["plan"], "free");
    assert_eq!(plans[0]["price"], "0");
    assert_eq!(plans[1]["plan"], "weekly");
    assert_eq!(plans[1]["current"], true);
    assert_eq!(plans[2]["name"], "Monthly Pro");
    assert_eq!(plans[2]["popular"], true);

    let current: Vec<&serde_json::Value> = plans.iter().filter(|p| p["current"] == true).collect();
    assert_eq!(current.len(), 1);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = common::build_test_app(common::test_state(Plan::Free, 0));

    let response = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/scripts"]["post"].is_object());
    assert!(json["paths"]["/editor/captions"]["put"].is_object());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(common::test_state(Plan::Free, 0));
    let response = get(&app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
