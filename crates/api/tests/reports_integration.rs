//! Integration tests for reports and the AI analyst.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{test_config, TestContext};
use domain::models::UserRole;
use domain::services::{AnalysisProvider, MockAnalysisProvider};
use serde_json::json;

#[tokio::test]
async fn test_summary_counts_active_assets() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let operator = ctx.create_user(UserRole::Operator).await;
    let user = ctx.create_user(UserRole::User).await;

    for (barcode, category, condition) in [
        ("L-1", "tanah", "baik"),
        ("B-1", "bangunan", "baik"),
        ("U-1", "umum", "rusak_berat"),
    ] {
        ctx.register_asset(
            &operator,
            json!({
                "barcode": barcode,
                "name": barcode,
                "category": category,
                "condition": condition
            }),
        )
        .await;
    }
    let retired = ctx
        .register_asset(
            &operator,
            json!({
                "barcode": "U-2",
                "name": "Rusak Lama",
                "category": "umum",
                "condition": "rusak_berat"
            }),
        )
        .await;
    let (status, _) = ctx
        .send(
            Method::PUT,
            &format!("/api/inventory/{}", retired),
            Some(&operator),
            Some(json!({
                "name": "Rusak Lama",
                "condition": "rusak_berat",
                "status": "non-aktif"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    ctx.post(
        "/api/procurement",
        &user,
        json!({ "item_name": "Kursi", "quantity": 30 }),
    )
    .await;

    let (status, summary) = ctx.get("/api/reports/summary", &user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_items"], 3);
    assert_eq!(summary["total_land"], 1);
    assert_eq!(summary["total_building"], 1);
    assert_eq!(summary["total_damaged"], 1);
    assert_eq!(summary["procurement_pending"], 1);
}

#[tokio::test]
async fn test_breakdown_requires_operator() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let operator = ctx.create_user(UserRole::Operator).await;
    let user = ctx.create_user(UserRole::User).await;
    let room = ctx.create_room(&operator, "LAB").await;
    ctx.register_asset(
        &operator,
        json!({ "barcode": "K-1", "name": "Komputer", "category": "umum", "room_id": room }),
    )
    .await;

    let (status, _) = ctx.get("/api/reports/breakdown", &user).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, breakdown) = ctx.get("/api/reports/breakdown", &operator).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(breakdown["by_condition"][0]["label"], "baik");
    assert_eq!(breakdown["by_condition"][0]["count"], 1);
    assert_eq!(breakdown["by_room"][0]["label"], "Ruang LAB");
}

#[tokio::test]
async fn test_ai_analysis_unavailable_when_disabled() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };
    let admin = ctx.create_user(UserRole::Admin).await;

    let (status, body) = ctx
        .send(Method::POST, "/api/ai/analysis", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "service_unavailable");
}

#[tokio::test]
async fn test_ai_analysis_with_provider() {
    let provider: Arc<dyn AnalysisProvider> = Arc::new(MockAnalysisProvider::new());
    let Some(ctx) = TestContext::with_config(test_config(), Some(provider)).await else {
        return;
    };
    let admin = ctx.create_user(UserRole::Admin).await;
    let operator = ctx.create_user(UserRole::Operator).await;

    let (status, _) = ctx
        .send(Method::POST, "/api/ai/analysis", Some(&operator), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = ctx
        .send(Method::POST, "/api/ai/analysis", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["model"], "mock");
    assert!(!body["analysis"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_ai_analysis_upstream_failure() {
    let provider: Arc<dyn AnalysisProvider> = Arc::new(MockAnalysisProvider::failing());
    let Some(ctx) = TestContext::with_config(test_config(), Some(provider)).await else {
        return;
    };
    let admin = ctx.create_user(UserRole::Admin).await;

    let (status, _) = ctx
        .send(Method::POST, "/api/ai/analysis", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
