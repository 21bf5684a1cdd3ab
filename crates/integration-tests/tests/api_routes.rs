//! Integration tests for the JSON view API.
//!
//! The router runs in-process over a memory store; no server is started.

use std::time::Duration;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use estate_pulse_core::User;
use estate_pulse_core::report::REPORT_CONTENT_TYPE;
use estate_pulse_integration_tests::{TestApp, memory_portfolio, seed_lakeview};

fn lakeview_app(user: User) -> (TestApp, String, String) {
    let (store, mut portfolio) = memory_portfolio(User::admin());
    seed_lakeview(&mut portfolio);
    if !user.is_privileged() {
        portfolio
            .execute(estate_pulse_server::portfolio::Command::ToggleRole)
            .expect("toggle");
    }
    let project_id = portfolio.projects()[0].id.to_string();
    let unit_id = portfolio.projects()[0].instruments[0].id.to_string();
    (TestApp::with_portfolio((store, portfolio)), project_id, unit_id)
}

// =============================================================================
// Views
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(User::editor());
    let (status, _, body) = app.send(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_dashboard_lists_projects_with_counts() {
    let (app, project_id, _) = lakeview_app(User::editor());
    let (status, json) = app.get_json("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["session"]["role"], "EDITOR");
    assert_eq!(json["projects"][0]["id"], project_id.as_str());
    assert_eq!(json["projects"][0]["unitCount"], 1);
    assert_eq!(json["projects"][0]["interactionCount"], 0);
}

#[tokio::test]
async fn test_unknown_project_is_not_found() {
    let app = TestApp::new(User::editor());
    let (status, json) = app.get_json("/project/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, Value::String("Not found: project nope".to_string()));
}

#[tokio::test]
async fn test_search_view() {
    let (app, _, _) = lakeview_app(User::editor());

    let (_, empty) = app.get_json("/search?q=").await;
    assert_eq!(empty["count"], 0);

    let (status, json) = app.get_json("/search?q=LAKE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["results"][0]["kind"], "PROJECT");
    assert_eq!(json["results"][0]["project"]["name"], "Lakeview");
}

#[tokio::test]
async fn test_export_is_dated_csv_attachment() {
    let (app, _, _) = lakeview_app(User::editor());
    let (status, content_type, body) = app.send(Method::GET, "/export", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(REPORT_CONTENT_TYPE));
    assert!(body.ends_with(
        "Lakeview,Pune,#A1,PLOT,5000,N/A,N/A,N/A,AVAILABLE,N/A,N/A,N/A,No interactions yet"
    ));
}

// =============================================================================
// Commands
// =============================================================================

#[tokio::test]
async fn test_editor_create_is_ignored_with_unchanged_view() {
    let app = TestApp::new(User::editor());
    let (status, json) = app
        .post_json("/projects", json!({"name": "X", "location": "Goa"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "ignored");
    assert_eq!(json["projects"].as_array().map(Vec::len), Some(0));
    assert_eq!(app.store.write_count(), 0);
}

#[tokio::test]
async fn test_admin_create_and_delete() {
    let app = TestApp::new(User::admin());
    let (_, created) = app
        .post_json(
            "/projects",
            json!({"name": "X", "location": "Goa", "description": "Beach plots"}),
        )
        .await;
    assert_eq!(created["outcome"], "applied");
    let id = created["projects"][0]["id"].as_str().expect("id").to_string();

    let (status, _, body) = app
        .send(Method::POST, &format!("/projects/{id}/delete"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let deleted: Value = serde_json::from_str(&body).expect("json");
    assert_eq!(deleted["outcome"], "applied");
    assert_eq!(deleted["projects"], json!([]));
}

#[tokio::test]
async fn test_enquiry_lifecycle_over_http() {
    let (app, project_id, unit_id) = lakeview_app(User::admin());
    let base = format!("/project/{project_id}/units/{unit_id}/interactions");

    let (status, logged) = app
        .post_json(
            &base,
            json!({
                "customerName": "Meera",
                "customerPhone": "9123456780",
                "agentName": "Alex",
                "agentPhone": "9876543210",
                "offeredRate": "4800"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged["outcome"], "applied");
    assert_eq!(logged["units"][0]["status"], "ACTIVE");
    assert_eq!(logged["stats"]["averageOfferedRate"], "4800");
    let interaction_id = logged["units"][0]["latestInteraction"]["id"]
        .as_str()
        .expect("id")
        .to_string();

    let (_, sold) = app
        .post_json(
            &format!("{base}/{interaction_id}/status"),
            json!({"status": "SOLD"}),
        )
        .await;
    assert_eq!(sold["units"][0]["status"], "SOLD");

    let (_, deleted) = app
        .post_json(&format!("{base}/{interaction_id}/delete"), json!({}))
        .await;
    assert_eq!(deleted["units"][0]["status"], "AVAILABLE");
    assert_eq!(deleted["stats"]["totalInteractions"], 0);
}

#[tokio::test]
async fn test_negative_offered_rate_is_rejected() {
    let (app, project_id, unit_id) = lakeview_app(User::editor());
    let writes = app.store.write_count();

    let (status, _) = app
        .post_json(
            &format!("/project/{project_id}/units/{unit_id}/interactions"),
            json!({"customerName": "Meera", "offeredRate": -1}),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.store.write_count(), writes);
    let (_, detail) = app.get_json(&format!("/project/{project_id}")).await;
    assert_eq!(detail["stats"]["totalInteractions"], 0);
}

#[tokio::test]
async fn test_huge_offers_keep_detail_view_available() {
    let (app, project_id, unit_id) = lakeview_app(User::editor());
    let base = format!("/project/{project_id}/units/{unit_id}/interactions");
    for _ in 0..2 {
        let (status, _) = app
            .post_json(
                &base,
                json!({"customerName": "Whale", "offeredRate": "79228162514264337593543950335"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, detail) = app.get_json(&format!("/project/{project_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["stats"]["totalInteractions"], 2);
}

#[tokio::test]
async fn test_editor_unit_add_is_ignored() {
    let (app, project_id, _) = lakeview_app(User::editor());
    let (status, json) = app
        .post_json(
            &format!("/project/{project_id}/units"),
            json!({"number": "#B1", "type": "FLAT", "baseRate": "7000"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "ignored");
    assert_eq!(json["units"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_enrollment_flow() {
    let (app, project_id, unit_id) = lakeview_app(User::editor());

    let (_, none) = app.get_json("/enrollment/units").await;
    assert_eq!(none, json!([]));

    let (_, units) = app
        .get_json(&format!("/enrollment/units?project_id={project_id}"))
        .await;
    assert_eq!(units[0]["id"], unit_id.as_str());
    assert_eq!(units[0]["number"], "#A1");

    let (_, missing_unit) = app
        .post_json(
            "/enrollment",
            json!({"projectId": project_id, "customerName": "Ravi"}),
        )
        .await;
    assert_eq!(missing_unit["outcome"], "ignored");

    let (_, enrolled) = app
        .post_json(
            "/enrollment",
            json!({
                "projectId": project_id,
                "unitId": unit_id,
                "customerName": "Ravi",
                "status": "BOOKED"
            }),
        )
        .await;
    assert_eq!(enrolled["outcome"], "applied");

    let (_, detail) = app.get_json(&format!("/project/{project_id}")).await;
    assert_eq!(detail["units"][0]["status"], "BOOKED");
    assert_eq!(detail["units"][0]["latestInteraction"]["customerName"], "Ravi");
}

#[tokio::test]
async fn test_session_role_toggle() {
    let app = TestApp::new(User::editor());
    let (_, before) = app.get_json("/session").await;
    assert_eq!(before["name"], "Agent Alex");

    let (status, after) = app.post_json("/session/role", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["role"], "ADMIN");
    assert_eq!(after["name"], "Admin User");
}

// =============================================================================
// Insight
// =============================================================================

#[tokio::test]
async fn test_insight_request_settles() {
    let (app, project_id, _) = lakeview_app(User::editor());
    let uri = format!("/project/{project_id}/insight");

    let (status, _) = app.get_json(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, pending) = app.post_json(&uri, json!({})).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(pending["state"], "pending");

    let mut settled = Value::Null;
    for _ in 0..50 {
        let (_, json) = app.get_json(&uri).await;
        if json["state"] != "pending" {
            settled = json;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(settled["state"], "ready");
    assert_eq!(settled["text"], "Sell the corner plots first.");
}

#[tokio::test]
async fn test_insight_for_unknown_project() {
    let app = TestApp::new(User::editor());
    let (status, _) = app.post_json("/project/nope/insight", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
