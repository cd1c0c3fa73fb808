//! Catalogue API tests.

mod common;

use axum_test::TestServer;
use pretty_assertions::assert_eq;

use common::{TestContext, FIXTURE_ROWS, FIXTURE_TABLE};

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_catalog_lists_subjects_and_filters() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/catalog").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let subjects = body["subjects"].as_array().unwrap();
    let math = subjects.iter().find(|s| s["name"] == "Matematika").unwrap();
    assert_eq!(math["code"], "mt");
    assert_eq!(math["cycles"].as_array().unwrap().len(), 3);

    let literacies = body["literacies"].as_array().unwrap();
    assert_eq!(literacies[0]["key"], "all");
    assert_eq!(literacies.len(), 7);
    assert_eq!(body["legend"].as_array().unwrap().len(), 6);
    assert!(body["legend"][0].as_str().unwrap().starts_with("Čitateľská a vizuálna gramotnosť "));

    assert_eq!(body["disciplines"][0]["code"], "F");
    assert_eq!(body["source"]["rows"], FIXTURE_ROWS);
}

#[tokio::test]
async fn test_reload_picks_up_changed_file() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let before: serde_json::Value = server.get("/api/catalog").await.json();

    let extra = "Matematika\t1\tObsahový štandard\tČísla\tPočítanie\t\tmt1-o-001\tčísla do 20\t\n";
    ctx.rewrite_table(&format!("{}{}", FIXTURE_TABLE, extra));

    let response = server.post("/api/catalog/reload").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["source"]["rows"], FIXTURE_ROWS + 1);
    assert_ne!(body["source"]["fingerprint"], before["source"]["fingerprint"]);
    assert_eq!(
        body["source"]["location"],
        ctx.data_path().display().to_string()
    );
}

#[tokio::test]
async fn test_reload_reports_broken_file() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    ctx.rewrite_table("predmet\tdefinicia\nMatematika\tbez id\n");

    let response = server.post("/api/catalog/reload").await;
    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "load_error");
}
