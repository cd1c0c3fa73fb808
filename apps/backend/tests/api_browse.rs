//! Browse API tests.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;

use common::TestContext;

fn blocks(body: &serde_json::Value) -> &Vec<serde_json::Value> {
    body["blocks"].as_array().unwrap()
}

#[tokio::test]
async fn test_browse_math_lists_goals_and_components() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/browse")
        .add_query_param("subject", "Matematika")
        .add_query_param("cycle", 3)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["title"].as_str().unwrap().starts_with("Matematika - "));

    let blocks = blocks(&body);
    assert_eq!(blocks[0]["type"], "heading");
    assert_eq!(blocks[0]["text"], "Ciele a výkonové štandardy");
    assert_eq!(blocks[1]["type"], "info");

    let tabs = blocks
        .iter()
        .find(|b| b["type"] == "tabs")
        .and_then(|b| b["tabs"].as_array())
        .unwrap();
    let titles: Vec<&str> = tabs.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Čísla", "Geometria"]);
}

#[tokio::test]
async fn test_browse_science_applies_disciplines() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/browse")
        .add_query_param("subject", "Človek a príroda")
        .add_query_param("cycle", 3)
        .add_query_param("disciplines", "F")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["disciplines"], serde_json::json!(["physics"]));

    let text = body.to_string();
    assert!(text.contains("gravitačná sila"));
    assert!(!text.contains("roztoky"));
}

#[tokio::test]
async fn test_browse_accepts_returned_discipline_names() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let first: serde_json::Value = server
        .get("/api/browse")
        .add_query_param("subject", "Človek a príroda")
        .add_query_param("cycle", 3)
        .add_query_param("disciplines", "Fyzika")
        .await
        .json();
    let returned: Vec<&str> = first["disciplines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert_eq!(returned, vec!["physics"]);

    let response = server
        .get("/api/browse")
        .add_query_param("subject", "Človek a príroda")
        .add_query_param("cycle", 3)
        .add_query_param("disciplines", returned.join(","))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["disciplines"], first["disciplines"]);
}

#[tokio::test]
async fn test_browse_literacy_filter() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/browse")
        .add_query_param("subject", "Matematika")
        .add_query_param("cycle", 3)
        .add_query_param("literacy", "Finančná gramotnosť")
        .await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("kruh a kružnica"));
    assert!(!text.contains("porovnávanie zlomkov"));
}

#[tokio::test]
async fn test_browse_rejects_unknown_selection() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/browse")
        .add_query_param("subject", "Matematika")
        .add_query_param("cycle", 4)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");

    let response = server
        .get("/api/browse")
        .add_query_param("subject", "Alchýmia")
        .add_query_param("cycle", 1)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .get("/api/browse")
        .add_query_param("subject", "Matematika")
        .add_query_param("cycle", 3)
        .add_query_param("literacy", "Hudobná gramotnosť")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
