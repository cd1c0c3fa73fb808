//! Search API tests.

mod common;

use axum_test::TestServer;
use pretty_assertions::assert_eq;

use common::TestContext;

#[tokio::test]
async fn test_search_exact_matches() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/search").add_query_param("q", "zlomk").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["summary"], "Našlo sa 2 podobných záznamov");
    assert_eq!(body["exact"]["total"], 2);

    let ids: Vec<&str> = body["exact"]["hits"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["mt3-v-001", "mt3-o-002"]);
    assert_eq!(body["exact"]["hits"][1]["definicia"], "Porovnávanie zlomkov.");
}

#[tokio::test]
async fn test_search_short_query_warns() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/search").add_query_param("q", "kr").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["warning"].is_string());
    assert!(body.get("exact").is_none());
    assert!(body.get("fuzzy").is_none());
}

#[tokio::test]
async fn test_search_falls_back_to_similarity() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    // lower-case start never matches the capitalized clean text exactly
    let response = server
        .get("/api/search")
        .add_query_param("q", "porovnávanie zlomkov")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["exact"]["total"], 0);

    let fuzzy = &body["fuzzy"];
    assert_eq!(fuzzy["heading"], "Výsledky vyhľadávania na základe podobnosti");
    let hits = fuzzy["hits"].as_array().unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0]["id"], "mt3-o-002");

    let scores: Vec<f64> = hits.iter().map(|h| h["score"].as_f64().unwrap()).collect();
    assert!(scores.iter().all(|s| *s > 50.0));
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}
