//! Integration tests for request submission and administrator triage.
//!
//! Requires a running portal server with an applied database schema.
//! Run with: cargo test -p portal-integration-tests -- --ignored

use portal_integration_tests::{client, portal_base_url, unique_email};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn register(client: &Client, base_url: &str, prefix: &str, wants_admin: bool) -> String {
    let email = unique_email(prefix);
    let resp = client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123", "wants_admin": wants_admin }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);
    email
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_submit_vacation_request() {
    let client = client();
    let base_url = portal_base_url();
    register(&client, &base_url, "ferias", false).await;

    let resp = client
        .post(format!("{base_url}/funcionario/solicitacoes"))
        .json(&json!({
            "kind": "ferias",
            "start_date": "2026-10-01",
            "end_date": "2026-10-15"
        }))
        .send()
        .await
        .expect("Failed to submit request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["message"], "Solicitação enviada com sucesso.");
    assert_eq!(body["requests"][0]["status"], "pendente");
    assert_eq!(body["requests"][0]["details"]["kind"], "ferias");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_vacation_request_rejects_inverted_range() {
    let client = client();
    let base_url = portal_base_url();
    register(&client, &base_url, "ferias-invalida", false).await;

    let resp = client
        .post(format!("{base_url}/funcionario/solicitacoes"))
        .json(&json!({
            "kind": "ferias",
            "start_date": "2026-10-15",
            "end_date": "2026-10-01"
        }))
        .send()
        .await
        .expect("Failed to submit request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_uniform_request_creates_one_row_per_item() {
    let client = client();
    let base_url = portal_base_url();
    register(&client, &base_url, "uniforme", false).await;

    let resp = client
        .post(format!("{base_url}/funcionario/solicitacoes"))
        .json(&json!({
            "kind": "uniforme",
            "items": [
                { "piece": "camisa", "size": "M", "quantity": 2 },
                { "piece": "calca", "size": "40", "quantity": 1 }
            ]
        }))
        .send()
        .await
        .expect("Failed to submit request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(
        body["requests"]
            .as_array()
            .expect("requests array")
            .len(),
        2
    );
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_uniform_request_rejects_empty_items() {
    let client = client();
    let base_url = portal_base_url();
    register(&client, &base_url, "uniforme-vazio", false).await;

    let resp = client
        .post(format!("{base_url}/funcionario/solicitacoes"))
        .json(&json!({ "kind": "uniforme", "items": [] }))
        .send()
        .await
        .expect("Failed to submit request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_admin_approves_pending_request() {
    let base_url = portal_base_url();

    let member = client();
    register(&member, &base_url, "aprovacao", false).await;

    let resp = member
        .post(format!("{base_url}/funcionario/solicitacoes"))
        .json(&json!({
            "kind": "documento",
            "title": "Declaração de vínculo"
        }))
        .send()
        .await
        .expect("Failed to submit request");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("json body");
    let request_id = body["requests"][0]["id"].as_i64().expect("request id");

    let admin = client();
    register(&admin, &base_url, "triagem", true).await;

    let resp = admin
        .post(format!(
            "{base_url}/admin/solicitacoes/{request_id}/aprovar"
        ))
        .send()
        .await
        .expect("Failed to approve request");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["status"], "aprovada");

    // The decision is final; a second triage attempt finds nothing pending
    let resp = admin
        .post(format!(
            "{base_url}/admin/solicitacoes/{request_id}/recusar"
        ))
        .send()
        .await
        .expect("Failed to send second decision");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_admin_filters_requests_by_status() {
    let base_url = portal_base_url();

    let admin = client();
    register(&admin, &base_url, "filtro", true).await;

    let resp = admin
        .get(format!("{base_url}/admin/solicitacoes?status=pendente"))
        .send()
        .await
        .expect("Failed to list requests");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("json body");
    for request in body.as_array().expect("request array") {
        assert_eq!(request["status"], "pendente");
    }
}
