//! Integration tests for administrator record management and reports.
//!
//! Requires a running portal server with an applied database schema.
//! Run with: cargo test -p portal-integration-tests -- --ignored

use portal_integration_tests::{client, portal_base_url, unique_email};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn register_admin(client: &Client, base_url: &str, prefix: &str) {
    let email = unique_email(prefix);
    let resp = client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123", "wants_admin": true }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);
}

async fn register_member(client: &Client, base_url: &str, prefix: &str) -> i64 {
    let email = unique_email(prefix);
    let resp = client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    body["user"]["id"].as_i64().expect("user id")
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_vacation_record_lifecycle() {
    let base_url = portal_base_url();
    let member = client();
    let user_id = register_member(&member, &base_url, "registro-ferias").await;

    let admin = client();
    register_admin(&admin, &base_url, "gestor-ferias").await;

    let resp = admin
        .post(format!("{base_url}/admin/ferias"))
        .json(&json!({
            "user_id": user_id,
            "start_date": "2026-12-01",
            "end_date": "2026-12-20",
            "note": "Férias coletivas"
        }))
        .send()
        .await
        .expect("Failed to create vacation");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("json body");
    let vacation_id = body["id"].as_i64().expect("vacation id");

    // The employee sees the record on their own screen
    let resp = member
        .get(format!("{base_url}/funcionario/ferias"))
        .send()
        .await
        .expect("Failed to list vacations");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    assert!(
        body.as_array()
            .expect("vacation array")
            .iter()
            .any(|v| v["id"].as_i64() == Some(vacation_id))
    );

    let resp = admin
        .delete(format!("{base_url}/admin/ferias/{vacation_id}"))
        .send()
        .await
        .expect("Failed to delete vacation");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = admin
        .delete(format!("{base_url}/admin/ferias/{vacation_id}"))
        .send()
        .await
        .expect("Failed to send second delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_charge_settlement() {
    let base_url = portal_base_url();
    let member = client();
    let user_id = register_member(&member, &base_url, "cobranca").await;

    let admin = client();
    register_admin(&admin, &base_url, "gestor-cobranca").await;

    let resp = admin
        .post(format!("{base_url}/admin/cobrancas"))
        .json(&json!({
            "user_id": user_id,
            "description": "Reposição de crachá",
            "amount": "25.50",
            "due_date": "2026-09-30"
        }))
        .send()
        .await
        .expect("Failed to create charge");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("json body");
    let charge_id = body["id"].as_i64().expect("charge id");
    assert_eq!(body["paid"], false);
    assert_eq!(body["amount"], "25.50");

    let resp = admin
        .post(format!("{base_url}/admin/cobrancas/{charge_id}/pagar"))
        .send()
        .await
        .expect("Failed to settle charge");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["paid"], true);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_work_fields_update() {
    let base_url = portal_base_url();
    let member = client();
    let user_id = register_member(&member, &base_url, "cargo").await;

    let admin = client();
    register_admin(&admin, &base_url, "gestor-cargo").await;

    let resp = admin
        .put(format!("{base_url}/admin/gestao-funcionarios/{user_id}"))
        .json(&json!({
            "position": "Analista",
            "admission_date": "2024-03-01"
        }))
        .send()
        .await
        .expect("Failed to update work fields");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["position"], "Analista");
    assert_eq!(body["admission_date"], "2024-03-01");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_repeated_login_keeps_single_profile_row() {
    let base_url = portal_base_url();
    let email = unique_email("perfil-unico");

    let member = client();
    let resp = member
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);

    // A second login runs the profile bootstrap again; it must only read.
    let member = client();
    let resp = member
        .post(format!("{base_url}/login"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);

    let admin = client();
    register_admin(&admin, &base_url, "gestor-perfil-unico").await;

    let resp = admin
        .get(format!("{base_url}/admin/gestao-funcionarios"))
        .send()
        .await
        .expect("Failed to list employees");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("json body");
    let rows = body
        .as_array()
        .expect("employee array")
        .iter()
        .filter(|e| e["email"] == email.as_str())
        .count();
    assert_eq!(rows, 1);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_employees_report_download() {
    let base_url = portal_base_url();
    let admin = client();
    register_admin(&admin, &base_url, "relatorio").await;

    let resp = admin
        .get(format!("{base_url}/admin/relatorios/funcionarios"))
        .send()
        .await
        .expect("Failed to download report");
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .expect("content-type header");
    assert!(content_type.starts_with("text/csv"));

    let disposition = resp
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .expect("content-disposition header")
        .to_owned();
    assert!(disposition.starts_with("attachment; filename=\"funcionarios_"));
    assert!(disposition.ends_with(".csv\""));

    let body = resp.text().await.expect("report body");
    let header = body.lines().next().expect("header line");
    assert_eq!(header, "nome,email,cargo,funcao,admissao");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_unknown_report_is_not_found() {
    let base_url = portal_base_url();
    let admin = client();
    register_admin(&admin, &base_url, "relatorio-invalido").await;

    let resp = admin
        .get(format!("{base_url}/admin/relatorios/inexistente"))
        .send()
        .await
        .expect("Failed to request report");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
