//! Integration tests for authentication and the admission gate.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The portal server running (cargo run -p portal-server)
//!
//! Run with: cargo test -p portal-integration-tests -- --ignored

use portal_integration_tests::{client, portal_base_url, unique_email};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_health() {
    let client = client();
    let resp = client
        .get(format!("{}/health", portal_base_url()))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_register_then_login() {
    let client = client();
    let base_url = portal_base_url();
    let email = unique_email("cadastro");

    let resp = client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["user"]["role"], "funcionario");
    assert_eq!(body["redirect"], "/funcionario/solicitacoes");

    // A fresh client has no session; login again from scratch
    let client = portal_integration_tests::client();
    let resp = client
        .post(format!("{base_url}/login"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_duplicate_registration_rejected() {
    let client = client();
    let base_url = portal_base_url();
    let email = unique_email("duplicado");

    let resp = client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to send second registration");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"], "Este e-mail já está cadastrado.");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_wrong_password_rejected() {
    let client = client();
    let base_url = portal_base_url();
    let email = unique_email("senha-errada");

    client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to register");

    let resp = client
        .post(format!("{base_url}/login"))
        .json(&json!({ "email": email, "password": "senha-incorreta" }))
        .send()
        .await
        .expect("Failed to send login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"], "E-mail ou senha inválidos.");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_anonymous_gets_login_redirect_with_from() {
    let client = client();
    let base_url = portal_base_url();

    let resp = client
        .get(format!("{base_url}/funcionario/solicitacoes"))
        .send()
        .await
        .expect("Failed to request gated screen");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    assert!(location.starts_with("/login?from="));
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_member_denied_on_admin_area() {
    let client = client();
    let base_url = portal_base_url();
    let email = unique_email("membro");

    client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to register");

    let resp = client
        .get(format!("{base_url}/admin/gestao-funcionarios"))
        .header("accept", "application/json")
        .send()
        .await
        .expect("Failed to request admin screen");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Without the JSON accept header the gate redirects to the member landing
    let resp = client
        .get(format!("{base_url}/admin/gestao-funcionarios"))
        .send()
        .await
        .expect("Failed to request admin screen");
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    assert_eq!(location, "/funcionario/solicitacoes");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_root_redirects_by_role() {
    let client = client();
    let base_url = portal_base_url();
    let email = unique_email("raiz");

    client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123", "wants_admin": true }))
        .send()
        .await
        .expect("Failed to register");

    let resp = client
        .get(&base_url)
        .send()
        .await
        .expect("Failed to request root");
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    assert_eq!(location, "/admin/solicitacoes");
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_auth_pages_redirect_when_already_authenticated() {
    let client = client();
    let base_url = portal_base_url();
    let email = unique_email("ja-logado");

    client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to register");

    for screen in ["login", "register"] {
        let resp = client
            .get(format!("{base_url}/{screen}"))
            .send()
            .await
            .expect("Failed to request auth screen");
        assert!(resp.status().is_redirection(), "screen {screen}");
        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("location header");
        assert_eq!(location, "/funcionario/solicitacoes", "screen {screen}");
    }
}

#[tokio::test]
#[ignore = "Requires running portal server and database"]
async fn test_logout_clears_session() {
    let client = client();
    let base_url = portal_base_url();
    let email = unique_email("sair");

    client
        .post(format!("{base_url}/register"))
        .json(&json!({ "email": email, "password": "senha-segura-123" }))
        .send()
        .await
        .expect("Failed to register");

    let resp = client
        .post(format!("{base_url}/logout"))
        .send()
        .await
        .expect("Failed to logout");
    assert!(resp.status().is_redirection());

    let resp = client
        .get(format!("{base_url}/funcionario/perfil"))
        .header("accept", "application/json")
        .send()
        .await
        .expect("Failed to request gated screen");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
