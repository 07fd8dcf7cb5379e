//! End-to-end API tests
//!
//! Each test spawns the full HTTP stack over an in-memory store.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use anyhow::Result;
use integration_tests::{assert_json, assert_status, TestContext, TestServer};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn attend_body() -> Value {
    json!({
        "moto_dia": "Honda CB 650R",
        "pe_escolhido": "Posto Graal"
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;

    let body: Value = assert_json(server.get("/health").await?, StatusCode::OK).await?;
    assert_eq!(body["status"], "healthy");

    let body: Value = assert_json(server.get("/health/ready").await?, StatusCode::OK).await?;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");

    t.store.set_healthy(false);
    let body: Value = assert_json(
        server.get("/health/ready").await?,
        StatusCode::SERVICE_UNAVAILABLE,
    )
    .await?;
    assert_eq!(body["checks"]["database"], "unhealthy");
    Ok(())
}

#[tokio::test]
async fn test_request_id_is_echoed() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;

    let response = server.get("/health").await?;
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_missing_and_invalid_tokens() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;

    let body: Value =
        assert_json(server.get("/api/events/active").await?, StatusCode::UNAUTHORIZED).await?;
    assert_eq!(body["code"], "MISSING_AUTHORIZATION");

    let body: Value = assert_json(
        server.get_auth("/api/events/active", "not-a-jwt").await?,
        StatusCode::UNAUTHORIZED,
    )
    .await?;
    assert_eq!(body["code"], "INVALID_TOKEN");
    Ok(())
}

#[tokio::test]
async fn test_admin_routes_reject_members() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;
    let rider = t.seed_rider(None).await?;
    let token = t.token_for(&rider)?;

    let response = server
        .post_auth("/api/checkin/validate", &token, &json!({ "token": "x" }))
        .await?;
    assert_status(response, StatusCode::FORBIDDEN).await?;

    let response = server.get_auth("/api/events", &token).await?;
    assert_status(response, StatusCode::FORBIDDEN).await?;
    Ok(())
}

// ============================================================================
// Attendance flow
// ============================================================================

#[tokio::test]
async fn test_attend_status_credential_flow() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;
    let rider = t.seed_rider(Some("Honda CB 650R")).await?;
    let event = t.seed_active_event().await?;
    let token = t.token_for(&rider)?;

    let active: Value =
        assert_json(server.get_auth("/api/events/active", &token).await?, StatusCode::OK).await?;
    assert_eq!(active["id"], event.id.to_string());
    assert_eq!(active["isActive"], true);

    let status: Value = assert_json(
        server
            .get_auth(&format!("/api/events/{}/status", event.id), &token)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(status["confirmed"], false);

    let confirmed: Value = assert_json(
        server
            .post_auth(&format!("/api/events/{}/attend", event.id), &token, &attend_body())
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    assert_eq!(confirmed["confirmation"]["meetingPoint"], "Posto Graal");
    assert_eq!(confirmed["stats"]["participationCount"], 1);
    assert_eq!(confirmed["stats"]["newBike"], false);
    assert!(confirmed["qrCode"]
        .as_str()
        .is_some_and(|qr| qr.starts_with("data:image/png;base64,")));
    let issued_token = confirmed["token"].as_str().unwrap().to_string();

    let status: Value = assert_json(
        server
            .get_auth(&format!("/api/events/{}/status", event.id), &token)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(status["confirmed"], true);
    assert_eq!(status["data"]["hasCredential"], true);

    let credential: Value = assert_json(
        server
            .get_auth(&format!("/api/events/{}/credential", event.id), &token)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(credential["token"], issued_token.as_str());

    let duplicate: Value = assert_json(
        server
            .post_auth(&format!("/api/events/{}/attend", event.id), &token, &attend_body())
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(duplicate["code"], "ALREADY_CONFIRMED");
    Ok(())
}

#[tokio::test]
async fn test_attend_without_credential_returns_nulls() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;
    let rider = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;
    let token = t.token_for(&rider)?;

    t.issuer.set_failing(true);
    let confirmed: Value = assert_json(
        server
            .post_auth(&format!("/api/events/{}/attend", event.id), &token, &attend_body())
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    assert!(confirmed["qrCode"].is_null());
    assert!(confirmed["token"].is_null());
    assert_eq!(confirmed["confirmation"]["hasCredential"], false);
    assert_eq!(confirmed["stats"]["participationCount"], 1);

    t.issuer.set_failing(false);
    let credential: Value = assert_json(
        server
            .get_auth(&format!("/api/events/{}/credential", event.id), &token)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert!(credential["token"].as_str().is_some());
    Ok(())
}

#[tokio::test]
async fn test_attend_validation_errors() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;
    let rider = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;
    let token = t.token_for(&rider)?;

    let body: Value = assert_json(
        server
            .post_auth(
                &format!("/api/events/{}/attend", event.id),
                &token,
                &json!({ "moto_dia": "", "pe_escolhido": "Posto Graal" }),
            )
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let body: Value = assert_json(
        server
            .post_auth("/api/events/not-a-number/attend", &token, &attend_body())
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(body["code"], "INVALID_PATH_PARAMETER");
    Ok(())
}

// ============================================================================
// Check-in flow
// ============================================================================

#[tokio::test]
async fn test_checkin_validate_and_register() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;
    let rider = t.seed_rider(None).await?;
    let admin = t.seed_admin().await?;
    let event = t.seed_active_event().await?;
    let rider_token = t.token_for(&rider)?;
    let admin_token = t.token_for(&admin)?;

    let confirmed: Value = assert_json(
        server
            .post_auth(
                &format!("/api/events/{}/attend", event.id),
                &rider_token,
                &attend_body(),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    let confirmation_id = confirmed["confirmation"]["id"].clone();

    let credential: Value = assert_json(
        server
            .get_auth(&format!("/api/events/{}/credential", event.id), &rider_token)
            .await?,
        StatusCode::OK,
    )
    .await?;
    let checkin_body = json!({ "token": credential["token"] });

    let validated: Value = assert_json(
        server
            .post_auth("/api/checkin/validate", &admin_token, &checkin_body)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(validated["valid"], true);
    assert_eq!(validated["confirmation"]["confirmationId"], confirmation_id);
    assert_eq!(validated["confirmation"]["memberName"], rider.name.as_str());
    assert_eq!(validated["confirmation"]["checkedIn"], false);

    let registered: Value = assert_json(
        server
            .post_auth("/api/checkin/register", &admin_token, &checkin_body)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(registered["success"], true);
    assert_eq!(registered["checkedIn"]["checkedIn"], true);

    let again: Value = assert_json(
        server
            .post_auth("/api/checkin/register", &admin_token, &checkin_body)
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(again["code"], "ALREADY_CHECKED_IN");
    assert_eq!(again["alreadyCheckedIn"], true);
    assert_eq!(again["userName"], rider.name.as_str());
    assert!(again["checkedInAt"].is_string());

    let attendance: Value = assert_json(
        server
            .get_auth(
                &format!("/api/events/{}/confirmations", event.id),
                &admin_token,
            )
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(attendance.as_array().map(Vec::len), Some(1));
    assert_eq!(attendance[0]["checkedIn"], true);
    Ok(())
}

#[tokio::test]
async fn test_checkin_rejects_unusable_credentials() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;
    let admin = t.seed_admin().await?;
    let admin_token = t.token_for(&admin)?;

    let body: Value = assert_json(
        server
            .post_auth(
                "/api/checkin/validate",
                &admin_token,
                &json!({ "qrData": "hello world" }),
            )
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(body["code"], "UNRECOGNIZED_CREDENTIAL");

    let body: Value = assert_json(
        server
            .post_auth("/api/checkin/register", &admin_token, &json!({}))
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let body: Value = assert_json(
        server
            .post_auth(
                "/api/checkin/register",
                &admin_token,
                &json!({ "token": uuid::Uuid::new_v4().to_string() }),
            )
            .await?,
        StatusCode::NOT_FOUND,
    )
    .await?;
    assert_eq!(body["code"], "UNKNOWN_CONFIRMATION");

    let badge = elithe_core::CredentialEnvelope::member(admin.id, chrono::Utc::now())
        .to_payload()?;
    let body: Value = assert_json(
        server
            .post_auth("/api/checkin/register", &admin_token, &json!({ "qrData": badge }))
            .await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;
    assert_eq!(body["code"], "EVENT_SELECTION_REQUIRED");
    Ok(())
}

// ============================================================================
// Event administration and members
// ============================================================================

#[tokio::test]
async fn test_admin_creates_and_activates_events() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;
    let admin = t.seed_admin().await?;
    let token = t.token_for(&admin)?;

    let body: Value =
        assert_json(server.get_auth("/api/events/active", &token).await?, StatusCode::NOT_FOUND)
            .await?;
    assert_eq!(body["code"], "NO_ACTIVE_EVENT");

    let created: Value = assert_json(
        server
            .post_auth(
                "/api/events",
                &token,
                &json!({ "name": "Rota Romantica", "destination": "Nova Petropolis", "date": "2026-11-29" }),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    assert_eq!(created["isActive"], false);
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let activated: Value = assert_json(
        server
            .post_auth(&format!("/api/events/{id}/activate"), &token, &json!({}))
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(activated["isActive"], true);

    let active: Value =
        assert_json(server.get_auth("/api/events/active", &token).await?, StatusCode::OK).await?;
    assert_eq!(active["id"], id.as_str());

    let invalid = server
        .post_auth(
            "/api/events",
            &token,
            &json!({ "name": "", "destination": "Cambara do Sul", "date": "2026-12-06" }),
        )
        .await?;
    assert_status(invalid, StatusCode::BAD_REQUEST).await?;
    Ok(())
}

#[tokio::test]
async fn test_member_profile_and_badge() -> Result<()> {
    let t = TestContext::new();
    let server = TestServer::start(&t).await?;
    let rider = t.seed_rider(Some("Triumph Bonneville")).await?;
    let token = t.token_for(&rider)?;

    let profile: Value =
        assert_json(server.get_auth("/api/members/@me", &token).await?, StatusCode::OK).await?;
    assert_eq!(profile["id"], rider.id.to_string());
    assert_eq!(profile["motorcycle"], "Triumph Bonneville");
    assert_eq!(profile["participationCount"], 0);

    let badge: Value = assert_json(
        server.get_auth("/api/members/@me/badge", &token).await?,
        StatusCode::OK,
    )
    .await?;
    assert!(badge["qrCode"]
        .as_str()
        .is_some_and(|qr| qr.starts_with("data:image/png;base64,")));
    Ok(())
}
