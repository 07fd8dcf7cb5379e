//! Service-level tests against the in-memory store
//!
//! Run with: cargo test -p integration-tests --test service_tests

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use integration_tests::{unknown_snowflake, TestContext};
use std::sync::Arc;

use elithe_core::{CredentialEnvelope, DomainError, Snowflake};
use elithe_service::dto::{CheckinRequest, ConfirmAttendanceRequest, CreateEventRequest};
use elithe_service::{AttendanceService, CheckinService, EventService, MemberService};

fn attend(motorcycle: &str) -> ConfirmAttendanceRequest {
    ConfirmAttendanceRequest {
        motorcycle: motorcycle.to_string(),
        meeting_point: "Posto BR-101".to_string(),
    }
}

fn by_token(token: &str) -> CheckinRequest {
    CheckinRequest {
        token: Some(token.to_string()),
        ..Default::default()
    }
}

// ============================================================================
// Attendance
// ============================================================================

#[tokio::test]
async fn test_confirm_twice_is_rejected() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let member = t.seed_rider(Some("Honda CB 500")).await?;
    let event = t.seed_active_event().await?;
    let service = AttendanceService::new(&ctx);

    let outcome = service.confirm(event.id, member.id, attend("Honda CB 500")).await?;
    assert_eq!(outcome.stats.participation_count, 1);
    assert!(outcome.credential.is_some());

    let err = service
        .confirm(event.id, member.id, attend("Honda CB 500"))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::AlreadyConfirmed)));
    assert_eq!(t.store.confirmation_count(), 1);

    let profile = MemberService::new(&ctx).get_profile(member.id).await?;
    assert_eq!(profile.participation_count, 1);
    Ok(())
}

#[tokio::test]
async fn test_reward_tier_unlocks_every_four_rides() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let member = t.seed_rider(Some("Yamaha MT-07")).await?;
    let service = AttendanceService::new(&ctx);

    let mut tiers = Vec::new();
    for _ in 0..5 {
        let event = t.seed_active_event().await?;
        let outcome = service.confirm(event.id, member.id, attend("Yamaha MT-07")).await?;
        tiers.push(outcome.stats.reward_tiers);
    }

    assert_eq!(tiers, vec![0, 0, 0, 1, 1]);
    let profile = MemberService::new(&ctx).get_profile(member.id).await?;
    assert_eq!(profile.participation_count, 5);
    assert_eq!(profile.reward_tier_count, 1);
    Ok(())
}

#[tokio::test]
async fn test_new_bike_detection() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let service = AttendanceService::new(&ctx);

    // Same bike with different case and padding
    let member = t.seed_rider(Some("Honda CB 500")).await?;
    let event = t.seed_active_event().await?;
    let outcome = service.confirm(event.id, member.id, attend("  honda cb 500 ")).await?;
    assert!(!outcome.stats.new_bike);

    // A different bike on the next ride
    let event = t.seed_active_event().await?;
    let outcome = service.confirm(event.id, member.id, attend("BMW R 1250 GS")).await?;
    assert!(outcome.stats.new_bike);
    assert!(outcome.confirmation.new_bike);

    let profile = MemberService::new(&ctx).get_profile(member.id).await?;
    assert_eq!(profile.motorcycle.as_deref(), Some("BMW R 1250 GS"));

    // First bike ever recorded is not a new bike
    let rookie = t.seed_rider(None).await?;
    let outcome = service.confirm(event.id, rookie.id, attend("Suzuki V-Strom")).await?;
    assert!(!outcome.stats.new_bike);
    Ok(())
}

#[tokio::test]
async fn test_birthday_window_flag() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let service = AttendanceService::new(&ctx);

    let event_date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    let event = t.seed_event(event_date, true).await?;

    let close = integration_tests::test_member(None)
        .with_birth_date(NaiveDate::from_ymd_opt(1990, 12, 30).unwrap());
    let close = t.seed_member(close).await?;
    let far = integration_tests::test_member(None)
        .with_birth_date(NaiveDate::from_ymd_opt(1990, 1, 9).unwrap());
    let far = t.seed_member(far).await?;

    let outcome = service.confirm(event.id, close.id, attend("Triumph Tiger")).await?;
    assert!(outcome.stats.birthday_window);

    let outcome = service.confirm(event.id, far.id, attend("Triumph Tiger")).await?;
    assert!(!outcome.stats.birthday_window);
    Ok(())
}

#[tokio::test]
async fn test_confirm_rejects_blank_fields_and_inactive_events() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let service = AttendanceService::new(&ctx);
    let member = t.seed_rider(None).await?;
    let active = t.seed_active_event().await?;
    let past = t
        .seed_event((Utc::now() - Duration::days(30)).date_naive(), false)
        .await?;

    let err = service.confirm(active.id, member.id, attend("   ")).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::ValidationError(_))));

    let err = service
        .confirm(past.id, member.id, attend("Ducati Monster"))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::EventNotAvailable)));

    let err = service
        .confirm(unknown_snowflake(), member.id, attend("Ducati Monster"))
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::EventNotAvailable)));

    assert_eq!(t.store.confirmation_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_status_reflects_confirmation() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let service = AttendanceService::new(&ctx);
    let member = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;

    let status = service.get_status(event.id, member.id).await?;
    assert!(!status.confirmed);
    assert!(status.data.is_none());

    service.confirm(event.id, member.id, attend("KTM 390")).await?;

    let status = service.get_status(event.id, member.id).await?;
    assert!(status.confirmed);
    let data = status.data.unwrap();
    assert_eq!(data.meeting_point, "Posto BR-101");
    assert!(data.has_credential);
    assert!(!data.checked_in);
    Ok(())
}

#[tokio::test]
async fn test_credential_failure_does_not_lose_confirmation() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let service = AttendanceService::new(&ctx);
    let member = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;

    t.issuer.set_failing(true);
    let outcome = service.confirm(event.id, member.id, attend("Kawasaki Z900")).await?;
    assert!(outcome.credential.is_none());
    assert!(outcome.confirmation.token.is_none());

    // Still failing: explicit credential requests surface the error
    let err = service.credential(event.id, member.id).await.unwrap_err();
    assert_eq!(err.status_code(), 500);

    t.issuer.set_failing(false);
    let first = service.credential(event.id, member.id).await?;
    let second = service.credential(event.id, member.id).await?;
    assert_eq!(first.token, second.token);
    assert!(first.qr_code.starts_with("data:image/png;base64,"));

    let status = service.get_status(event.id, member.id).await?;
    assert!(status.data.unwrap().has_credential);
    Ok(())
}

#[tokio::test]
async fn test_credential_requires_confirmation() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let member = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;

    let err = AttendanceService::new(&ctx)
        .credential(event.id, member.id)
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::ConfirmationNotFound)));
    Ok(())
}

// ============================================================================
// Check-in
// ============================================================================

#[tokio::test]
async fn test_validate_then_register_by_token() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let member = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;
    let outcome = AttendanceService::new(&ctx)
        .confirm(event.id, member.id, attend("Harley Fat Boy"))
        .await?;
    let token = outcome.credential.unwrap().token.to_string();

    let checkin = CheckinService::new(&ctx);
    let validated = checkin.validate(&by_token(&token)).await?;
    assert!(validated.valid);
    assert!(!validated.confirmation.checked_in);
    assert_eq!(validated.confirmation.member_name, member.name);
    assert_eq!(validated.confirmation.event_name, event.name);

    let registered = checkin.register(&by_token(&token)).await?;
    assert!(registered.success);
    assert!(registered.checked_in.checked_in);
    assert!(registered.checked_in.checked_in_at.is_some());

    // Validation still works after check-in and reports the state
    let validated = checkin.validate(&by_token(&token)).await?;
    assert!(validated.confirmation.checked_in);
    Ok(())
}

#[tokio::test]
async fn test_register_accepts_scanned_envelope() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let member = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;
    let outcome = AttendanceService::new(&ctx)
        .confirm(event.id, member.id, attend("Royal Enfield Himalayan"))
        .await?;
    let credential = outcome.credential.unwrap();

    let payload =
        CredentialEnvelope::checkin(outcome.confirmation.id, credential.token, credential.issued_at)
            .to_payload()?;
    let request = CheckinRequest {
        qr_data: Some(payload),
        ..Default::default()
    };

    let registered = CheckinService::new(&ctx).register(&request).await?;
    assert_eq!(
        registered.checked_in.confirmation_id,
        outcome.confirmation.id.to_string()
    );
    Ok(())
}

#[tokio::test]
async fn test_token_register_ignores_event_selection() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let member = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;
    let outcome = AttendanceService::new(&ctx)
        .confirm(event.id, member.id, attend("Yamaha MT-07"))
        .await?;
    let request = CheckinRequest {
        event_id: Some("not-a-number".to_string()),
        ..by_token(&outcome.credential.unwrap().token.to_string())
    };

    let checkin = CheckinService::new(&ctx);
    assert!(checkin.validate(&request).await?.valid);
    let registered = checkin.register(&request).await?;
    assert!(registered.success);
    assert_eq!(registered.checked_in.member_name, member.name);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_register_checks_in_once() -> Result<()> {
    let t = TestContext::new();
    let ctx = Arc::new(t.service_context()?);
    let member = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;
    let outcome = AttendanceService::new(&ctx)
        .confirm(event.id, member.id, attend("Honda Africa Twin"))
        .await?;
    let request = by_token(&outcome.credential.unwrap().token.to_string());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ctx = Arc::clone(&ctx);
            let request = request.clone();
            tokio::spawn(async move { CheckinService::new(&ctx).register(&request).await })
        })
        .collect();

    let mut winners = Vec::new();
    let mut rejected = Vec::new();
    for handle in handles {
        match handle.await? {
            Ok(response) => winners.push(response),
            Err(err) => rejected.push(err),
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(rejected.len(), 7);
    let winner_at = winners[0].checked_in.checked_in_at;
    assert!(winner_at.is_some());

    for err in &rejected {
        match err.as_domain() {
            Some(DomainError::AlreadyCheckedIn {
                checked_in_at,
                member_name,
            }) => {
                assert_eq!(Some(*checked_in_at), winner_at);
                assert_eq!(member_name, &member.name);
            }
            other => panic!("expected AlreadyCheckedIn, got {other:?}"),
        }
    }
    assert_eq!(t.store.confirmation_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_badge_register_requires_event() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let member = t.seed_rider(None).await?;
    let event = t.seed_active_event().await?;
    AttendanceService::new(&ctx)
        .confirm(event.id, member.id, attend("BMW F 850 GS"))
        .await?;

    let payload = CredentialEnvelope::member(member.id, Utc::now()).to_payload()?;
    let checkin = CheckinService::new(&ctx);

    let mut request = CheckinRequest {
        qr_data: Some(payload),
        ..Default::default()
    };
    let err = checkin.register(&request).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::EventSelectionRequired)));

    // A member who never confirmed for the selected event
    let other = t.seed_event(event.date, false).await?;
    request.event_id = Some(other.id.to_string());
    let err = checkin.register(&request).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::ConfirmationNotFound)));

    request.event_id = Some(event.id.to_string());
    let registered = checkin.register(&request).await?;
    assert_eq!(registered.checked_in.member_id, member.id.to_string());

    let err = checkin.register(&request).await.unwrap_err();
    assert!(matches!(
        err.as_domain(),
        Some(DomainError::AlreadyCheckedIn { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_unrecognized_and_unknown_credentials() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let checkin = CheckinService::new(&ctx);

    let request = CheckinRequest {
        qr_data: Some("https://example.com/not-a-credential".to_string()),
        ..Default::default()
    };
    let err = checkin.validate(&request).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::UnrecognizedCredential)));

    let request = CheckinRequest {
        qr_data: Some(r#"{"type":"somebody_else","token":"x"}"#.to_string()),
        ..Default::default()
    };
    let err = checkin.register(&request).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::UnrecognizedCredential)));

    let unknown = uuid::Uuid::new_v4().to_string();
    let err = checkin.register(&by_token(&unknown)).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::ConfirmationNotFound)));

    let err = checkin.validate(&CheckinRequest::default()).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::ValidationError(_))));
    Ok(())
}

// ============================================================================
// Events and members
// ============================================================================

#[tokio::test]
async fn test_only_one_event_is_active() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let events = EventService::new(&ctx);

    let err = events.get_active().await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::NoActiveEvent)));

    let date = NaiveDate::from_ymd_opt(2026, 11, 15).unwrap();
    let first = events
        .create_event(CreateEventRequest {
            name: "Rota do Vinho".to_string(),
            destination: "Bento Goncalves".to_string(),
            date,
            activate: true,
        })
        .await?;
    let second = events
        .create_event(CreateEventRequest {
            name: "Serra Gaucha".to_string(),
            destination: "Gramado".to_string(),
            date: date + Duration::days(14),
            activate: false,
        })
        .await?;
    assert!(first.is_active);
    assert!(!second.is_active);
    assert_eq!(events.get_active().await?.id, first.id);

    let second_id: Snowflake = second.id.parse()?;
    let activated = events.activate(second_id).await?;
    assert!(activated.is_active);
    assert_eq!(events.get_active().await?.id, second.id);

    let listed = events.list_events().await?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed.iter().filter(|e| e.is_active).count(), 1);

    let err = events.activate(unknown_snowflake()).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::EventNotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_create_event_rejects_blank_name() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;

    let err = EventService::new(&ctx)
        .create_event(CreateEventRequest {
            name: "  ".to_string(),
            destination: "Urubici".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            activate: false,
        })
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::ValidationError(_))));
    Ok(())
}

#[tokio::test]
async fn test_attendance_list_includes_member_details() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let event = t.seed_active_event().await?;
    let alice = t.seed_rider(None).await?;
    let bruno = t.seed_rider(None).await?;

    let attendance = AttendanceService::new(&ctx);
    attendance.confirm(event.id, alice.id, attend("Honda NC 750")).await?;
    attendance.confirm(event.id, bruno.id, attend("Yamaha Tenere")).await?;

    let entries = EventService::new(&ctx).list_attendance(event.id).await?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].member_name, alice.name);
    assert_eq!(entries[1].member_email, bruno.email);
    assert_eq!(entries[1].motorcycle, "Yamaha Tenere");

    let err = EventService::new(&ctx)
        .list_attendance(unknown_snowflake())
        .await
        .unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::EventNotFound(_))));
    Ok(())
}

#[tokio::test]
async fn test_member_badge_renders_qr() -> Result<()> {
    let t = TestContext::new();
    let ctx = t.service_context()?;
    let member = t.seed_rider(None).await?;
    let members = MemberService::new(&ctx);

    let badge = members.badge(member.id).await?;
    assert!(badge.qr_code.starts_with("data:image/png;base64,"));

    let err = members.badge(uuid::Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(DomainError::MemberNotFound(_))));
    Ok(())
}
