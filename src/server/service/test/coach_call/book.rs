use super::*;

/// Tests booking a call with no calendar configured.
///
/// Expected: scheduled call covering one slot
#[tokio::test]
async fn books_without_calendar() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = domain_user(factory::user::create_user(db).await?);
    let integrations = Integrations::default();
    let start = slot_start();

    let call = CoachCallService::new(db, &integrations, CALL_MINUTES)
        .book(&user, params(user.id, start), Utc::now())
        .await?;

    assert_eq!(call.user_id, user.id);
    assert_eq!(call.status, CoachCallStatus::Scheduled);
    assert_eq!(call.starts_at, start);
    assert_eq!(call.ends_at, start + Duration::minutes(CALL_MINUTES));
    assert_eq!(call.topic.as_deref(), Some("Race plan"));

    Ok(())
}

/// Tests booking a second call on the same day.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_second_call_same_day() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = domain_user(factory::user::create_user(db).await?);
    factory::coach_call::create_coach_call(db, user.id, slot_start(), CoachCallStatus::Scheduled)
        .await?;
    let integrations = Integrations::default();

    let result = CoachCallService::new(db, &integrations, CALL_MINUTES)
        .book(
            &user,
            params(user.id, slot_start() + Duration::hours(4)),
            Utc::now(),
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests booking on a day whose only call was cancelled.
///
/// Expected: Ok, the cancelled call does not count
#[tokio::test]
async fn cancelled_call_frees_the_day() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = domain_user(factory::user::create_user(db).await?);
    factory::coach_call::create_coach_call(db, user.id, slot_start(), CoachCallStatus::Cancelled)
        .await?;
    let integrations = Integrations::default();

    let call = CoachCallService::new(db, &integrations, CALL_MINUTES)
        .book(&user, params(user.id, slot_start()), Utc::now())
        .await?;

    assert_eq!(call.status, CoachCallStatus::Scheduled);

    Ok(())
}

/// Tests booking in the past and off a slot boundary.
///
/// Expected: both Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_bad_start_times() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = domain_user(factory::user::create_user(db).await?);
    let integrations = Integrations::default();
    let service = CoachCallService::new(db, &integrations, CALL_MINUTES);

    let past = service
        .book(
            &user,
            params(user.id, slot_start() - Duration::days(7)),
            Utc::now(),
        )
        .await;
    assert!(matches!(past, Err(AppError::BadRequest(_))));

    let misaligned = service
        .book(
            &user,
            params(user.id, slot_start() + Duration::minutes(10)),
            Utc::now(),
        )
        .await;
    assert!(matches!(misaligned, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests booking a slot the coach calendar reports as busy.
///
/// Expected: Err(AppError::Conflict) answered with 409, no call stored, no event created
#[tokio::test]
async fn busy_calendar_rejects_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let server = MockServer::start().await;
    let integrations = with_calendar(&server).await;
    mock_free_busy(
        &server,
        serde_json::json!([{ "start": "2030-03-04T10:00:00Z", "end": "2030-03-04T11:00:00Z" }]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/calendars/coach%40example.com/events"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let user = domain_user(factory::user::create_user(db).await?);
    let service = CoachCallService::new(db, &integrations, CALL_MINUTES);

    let result = service
        .book(&user, params(user.id, slot_start()), Utc::now())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    assert!(service.get_mine(user.id).await?.is_empty());

    Ok(())
}

/// Tests booking while the calendar cannot be reached.
///
/// Expected: Err(AppError::IntegrationErr) answered with 500, no call stored
#[tokio::test]
async fn unreachable_calendar_fails_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let integrations = Integrations {
        calendar: Some(calendar("http://127.0.0.1:9")),
        ..Default::default()
    };
    let user = domain_user(factory::user::create_user(db).await?);
    let service = CoachCallService::new(db, &integrations, CALL_MINUTES);

    let result = service
        .book(&user, params(user.id, slot_start()), Utc::now())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::IntegrationErr(_)));
    assert_eq!(
        err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert!(service.get_mine(user.id).await?.is_empty());

    Ok(())
}

/// Tests a free slot whose calendar event cannot be created.
///
/// Expected: Ok with the call scheduled but no calendar event or meeting link
#[tokio::test]
async fn failed_event_creation_still_books() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let server = MockServer::start().await;
    let integrations = with_calendar(&server).await;
    mock_free_busy(&server, serde_json::json!([])).await;
    Mock::given(method("POST"))
        .and(path("/calendars/coach%40example.com/events"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend error"))
        .expect(1)
        .mount(&server)
        .await;

    let user = domain_user(factory::user::create_user(db).await?);
    let service = CoachCallService::new(db, &integrations, CALL_MINUTES);

    let call = service
        .book(&user, params(user.id, slot_start()), Utc::now())
        .await?;

    assert_eq!(call.status, CoachCallStatus::Scheduled);
    assert!(call.calendar_event_id.is_none());
    assert!(call.meeting_url.is_none());

    let stored = service.get_mine(user.id).await?;
    assert_eq!(stored.len(), 1);
    assert!(stored[0].meeting_url.is_none());

    Ok(())
}

/// Tests booking a free slot with a working calendar.
///
/// Expected: Ok with the event id and Meet link stored on the call
#[tokio::test]
async fn free_slot_books_with_meeting_link() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let server = MockServer::start().await;
    let integrations = with_calendar(&server).await;
    mock_free_busy(&server, serde_json::json!([])).await;
    Mock::given(method("POST"))
        .and(path("/calendars/coach%40example.com/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "evt_call",
            "hangoutLink": "https://meet.google.com/abc-defg-hij"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = domain_user(factory::user::create_user(db).await?);
    let call = CoachCallService::new(db, &integrations, CALL_MINUTES)
        .book(&user, params(user.id, slot_start()), Utc::now())
        .await?;

    assert_eq!(call.calendar_event_id.as_deref(), Some("evt_call"));
    assert_eq!(
        call.meeting_url.as_deref(),
        Some("https://meet.google.com/abc-defg-hij")
    );

    Ok(())
}
