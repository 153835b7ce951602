use super::*;

/// Tests a delivery signed with the wrong secret.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_bad_signature() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(UNUSED_STRIPE_URL);

    let now = Utc::now();
    let payload = session_event("checkout.session.completed", "cs_1", serde_json::json!({}));
    let signature = sign_payload(&payload, "whsec_wrong", now.timestamp());

    let result = WebhookService::new(db, &integrations, APP_URL)
        .handle(&payload, Some(&signature), now)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a delivery without the signature header.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_missing_signature() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(UNUSED_STRIPE_URL);

    let payload = session_event("checkout.session.completed", "cs_1", serde_json::json!({}));

    let result = WebhookService::new(db, &integrations, APP_URL)
        .handle(&payload, None, Utc::now())
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a delivery while payments are not configured.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_when_secret_unset() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    let now = Utc::now();
    let payload = session_event("checkout.session.completed", "cs_1", serde_json::json!({}));
    let signature = sign_payload(&payload, WEBHOOK_SECRET, now.timestamp());

    let result = WebhookService::new(db, &integrations, APP_URL)
        .handle(&payload, Some(&signature), now)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests an event type the platform does not handle.
///
/// Expected: Ok(()) without changes
#[tokio::test]
async fn ignores_unknown_event_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(UNUSED_STRIPE_URL);

    let now = Utc::now();
    let payload = serde_json::to_vec(&serde_json::json!({
        "id": "evt_other",
        "type": "invoice.paid",
        "data": { "object": { "id": "in_1" } }
    }))
    .unwrap();
    let signature = sign_payload(&payload, WEBHOOK_SECRET, now.timestamp());

    WebhookService::new(db, &integrations, APP_URL)
        .handle(&payload, Some(&signature), now)
        .await?;

    Ok(())
}
