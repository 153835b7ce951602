use super::*;

/// Tests checking out the free tier.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_free_tier() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = Integrations::default();

    factory::membership::seed_tiers(db).await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let result = MembershipService::new(db, &integrations, APP_URL)
        .start_checkout(&user, TierLevel::Free)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests checking out a tier without a Stripe price.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_tier_without_price() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe("http://127.0.0.1:9");

    factory::membership::seed_tiers(db).await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let result = MembershipService::new(db, &integrations, APP_URL)
        .start_checkout(&user, TierLevel::ProPlus)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests a membership checkout accepted by Stripe.
///
/// Expected: checkout URL returned and a pending membership tied to the session
#[tokio::test]
async fn records_pending_membership() -> Result<(), AppError> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/checkout/sessions"))
        .and(body_string_contains("mode=subscription"))
        .and(body_string_contains("price_pro"))
        .and(body_string_contains("metadata%5Bkind%5D=membership"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "cs_sub_1",
            "url": "https://checkout.stripe.com/c/cs_sub_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(server.uri());

    factory::membership::seed_tiers(db).await?;
    let user = domain_user(factory::user::create_user(db).await?);

    let url = MembershipService::new(db, &integrations, APP_URL)
        .start_checkout(&user, TierLevel::Pro)
        .await?;

    assert_eq!(url, "https://checkout.stripe.com/c/cs_sub_1");

    let pending = MembershipRepository::new(db)
        .find_by_session("cs_sub_1")
        .await?
        .unwrap();
    assert_eq!(pending.status, MembershipStatus::Pending);
    assert_eq!(pending.tier, TierLevel::Pro);
    assert_eq!(pending.user_id, user.id);

    Ok(())
}
