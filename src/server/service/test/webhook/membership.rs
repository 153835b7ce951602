use super::*;

/// Tests completing a membership checkout.
///
/// Expected: pending membership active for 30 days, previous membership cancelled
#[tokio::test]
async fn completion_activates_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(UNUSED_STRIPE_URL);

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    let previous = factory::membership::MembershipFactory::new(db, user.id)
        .tier(TierLevel::ProPlus)
        .build()
        .await?;
    let pending = factory::membership::MembershipFactory::new(db, user.id)
        .status(MembershipStatus::Pending)
        .expires_at(None)
        .stripe_session_id("cs_member_1")
        .build()
        .await?;

    let now = Utc::now();
    let payload = session_event(
        "checkout.session.completed",
        "cs_member_1",
        serde_json::json!({ "kind": "membership", "user_id": user.id.to_string() }),
    );
    let signature = sign_payload(&payload, WEBHOOK_SECRET, now.timestamp());

    WebhookService::new(db, &integrations, APP_URL)
        .handle(&payload, Some(&signature), now)
        .await?;

    let repo = MembershipRepository::new(db);
    let activated = repo.find_by_id(pending.id).await?.unwrap();
    assert_eq!(activated.status, MembershipStatus::Active);
    assert_eq!(
        activated.expires_at.map(|at| at.timestamp()),
        Some((now + Duration::days(30)).timestamp())
    );

    let previous = repo.find_by_id(previous.id).await?.unwrap();
    assert_eq!(previous.status, MembershipStatus::Cancelled);

    Ok(())
}

/// Tests an abandoned membership checkout.
///
/// Expected: pending membership cancelled
#[tokio::test]
async fn expiry_cancels_pending_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(UNUSED_STRIPE_URL);

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    let pending = factory::membership::MembershipFactory::new(db, user.id)
        .status(MembershipStatus::Pending)
        .expires_at(None)
        .stripe_session_id("cs_member_2")
        .build()
        .await?;

    let now = Utc::now();
    let payload = session_event(
        "checkout.session.expired",
        "cs_member_2",
        serde_json::json!({ "kind": "membership" }),
    );
    let signature = sign_payload(&payload, WEBHOOK_SECRET, now.timestamp());

    WebhookService::new(db, &integrations, APP_URL)
        .handle(&payload, Some(&signature), now)
        .await?;

    let cancelled = MembershipRepository::new(db)
        .find_by_id(pending.id)
        .await?
        .unwrap();
    assert_eq!(cancelled.status, MembershipStatus::Cancelled);

    Ok(())
}

/// Tests that a subscription checkout remembers its subscription.
///
/// Expected: activated membership carries the session's subscription id
#[tokio::test]
async fn completion_records_subscription() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(UNUSED_STRIPE_URL);

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    let pending = factory::membership::MembershipFactory::new(db, user.id)
        .status(MembershipStatus::Pending)
        .expires_at(None)
        .stripe_session_id("cs_member_3")
        .build()
        .await?;

    let now = Utc::now();
    let payload = serde_json::to_vec(&serde_json::json!({
        "id": "evt_sub",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": "cs_member_3",
                "amount_total": 1500,
                "subscription": "sub_member_3",
                "metadata": { "kind": "membership" }
            }
        }
    }))
    .unwrap();
    let signature = sign_payload(&payload, WEBHOOK_SECRET, now.timestamp());

    WebhookService::new(db, &integrations, APP_URL)
        .handle(&payload, Some(&signature), now)
        .await?;

    let activated = MembershipRepository::new(db)
        .find_by_id(pending.id)
        .await?
        .unwrap();
    assert_eq!(activated.status, MembershipStatus::Active);
    assert_eq!(
        activated.stripe_subscription_id.as_deref(),
        Some("sub_member_3")
    );

    Ok(())
}

/// Tests a paid renewal invoice, delivered twice.
///
/// Expected: expiry moved to the end of the paid period once, membership still active
#[tokio::test]
async fn paid_invoice_extends_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(UNUSED_STRIPE_URL);

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    let now = Utc::now();
    let membership = factory::membership::MembershipFactory::new(db, user.id)
        .expires_at(Some(now + Duration::days(2)))
        .stripe_subscription_id("sub_renew")
        .build()
        .await?;

    let period_end = (now + Duration::days(32)).timestamp();
    let payload = invoice_event("sub_renew", "subscription_cycle", Some(period_end));
    let signature = sign_payload(&payload, WEBHOOK_SECRET, now.timestamp());
    let service = WebhookService::new(db, &integrations, APP_URL);
    service.handle(&payload, Some(&signature), now).await?;
    service.handle(&payload, Some(&signature), now).await?;

    let renewed = MembershipRepository::new(db)
        .find_by_id(membership.id)
        .await?
        .unwrap();
    assert_eq!(renewed.status, MembershipStatus::Active);
    assert_eq!(renewed.expires_at.map(|at| at.timestamp()), Some(period_end));

    Ok(())
}

/// Tests a renewal invoice arriving after the membership lapsed, without line periods.
///
/// Expected: membership active again for 30 days from now
#[tokio::test]
async fn paid_invoice_reactivates_lapsed_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(UNUSED_STRIPE_URL);

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    let now = Utc::now();
    let membership = factory::membership::MembershipFactory::new(db, user.id)
        .status(MembershipStatus::Expired)
        .expires_at(Some(now - Duration::days(1)))
        .stripe_subscription_id("sub_lapsed")
        .build()
        .await?;

    let payload = invoice_event("sub_lapsed", "subscription_cycle", None);
    let signature = sign_payload(&payload, WEBHOOK_SECRET, now.timestamp());
    WebhookService::new(db, &integrations, APP_URL)
        .handle(&payload, Some(&signature), now)
        .await?;

    let renewed = MembershipRepository::new(db)
        .find_by_id(membership.id)
        .await?
        .unwrap();
    assert_eq!(renewed.status, MembershipStatus::Active);
    assert_eq!(
        renewed.expires_at.map(|at| at.timestamp()),
        Some((now + Duration::days(30)).timestamp())
    );

    Ok(())
}

/// Tests the invoice that opens a subscription.
///
/// Expected: expiry unchanged, checkout completion already covers the first period
#[tokio::test]
async fn first_invoice_does_not_extend() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let integrations = with_stripe(UNUSED_STRIPE_URL);

    factory::membership::seed_tiers(db).await?;
    let user = factory::user::create_user(db).await?;
    let now = Utc::now();
    let expires_at = now + Duration::days(30);
    let membership = factory::membership::MembershipFactory::new(db, user.id)
        .expires_at(Some(expires_at))
        .stripe_subscription_id("sub_new")
        .build()
        .await?;

    let payload = invoice_event("sub_new", "subscription_create", None);
    let signature = sign_payload(&payload, WEBHOOK_SECRET, now.timestamp());
    WebhookService::new(db, &integrations, APP_URL)
        .handle(&payload, Some(&signature), now)
        .await?;

    let unchanged = MembershipRepository::new(db)
        .find_by_id(membership.id)
        .await?
        .unwrap();
    assert_eq!(
        unchanged.expires_at.map(|at| at.timestamp()),
        Some(expires_at.timestamp())
    );

    Ok(())
}
