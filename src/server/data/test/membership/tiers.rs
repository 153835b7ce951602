use super::*;

/// Tests listing seeded tiers.
///
/// Expected: Ok with free, pro and pro_plus in access order
#[tokio::test]
async fn lists_tiers_in_access_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::membership::seed_tiers(db).await?;

    let repo = MembershipRepository::new(db);
    let levels: Vec<TierLevel> = repo.get_tiers().await?.into_iter().map(|t| t.level).collect();

    assert_eq!(levels, vec![TierLevel::Free, TierLevel::Pro, TierLevel::ProPlus]);

    Ok(())
}

/// Tests updating a tier's price and integration ids.
///
/// Expected: Ok(Some) with every field replaced
#[tokio::test]
async fn updates_tier() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::membership::seed_tiers(db).await?;

    let repo = MembershipRepository::new(db);
    let tier = repo
        .update_tier(UpdateTierParams {
            level: TierLevel::ProPlus,
            name: "Pro Plus".to_string(),
            description: Some("Coaching included".to_string()),
            monthly_price_cents: 5900,
            stripe_price_id: Some("price_plus".to_string()),
            discord_role_id: Some("3001".to_string()),
        })
        .await?
        .unwrap();

    assert_eq!(tier.monthly_price_cents, 5900);
    assert_eq!(tier.stripe_price_id.as_deref(), Some("price_plus"));
    assert_eq!(tier.discord_role(), Some(3001));

    Ok(())
}

/// Tests updating a tier row that was never seeded.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_tier() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MembershipRepository::new(db);
    let result = repo
        .update_tier(UpdateTierParams {
            level: TierLevel::Pro,
            name: "Pro".to_string(),
            description: None,
            monthly_price_cents: 1000,
            stripe_price_id: None,
            discord_role_id: None,
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
