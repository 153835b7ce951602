use super::*;

/// Tests creating a coupon with a valid percentage discount.
///
/// Expected: Ok with the code stored
#[tokio::test]
async fn creates_coupon() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let coupon = CouponService::new(db).create(params("SPRING")).await?;

    assert_eq!(coupon.code, "SPRING");
    assert_eq!(coupon.percent_off, Some(20));
    assert_eq!(coupon.redemption_count, 0);

    Ok(())
}

/// Tests creating a coupon with both discount kinds set.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_two_discounts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let mut both = params("BOTH");
    both.amount_off_cents = Some(500);

    let result = CouponService::new(db).create(both).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests creating a coupon whose code is already used.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn rejects_duplicate_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::coupon::CouponFactory::new(db)
        .code("TAKEN")
        .build()
        .await?;

    let result = CouponService::new(db).create(params("TAKEN")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests scoping a coupon to an event that does not exist.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_unknown_event_scope() -> Result<(), AppError> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let mut scoped = params("SCOPED");
    scoped.event_id = Some(999);

    let result = CouponService::new(db).create(scoped).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}
