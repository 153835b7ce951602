use super::*;

/// Tests creating a program.
///
/// Expected: Ok with every field stored
#[tokio::test]
async fn creates_program() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProgramRepository::new(db);
    let program = repo.create(params("strength")).await?;

    assert_eq!(program.slug, "strength");
    assert_eq!(program.min_tier, TierLevel::Pro);
    assert_eq!(program.status, PublishStatus::Draft);
    assert_eq!(repo.find_by_slug("strength").await?, Some(program));

    Ok(())
}

/// Tests updating and deleting a program.
///
/// Expected: update replaces fields, delete removes the row once
#[tokio::test]
async fn updates_and_deletes_program() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProgramRepository::new(db);
    let program = repo.create(params("strength")).await?;

    let mut changed = params("strength-v2");
    changed.status = PublishStatus::Published;
    let updated = repo.update(program.id, changed).await?.unwrap();
    assert_eq!(updated.slug, "strength-v2");
    assert_eq!(updated.status, PublishStatus::Published);

    assert!(repo.delete(program.id).await?);
    assert!(!repo.delete(program.id).await?);
    assert!(repo.update(program.id, params("gone")).await?.is_none());

    Ok(())
}
