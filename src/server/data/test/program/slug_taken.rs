use super::*;

/// Tests slug collision detection.
///
/// Verifies that a slug is reported as taken for other programs but not for the program
/// that already owns it.
///
/// Expected: taken for new programs, free for the owner
#[tokio::test]
async fn detects_slug_collisions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_content_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let program = factory::program::ProgramFactory::new(db)
        .slug("mobility")
        .build()
        .await?;

    let repo = ProgramRepository::new(db);
    assert!(repo.slug_taken("mobility", None).await?);
    assert!(!repo.slug_taken("mobility", Some(program.id)).await?);
    assert!(!repo.slug_taken("endurance", None).await?);

    Ok(())
}
