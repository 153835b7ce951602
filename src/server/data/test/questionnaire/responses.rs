use super::*;

/// Tests storing and listing responses.
///
/// Expected: Ok with the submitted answers read back
#[tokio::test]
async fn stores_and_lists_responses() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let questionnaire = factory::questionnaire::create_questionnaire(db).await?;

    let answers: HashMap<String, String> =
        HashMap::from([("goals".to_string(), "Run 10k".to_string())]);

    let repo = QuestionnaireRepository::new(db);
    repo.create_response(questionnaire.id, user.id, answers.clone())
        .await?;

    let responses = repo.get_responses(questionnaire.id).await?;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].user_id, user.id);
    assert_eq!(responses[0].answers, answers);

    Ok(())
}

/// Tests that deleting a questionnaire removes its responses.
///
/// Expected: no responses remain
#[tokio::test]
async fn delete_removes_responses() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let questionnaire = factory::questionnaire::create_questionnaire(db).await?;

    let repo = QuestionnaireRepository::new(db);
    repo.create_response(questionnaire.id, user.id, HashMap::new())
        .await?;

    assert!(repo.delete(questionnaire.id).await?);
    assert!(repo.get_responses(questionnaire.id).await?.is_empty());

    Ok(())
}
