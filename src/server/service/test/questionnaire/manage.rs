use super::*;

fn question(id: &str) -> Question {
    Question {
        id: id.to_string(),
        prompt: format!("Tell us about {}", id),
        required: false,
    }
}

/// Tests creating a questionnaire with two questions sharing an id.
///
/// Expected: Err(AppError::BadRequest)
#[tokio::test]
async fn rejects_duplicate_question_ids() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = QuestionnaireService::new(db)
        .create(QuestionnaireParams {
            title: "Check-in".to_string(),
            description: None,
            questions: vec![question("sleep"), question("sleep")],
            active: true,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests that inactive questionnaires are hidden from members.
///
/// Expected: absent from the active list, 404 by id
#[tokio::test]
async fn inactive_questionnaire_is_hidden() -> Result<(), AppError> {
    let test = TestBuilder::new().with_coaching_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = QuestionnaireService::new(db);
    let hidden = service
        .create(QuestionnaireParams {
            title: "Draft survey".to_string(),
            description: None,
            questions: vec![question("sleep")],
            active: false,
        })
        .await?;
    let visible = factory::questionnaire::create_questionnaire(db).await?;

    let active: Vec<i32> = service.get_active_list().await?.iter().map(|q| q.id).collect();
    assert_eq!(active, vec![visible.id]);
    assert!(matches!(
        service.get_active(hidden.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.submit(hidden.id, 1, answers(&[("sleep", "8h")])).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
