use std::collections::HashMap;

use crate::server::{
    error::AppError,
    model::questionnaire::{Question, QuestionnaireParams},
    service::questionnaire::QuestionnaireService,
};
use test_utils::{builder::TestBuilder, factory};

mod manage;

fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(id, answer)| (id.to_string(), answer.to_string()))
        .collect()
}
