use std::collections::HashMap;

use crate::server::{
    data::questionnaire::QuestionnaireRepository,
    model::questionnaire::{Question, QuestionnaireParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod responses;
