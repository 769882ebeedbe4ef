//! Dashboard routes
//!
//! FAQ management plus the analytics endpoints behind the staff
//! dashboard charts. Month parameters are 1-12 everywhere; a missing
//! `year` is a 400.

use super::AppState;
use crate::error::ApiError;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use careerchat_core::faq::NewFaq;
use careerchat_core::types::Period;
use careerchat_core::Error;
use serde::Deserialize;
use serde_json::{json, Value};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/question",
            post(add_question).put(edit_question).delete(delete_question),
        )
        .route("/questions", get(list_questions))
        .route("/toggle-common-question", post(toggle_common_question))
        .route("/get-questions-type", get(questions_by_type))
        .route("/get-usage", get(usage))
        .route("/most-common-type-questions", get(most_common_questions))
        .route("/user-interactions", get(user_interactions))
}

// ============================================
// FAQ management
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditRequest {
    id: i64,
    #[serde(flatten)]
    entry: NewFaq,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionIdRequest {
    question_id: i64,
}

async fn list_questions(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    Ok(Json(json!({ "questions": state.faq.list()? })))
}

async fn add_question(
    State(state): State<AppState>,
    Json(body): Json<NewFaq>,
) -> Result<Json<Value>, ApiError> {
    state.faq.add(body)?;
    Ok(Json(json!({ "questions": state.faq.list()? })))
}

async fn edit_question(
    State(state): State<AppState>,
    Json(body): Json<EditRequest>,
) -> Result<Json<Value>, ApiError> {
    state.faq.update(body.id, body.entry)?;
    Ok(Json(json!({ "questions": state.faq.list()? })))
}

async fn delete_question(
    State(state): State<AppState>,
    Json(body): Json<QuestionIdRequest>,
) -> Result<Json<Value>, ApiError> {
    state.faq.delete(body.question_id)?;
    Ok(Json(json!({ "questions": state.faq.list()? })))
}

async fn toggle_common_question(
    State(state): State<AppState>,
    Json(body): Json<QuestionIdRequest>,
) -> Result<Json<Value>, ApiError> {
    let toggled = state.faq.toggle_common(body.question_id)?;
    Ok(Json(json!({
        "questions": toggled.questions,
        "commonQuestions": toggled.common_questions,
    })))
}

// ============================================
// Analytics
// ============================================

#[derive(Debug, Deserialize)]
struct PeriodQuery {
    year: Option<i32>,
    month: Option<u32>,
    limit: Option<usize>,
}

impl PeriodQuery {
    fn period(&self) -> Result<Period, Error> {
        let year = self
            .year
            .ok_or_else(|| Error::Validation("year is required".to_string()))?;
        Period::new(year, self.month)
    }
}

async fn questions_by_type(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Value>, ApiError> {
    let report = state.aggregator.category_histogram(query.period()?)?;
    Ok(Json(json!({ "report": report })))
}

async fn usage(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Value>, ApiError> {
    let period = query.period()?;
    let summary = state.aggregator.usage_summary(period)?;

    // The daily series needs a month; a year-level query still gets the
    // summary with an empty series.
    let usage_data = match period.month_value() {
        Some(_) => state.aggregator.daily_usage(period)?,
        None => Vec::new(),
    };

    Ok(Json(json!({
        "usageData": usage_data,
        "summary": summary,
    })))
}

async fn most_common_questions(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Value>, ApiError> {
    let top = state
        .aggregator
        .top_questions(query.period()?, query.limit)?;
    Ok(Json(json!({ "mostCommonTypeQuestions": top })))
}

async fn user_interactions(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<Value>, ApiError> {
    let interactions = state.aggregator.recent_interactions(query.limit)?;
    Ok(Json(json!({ "userInteractions": interactions })))
}
