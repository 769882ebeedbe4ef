//! Chat-facing routes
//!
//! Used by the student/alumni chat frontend. The anonymous session id
//! comes from the cookie middleware, never from the request body.

use super::AppState;
use crate::error::ApiError;
use crate::session::SessionId;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use careerchat_core::types::UserType;
use serde::Deserialize;
use serde_json::{json, Value};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get-chat", post(get_chat))
        .route("/get-common-questions", get(get_common_questions))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetChatRequest {
    /// Free-text question; required unless `questionId` is given
    question: Option<String>,
    /// Quick-suggestion id; answered from the FAQ dataset directly
    question_id: Option<i64>,
    user_type: Option<String>,
}

async fn get_chat(
    State(state): State<AppState>,
    Extension(SessionId(session_id)): Extension<SessionId>,
    Json(body): Json<GetChatRequest>,
) -> Result<Json<Value>, ApiError> {
    let user_type = UserType::from_label(body.user_type.as_deref());

    let answer = match body.question_id {
        Some(id) => state.chat.answer_common(&session_id, user_type, id)?,
        None => {
            let question = body.question.unwrap_or_default();
            state.chat.ask(&session_id, user_type, &question).await?
        }
    };

    Ok(Json(json!({ "answer": answer })))
}

async fn get_common_questions(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let questions = state.faq.common()?;
    Ok(Json(json!({ "questions": questions })))
}
