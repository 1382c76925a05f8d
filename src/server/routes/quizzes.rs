use axum::{
    extract::{FromRequest, Request, State},
    routing::post,
    Json, Router,
};
use rand::{rng, seq::IndexedRandom};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_quiz_candidates, Question},
    server::{app::AppState, errors::ApiError},
    telemetry::QUESTIONS_SERVED,
};

use super::ApiResponse;

/// Quiz category id meaning "any category".
pub const ALL_CATEGORIES: i64 = 0;

/// Quiz bodies are unprocessable however they fail to parse, malformed
/// JSON and missing content type included.
struct QuizJson<T>(T);

impl<S, T> FromRequest<S> for QuizJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(QuizJson(value)),
            Err(rejection) => {
                tracing::debug!("Bad quiz body: {rejection}");
                Err(ApiError::Unprocessable)
            }
        }
    }
}

#[derive(Deserialize)]
struct QuizCategory {
    // category ids come from the keys of a JSON object on the client
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct PlayRequest {
    quiz_category: QuizCategory,
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct PlayResponse {
    question: Question,
    success: bool,
}

async fn play(
    State(pool): State<SqlitePool>,
    QuizJson(request): QuizJson<PlayRequest>,
) -> ApiResponse<PlayResponse> {
    let category_id = request.quiz_category.id;
    let category = (category_id != ALL_CATEGORIES).then_some(category_id);
    let candidates = get_quiz_candidates(&pool, category, &request.previous_questions)
        .await
        .map_err(ApiError::unprocessable)?;

    let picked = candidates.choose(&mut rng()).cloned();
    let Some(question) = picked else {
        tracing::debug!(
            "No questions left in category {category_id} after {} played",
            request.previous_questions.len()
        );
        return Err(ApiError::QuestionsExhausted);
    };
    QUESTIONS_SERVED
        .with_label_values(&[&category_id.to_string()])
        .inc();

    Ok(Json(PlayResponse {
        question,
        success: true,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new().route("/play", post(play)).with_state(state)
}
