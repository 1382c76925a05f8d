use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_all_categories,
            questions::{self, count_questions, get_all_questions, search_questions},
        },
        NewQuestion, Question,
    },
    server::{app::AppState, deserializers::PageQuery, errors::ApiError, pagination::paginate},
    telemetry::QUESTIONS_CREATED,
};

use super::{categories::categories_by_id, ApiJson, ApiPath, ApiQuery, ApiResponse};

// the client posts select values as strings, so numbers may come either way
#[derive(Deserialize)]
struct NewQuestionBody {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    rating: Option<i64>,
}

impl From<NewQuestionBody> for NewQuestion {
    fn from(body: NewQuestionBody) -> Self {
        NewQuestion {
            question: body.question,
            answer: body.answer,
            category: body.category,
            difficulty: body.difficulty,
            rating: body.rating,
        }
    }
}

/// `POST /questions` searches when given a non-empty `searchTerm` and creates
/// a question otherwise.
#[derive(Deserialize)]
#[serde(try_from = "Value")]
enum QuestionsRequest {
    Search(String),
    Create(NewQuestionBody),
}

impl TryFrom<Value> for QuestionsRequest {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value.get("searchTerm").and_then(Value::as_str) {
            Some(term) if !term.is_empty() => Ok(QuestionsRequest::Search(term.to_owned())),
            _ => serde_json::from_value::<NewQuestionBody>(value)
                .map(QuestionsRequest::Create)
                .map_err(|e| format!("Invalid question: {e}")),
        }
    }
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    success: bool,
}

#[derive(Serialize)]
struct QuestionDeleted {
    deleted: i64,
    success: bool,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QuestionsPosted {
    Created {
        questions: Vec<Question>,
        created: i64,
        total_questions: i64,
        success: bool,
    },
    // `total_question` is singular on purpose, clients read that key
    Found {
        questions: Vec<Question>,
        total_question: usize,
        success: bool,
    },
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<QuestionsPage> {
    let questions = get_all_questions(&pool).await?;
    let total_questions = questions.len();
    let current = paginate(page, questions);
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        questions: current,
        total_questions,
        categories: categories_by_id(get_all_categories(&pool).await?),
        success: true,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<QuestionDeleted> {
    // a missing question is reported as 422 like every other delete failure
    questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!("Deleted question {id}");

    Ok(Json(QuestionDeleted {
        deleted: id,
        success: true,
    }))
}

async fn post_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
    ApiJson(request): ApiJson<QuestionsRequest>,
) -> ApiResponse<QuestionsPosted> {
    match request {
        QuestionsRequest::Search(term) => {
            let found = search_questions(&pool, &term)
                .await
                .map_err(ApiError::unprocessable)?;
            tracing::debug!("Search for {term:?} matched {} questions", found.len());
            Ok(Json(QuestionsPosted::Found {
                total_question: found.len(),
                questions: paginate(page, found),
                success: true,
            }))
        }
        QuestionsRequest::Create(body) => {
            let id = questions::create_question(&pool, &body.into())
                .await
                .map_err(ApiError::unprocessable)?;
            QUESTIONS_CREATED.inc();
            tracing::info!("Created question {id}");

            let all = get_all_questions(&pool)
                .await
                .map_err(ApiError::unprocessable)?;
            Ok(Json(QuestionsPosted::Created {
                questions: paginate(page, all),
                created: id,
                total_questions: count_questions(&pool)
                    .await
                    .map_err(ApiError::unprocessable)?,
                success: true,
            }))
        }
    }
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
