use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{self, get_all_categories, get_category},
            questions::get_questions_for_category,
        },
        Category, Question,
    },
    server::{app::AppState, deserializers::PageQuery, errors::ApiError, pagination::paginate},
};

use super::{ApiJson, ApiPath, ApiQuery, ApiResponse};

#[derive(Deserialize)]
struct NewCategory {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Serialize)]
struct CategoriesResponse {
    categories: BTreeMap<i64, String>,
    total_categories: usize,
    success: bool,
}

#[derive(Serialize)]
struct CategoryCreatedResponse {
    categories: Vec<Category>,
    created: i64,
    total_categories: usize,
    success: bool,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    questions: Vec<Question>,
    current_category: String,
    total_questions: usize,
    success: bool,
}

/// Maps category ids to their display names, the shape the client renders.
pub(crate) fn categories_by_id(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResponse<CategoriesResponse> {
    let categories = categories_by_id(get_all_categories(&pool).await?);
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(CategoriesResponse {
        total_categories: categories.len(),
        categories,
        success: true,
    }))
}

async fn create_category(
    State(pool): State<SqlitePool>,
    ApiJson(new_category): ApiJson<NewCategory>,
) -> ApiResponse<CategoryCreatedResponse> {
    let id = categories::create_category(&pool, &new_category.kind)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::info!("Created category {id}");

    let categories = get_all_categories(&pool)
        .await
        .map_err(ApiError::unprocessable)?;
    Ok(Json(CategoryCreatedResponse {
        total_categories: categories.len(),
        categories,
        created: id,
        success: true,
    }))
}

async fn list_category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(PageQuery { page }): ApiQuery<PageQuery>,
) -> ApiResponse<CategoryQuestionsResponse> {
    let category = get_category(&pool, id).await.map_err(ApiError::not_found)?;
    let questions = get_questions_for_category(&pool, category.id)
        .await
        .map_err(ApiError::not_found)?;

    Ok(Json(CategoryQuestionsResponse {
        total_questions: questions.len(),
        questions: paginate(page, questions),
        current_category: category.kind,
        success: true,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}/questions", get(list_category_questions))
        .with_state(state)
}
