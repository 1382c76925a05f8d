use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
    pub rating: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
    pub rating: Option<i64>,
}

const SELECT_QUESTIONS: &str =
    "SELECT id, question, answer, category, difficulty, rating FROM questions";

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTIONS} ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Question> {
    sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTIONS} WHERE questions.id = ?1"))
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!(
        "{SELECT_QUESTIONS} WHERE questions.category = ?1 ORDER BY id"
    ))
    .bind(category)
    .fetch_all(pool)
    .await
}

/// Case-insensitive substring search over question text, in id order.
///
/// Matching happens here rather than in SQL: SQLite's `LIKE` and `lower()`
/// only fold ASCII letters.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let term = term.to_lowercase();
    let questions = get_all_questions(pool).await?;
    Ok(questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&term))
        .collect())
}

/// Questions a quiz may still ask: optionally restricted to one category,
/// never one of `previous`.
///
/// `previous` is filtered here so its length is not bounded by SQLite's
/// limit on bound parameters.
pub async fn get_quiz_candidates(
    pool: &SqlitePool,
    category: Option<i64>,
    previous: &[i64],
) -> sqlx::Result<Vec<Question>> {
    let questions = match category {
        Some(category) => get_questions_for_category(pool, category).await?,
        None => get_all_questions(pool).await?,
    };
    let previous: HashSet<i64> = previous.iter().copied().collect();
    Ok(questions
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect())
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty, rating) VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .bind(question.rating)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Fails with [`sqlx::Error::RowNotFound`] when there is nothing to delete.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_question_by_id(pool, id).await?;

    sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for q in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty, rating)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty,
                rating = excluded.rating
            "#,
        )
        .bind(q.id)
        .bind(&q.question)
        .bind(&q.answer)
        .bind(q.category)
        .bind(q.difficulty)
        .bind(q.rating)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
