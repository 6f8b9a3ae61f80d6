//! Authors repository

use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorDraft},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// All authors by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT * FROM authors ORDER BY family_name, first_name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    pub async fn create(&self, draft: &AuthorDraft) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&draft.first_name)
        .bind(&draft.family_name)
        .bind(draft.date_of_birth)
        .bind(draft.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite every field; `None` when the author does not exist
    pub async fn replace(&self, id: Uuid, draft: &AuthorDraft) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = ?2, family_name = ?3, date_of_birth = ?4, date_of_death = ?5
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.first_name)
        .bind(&draft.family_name)
        .bind(draft.date_of_birth)
        .bind(draft.date_of_death)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Returns whether a row was removed
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
