//! Genres repository

use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::genre::{Genre, GenreDraft},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Sqlite>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Genre> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    /// Earliest genre whose case-folded name matches `key`
    pub async fn find_by_name_key(&self, key: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres WHERE name_key = ?1 ORDER BY rowid LIMIT 1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Same as [`Self::find_by_name_key`] but ignoring the genre `except`
    pub async fn find_by_name_key_except(&self, key: &str, except: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres WHERE name_key = ?1 AND id <> ?2 ORDER BY rowid LIMIT 1",
        )
        .bind(key)
        .bind(except)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Genres linked to a book, by name
    pub async fn list_for_book(&self, book_id: Uuid) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name FROM genres g
            JOIN book_genres bg ON bg.genre_id = g.id
            WHERE bg.book_id = ?1
            ORDER BY g.name, g.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Which of `ids` exist
    pub async fn existing_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Uuid>> {
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM genres WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            found.extend(exists);
        }
        Ok(found)
    }

    pub async fn create(&self, draft: &GenreDraft) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name, name_key) VALUES (?1, ?2, ?3) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.name)
        .bind(draft.name_key())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn replace(&self, id: Uuid, draft: &GenreDraft) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = ?2, name_key = ?3 WHERE id = ?1 RETURNING id, name",
        )
        .bind(id)
        .bind(&draft.name)
        .bind(draft.name_key())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
