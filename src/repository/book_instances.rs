//! Book instances repository

use sqlx::{Pool, Sqlite};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book_instance::{BookInstance, BookInstanceDraft, BookInstanceStatus},
};

const SELECT_WITH_TITLE: &str = r#"
    SELECT bi.id, bi.book_id, b.title AS book_title, bi.imprint, bi.status, bi.due_back
    FROM book_instances bi
    JOIN books b ON b.id = bi.book_id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Sqlite>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// All copies, by book title then imprint
    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        let query = format!("{} ORDER BY b.title, bi.imprint, bi.id", SELECT_WITH_TITLE);
        let rows = sqlx::query_as::<_, BookInstance>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let query = format!("{} WHERE bi.id = ?1", SELECT_WITH_TITLE);
        let row = sqlx::query_as::<_, BookInstance>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))
    }

    /// Copies of one book
    pub async fn by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "{} WHERE bi.book_id = ?1 ORDER BY bi.imprint, bi.id",
            SELECT_WITH_TITLE
        );
        let rows = sqlx::query_as::<_, BookInstance>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, draft: &BookInstanceDraft) -> AppResult<BookInstance> {
        let book_id = required_book(draft)?;
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(id)
        .bind(book_id)
        .bind(&draft.imprint)
        .bind(draft.status)
        .bind(draft.due_back)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn replace(&self, id: Uuid, draft: &BookInstanceDraft) -> AppResult<Option<BookInstance>> {
        let book_id = required_book(draft)?;
        let result = sqlx::query(
            r#"
            UPDATE book_instances
            SET book_id = ?2, imprint = ?3, status = ?4, due_back = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(book_id)
        .bind(&draft.imprint)
        .bind(draft.status)
        .bind(draft.due_back)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = ?1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn required_book(draft: &BookInstanceDraft) -> AppResult<Uuid> {
    draft
        .book_id
        .ok_or_else(|| AppError::Internal("book instance draft without book".to_string()))
}
