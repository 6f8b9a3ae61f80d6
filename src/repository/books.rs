//! Books repository
//!
//! A book and its genre links are written together in one transaction.

use sqlx::{Pool, Sqlite, Transaction};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDraft, BookListEntry, BookSummary},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// All books by title, with their author's name
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let rows = sqlx::query_as::<_, BookListEntry>(
            r#"
            SELECT b.id, b.title, b.author_id,
                   a.first_name AS author_first_name,
                   a.family_name AS author_family_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.title, b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Titles only, for select boxes
    pub async fn list_summaries(&self) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books ORDER BY title, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Books written by an author
    pub async fn by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE author_id = ?1 ORDER BY title, id",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Books linked to a genre
    pub async fn by_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            r#"
            SELECT b.id, b.title, b.summary FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = ?1
            ORDER BY b.title, b.id
            "#,
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn genre_ids(&self, book_id: Uuid) -> AppResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT genre_id FROM book_genres WHERE book_id = ?1",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    pub async fn create(&self, draft: &BookDraft) -> AppResult<Book> {
        let author_id = required_author(draft)?;
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, summary, isbn, author_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&draft.title)
        .bind(&draft.summary)
        .bind(&draft.isbn)
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await?;

        link_genres(&mut tx, book.id, &draft.genre_ids).await?;
        tx.commit().await?;
        Ok(book)
    }

    /// Overwrite the book and its genre set; `None` when it does not exist
    pub async fn replace(&self, id: Uuid, draft: &BookDraft) -> AppResult<Option<Book>> {
        let author_id = required_author(draft)?;
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = ?2, summary = ?3, isbn = ?4, author_id = ?5
            WHERE id = ?1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.summary)
        .bind(&draft.isbn)
        .bind(author_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(book) = book else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM book_genres WHERE book_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        link_genres(&mut tx, id, &draft.genre_ids).await?;
        tx.commit().await?;
        Ok(Some(book))
    }

    /// Genre links go with the book (ON DELETE CASCADE)
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn required_author(draft: &BookDraft) -> AppResult<Uuid> {
    draft
        .author_id
        .ok_or_else(|| AppError::Internal("book draft without author".to_string()))
}

async fn link_genres(
    tx: &mut Transaction<'_, Sqlite>,
    book_id: Uuid,
    genre_ids: &[Uuid],
) -> AppResult<()> {
    for genre_id in genre_ids {
        sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES (?1, ?2)")
            .bind(book_id)
            .bind(genre_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
