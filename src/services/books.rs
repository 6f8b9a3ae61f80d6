//! Book service

use uuid::Uuid;

use super::{DeleteCheck, DeleteOutcome, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDraft, BookForm, BookListEntry, BOOK_SCHEMA},
        book_instance::BookInstance,
        genre::Genre,
    },
    repository::Repository,
    validation::Validated,
};

/// Everything the book detail page shows
#[derive(Debug)]
pub struct BookDetail {
    pub book: Book,
    pub author: Author,
    pub genres: Vec<Genre>,
    pub instances: Vec<BookInstance>,
}

/// Lookup lists for the book form
#[derive(Debug, Default)]
pub struct BookFormContext {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        self.repository.books.list().await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let (book, genres, instances) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.repository.genres.list_for_book(id),
            self.repository.book_instances.by_book(id),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        let author = self.repository.authors.get_by_id(book.author_id).await?;
        Ok(BookDetail {
            book,
            author,
            genres,
            instances,
        })
    }

    pub async fn form_context(&self) -> AppResult<BookFormContext> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors.list(),
            self.repository.genres.list(),
        )?;
        Ok(BookFormContext { authors, genres })
    }

    /// Current values for the update form
    pub async fn edit(&self, id: Uuid) -> AppResult<(Book, BookDraft)> {
        let (book, genre_ids) = tokio::try_join!(
            self.repository.books.get_by_id(id),
            self.repository.books.genre_ids(id),
        )?;
        let draft = BookDraft::from_book(&book, genre_ids);
        Ok((book, draft))
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Submission<Book, BookDraft>> {
        let mut validated = BOOK_SCHEMA.validate(form);
        let draft = BookDraft::from_validated(&mut validated, &form.genre);
        self.check_references(&draft, &mut validated).await?;
        if !validated.is_valid() {
            tracing::debug!("Book create rejected: {:?}", validated.errors());
            return Ok(Submission::Invalid {
                draft,
                errors: validated.into_errors(),
            });
        }

        let book = self.repository.books.create(&draft).await?;
        tracing::info!("Created book id={}", book.id);
        Ok(Submission::Saved(book))
    }

    pub async fn update(&self, id: Uuid, form: &BookForm) -> AppResult<Submission<Book, BookDraft>> {
        let mut validated = BOOK_SCHEMA.validate(form);
        let draft = BookDraft::from_validated(&mut validated, &form.genre);
        self.check_references(&draft, &mut validated).await?;
        if !validated.is_valid() {
            tracing::debug!("Book {} update rejected: {:?}", id, validated.errors());
            return Ok(Submission::Invalid {
                draft,
                errors: validated.into_errors(),
            });
        }

        let book = self
            .repository
            .books
            .replace(id, &draft)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        tracing::info!("Updated book id={}", id);
        Ok(Submission::Saved(book))
    }

    /// Referenced author and genres must exist
    async fn check_references(&self, draft: &BookDraft, validated: &mut Validated) -> AppResult<()> {
        let (author, genres) = tokio::try_join!(
            async {
                match draft.author_id {
                    Some(id) => self.repository.authors.find_by_id(id).await,
                    None => Ok(None),
                }
            },
            self.repository.genres.existing_ids(&draft.genre_ids),
        )?;

        if draft.author_id.is_some() && author.is_none() {
            validated.push_error("author", "Author not found");
        }
        if genres.len() != draft.genre_ids.len() {
            validated.push_error("genre", "Genre not found");
        }
        Ok(())
    }

    pub async fn delete_check(&self, id: Uuid) -> AppResult<DeleteCheck<Book, BookInstance>> {
        let (book, instances) = tokio::try_join!(
            self.repository.books.find_by_id(id),
            self.repository.book_instances.by_book(id),
        )?;
        Ok(DeleteCheck::new(book, instances))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Book, BookInstance>> {
        match self.delete_check(id).await? {
            DeleteCheck::Missing => Ok(DeleteOutcome::Missing),
            DeleteCheck::Blocked { parent, dependents } => {
                tracing::info!(
                    "Book {} not deleted: {} copy(ies) remain",
                    id,
                    dependents.len()
                );
                Ok(DeleteOutcome::Blocked { parent, dependents })
            }
            DeleteCheck::Clear(_) => {
                self.repository.books.delete(id).await?;
                tracing::info!("Deleted book id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
        }
    }
}
