//! Author service

use uuid::Uuid;

use super::{DeleteCheck, DeleteOutcome, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorDraft, AuthorForm, AUTHOR_SCHEMA},
        book::BookSummary,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }

    /// Author plus the books they wrote
    pub async fn detail(&self, id: Uuid) -> AppResult<(Author, Vec<BookSummary>)> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.by_author(id),
        )?;
        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        Ok((author, books))
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<Submission<Author, AuthorDraft>> {
        let validated = AUTHOR_SCHEMA.validate(form);
        let draft = AuthorDraft::from_validated(&validated);
        if !validated.is_valid() {
            tracing::debug!("Author create rejected: {:?}", validated.errors());
            return Ok(Submission::Invalid {
                draft,
                errors: validated.into_errors(),
            });
        }

        let author = self.repository.authors.create(&draft).await?;
        tracing::info!("Created author id={}", author.id);
        Ok(Submission::Saved(author))
    }

    pub async fn update(&self, id: Uuid, form: &AuthorForm) -> AppResult<Submission<Author, AuthorDraft>> {
        let validated = AUTHOR_SCHEMA.validate(form);
        let draft = AuthorDraft::from_validated(&validated);
        if !validated.is_valid() {
            tracing::debug!("Author {} update rejected: {:?}", id, validated.errors());
            return Ok(Submission::Invalid {
                draft,
                errors: validated.into_errors(),
            });
        }

        let author = self
            .repository
            .authors
            .replace(id, &draft)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Updated author id={}", id);
        Ok(Submission::Saved(author))
    }

    pub async fn delete_check(&self, id: Uuid) -> AppResult<DeleteCheck<Author, BookSummary>> {
        let (author, books) = tokio::try_join!(
            self.repository.authors.find_by_id(id),
            self.repository.books.by_author(id),
        )?;
        Ok(DeleteCheck::new(author, books))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Author, BookSummary>> {
        match self.delete_check(id).await? {
            DeleteCheck::Missing => Ok(DeleteOutcome::Missing),
            DeleteCheck::Blocked { parent, dependents } => {
                tracing::info!(
                    "Author {} not deleted: referenced by {} book(s)",
                    id,
                    dependents.len()
                );
                Ok(DeleteOutcome::Blocked { parent, dependents })
            }
            DeleteCheck::Clear(_) => {
                self.repository.authors.delete(id).await?;
                tracing::info!("Deleted author id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
        }
    }
}
