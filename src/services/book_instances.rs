//! Book instance service
//!
//! Copies have no dependents, so deletes go through unconditionally.

use uuid::Uuid;

use super::Submission;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        book_instance::{BookInstance, BookInstanceDraft, BookInstanceForm, BOOK_INSTANCE_SCHEMA},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstance>> {
        self.repository.book_instances.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        self.repository.book_instances.get_by_id(id).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        self.repository.book_instances.find_by_id(id).await
    }

    /// Books to choose from in the form
    pub async fn book_choices(&self) -> AppResult<Vec<BookSummary>> {
        self.repository.books.list_summaries().await
    }

    /// Current values plus book choices for the update form
    pub async fn edit(&self, id: Uuid) -> AppResult<(BookInstance, Vec<BookSummary>)> {
        let (instance, books) = tokio::try_join!(
            self.repository.book_instances.get_by_id(id),
            self.repository.books.list_summaries(),
        )?;
        Ok((instance, books))
    }

    pub async fn create(
        &self,
        form: &BookInstanceForm,
    ) -> AppResult<Submission<BookInstance, BookInstanceDraft>> {
        let mut validated = BOOK_INSTANCE_SCHEMA.validate(form);
        let draft = BookInstanceDraft::from_validated(&mut validated);
        if let Some(book_id) = draft.book_id {
            if self.repository.books.find_by_id(book_id).await?.is_none() {
                validated.push_error("book", "Book not found");
            }
        }
        if !validated.is_valid() {
            tracing::debug!("Book instance create rejected: {:?}", validated.errors());
            return Ok(Submission::Invalid {
                draft,
                errors: validated.into_errors(),
            });
        }

        let instance = self.repository.book_instances.create(&draft).await?;
        tracing::info!("Created book instance id={}", instance.id);
        Ok(Submission::Saved(instance))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: &BookInstanceForm,
    ) -> AppResult<Submission<BookInstance, BookInstanceDraft>> {
        let mut validated = BOOK_INSTANCE_SCHEMA.validate(form);
        let draft = BookInstanceDraft::from_validated(&mut validated);
        if let Some(book_id) = draft.book_id {
            if self.repository.books.find_by_id(book_id).await?.is_none() {
                validated.push_error("book", "Book not found");
            }
        }
        if !validated.is_valid() {
            tracing::debug!("Book instance {} update rejected: {:?}", id, validated.errors());
            return Ok(Submission::Invalid {
                draft,
                errors: validated.into_errors(),
            });
        }

        let instance = self
            .repository
            .book_instances
            .replace(id, &draft)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        tracing::info!("Updated book instance id={}", id);
        Ok(Submission::Saved(instance))
    }

    /// Returns whether the copy existed
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let deleted = self.repository.book_instances.delete(id).await?;
        if deleted {
            tracing::info!("Deleted book instance id={}", id);
        }
        Ok(deleted)
    }
}
