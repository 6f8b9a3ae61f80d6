//! Genre service
//!
//! Genre names are unique ignoring case. The check is a read before the
//! write; a submission that collides resolves to the genre created first.

use uuid::Uuid;

use super::{DeleteCheck, DeleteOutcome, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        genre::{Genre, GenreDraft, GenreForm, GENRE_SCHEMA},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<(Genre, Vec<BookSummary>)> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.by_genre(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        Ok((genre, books))
    }

    pub async fn create(&self, form: &GenreForm) -> AppResult<Submission<Genre, GenreDraft>> {
        let validated = GENRE_SCHEMA.validate(form);
        let draft = GenreDraft::from_validated(&validated);
        if !validated.is_valid() {
            tracing::debug!("Genre create rejected: {:?}", validated.errors());
            return Ok(Submission::Invalid {
                draft,
                errors: validated.into_errors(),
            });
        }

        if let Some(existing) = self.repository.genres.find_by_name_key(&draft.name_key()).await? {
            tracing::info!("Genre '{}' already exists as id={}", draft.name, existing.id);
            return Ok(Submission::Duplicate(existing));
        }

        let genre = self.repository.genres.create(&draft).await?;
        tracing::info!("Created genre id={}", genre.id);
        Ok(Submission::Saved(genre))
    }

    pub async fn update(&self, id: Uuid, form: &GenreForm) -> AppResult<Submission<Genre, GenreDraft>> {
        let validated = GENRE_SCHEMA.validate(form);
        let draft = GenreDraft::from_validated(&validated);
        if !validated.is_valid() {
            tracing::debug!("Genre {} update rejected: {:?}", id, validated.errors());
            return Ok(Submission::Invalid {
                draft,
                errors: validated.into_errors(),
            });
        }

        let key = draft.name_key();
        let (current, existing) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.genres.find_by_name_key_except(&key, id),
        )?;
        if current.is_none() {
            return Err(AppError::NotFound("Genre not found".to_string()));
        }
        if let Some(existing) = existing {
            tracing::info!(
                "Genre {} not renamed: '{}' belongs to id={}",
                id,
                draft.name,
                existing.id
            );
            return Ok(Submission::Duplicate(existing));
        }

        let genre = self
            .repository
            .genres
            .replace(id, &draft)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        tracing::info!("Updated genre id={}", id);
        Ok(Submission::Saved(genre))
    }

    pub async fn delete_check(&self, id: Uuid) -> AppResult<DeleteCheck<Genre, BookSummary>> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres.find_by_id(id),
            self.repository.books.by_genre(id),
        )?;
        Ok(DeleteCheck::new(genre, books))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<Genre, BookSummary>> {
        match self.delete_check(id).await? {
            DeleteCheck::Missing => Ok(DeleteOutcome::Missing),
            DeleteCheck::Blocked { parent, dependents } => {
                tracing::info!(
                    "Genre {} not deleted: referenced by {} book(s)",
                    id,
                    dependents.len()
                );
                Ok(DeleteOutcome::Blocked { parent, dependents })
            }
            DeleteCheck::Clear(_) => {
                self.repository.genres.delete(id).await?;
                tracing::info!("Deleted genre id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
        }
    }
}
