//! Catalog home: record counts

use crate::{error::AppResult, models::book_instance::BookInstanceStatus, repository::Repository};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub books: i64,
    pub book_instances: i64,
    pub available_book_instances: i64,
    pub authors: i64,
    pub genres: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (books, book_instances, available_book_instances, authors, genres) = tokio::try_join!(
            self.repository.books.count(),
            self.repository.book_instances.count(),
            self.repository
                .book_instances
                .count_by_status(BookInstanceStatus::Available),
            self.repository.authors.count(),
            self.repository.genres.count(),
        )?;

        Ok(CatalogCounts {
            books,
            book_instances,
            available_book_instances,
            authors,
            genres,
        })
    }

    /// Database readiness
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
