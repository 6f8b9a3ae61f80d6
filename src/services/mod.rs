//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod integrity;

use crate::{repository::Repository, validation::FieldError};

pub use integrity::{DeleteCheck, DeleteOutcome};

/// Result of a create or update submission
#[derive(Debug)]
pub enum Submission<T, D> {
    /// Written; redirect to the record
    Saved(T),
    /// Rejected by validation; re-render with the entered values
    Invalid { draft: D, errors: Vec<FieldError> },
    /// Another record already holds the unique value; redirect to it
    Duplicate(T),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository),
        }
    }
}
