//! Data models for the LocalLibrary catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::{Author, AuthorDraft, AuthorForm};
pub use book::{Book, BookDraft, BookForm, BookListEntry, BookSummary};
pub use book_instance::{BookInstance, BookInstanceDraft, BookInstanceForm, BookInstanceStatus};
pub use genre::{Genre, GenreDraft, GenreForm};

/// Medium date format used on every page ("Jan 2, 1920")
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Value for an `<input type="date">`
pub fn input_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
