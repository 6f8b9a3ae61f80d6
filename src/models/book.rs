//! Book model and related types

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{escape_html, FieldRules, FormInput, Schema, Validated};

/// Book document as stored (genre links live in `book_genres`)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Title and summary, as shown in dependent lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book row joined with its author's name, for the book list
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookListEntry {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub author_first_name: String,
    pub author_family_name: String,
}

impl BookListEntry {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }

    pub fn author_name(&self) -> String {
        if self.author_first_name.is_empty() || self.author_family_name.is_empty() {
            String::new()
        } else {
            format!("{}, {}", self.author_family_name, self.author_first_name)
        }
    }
}

/// Submitted book form; `genre` repeats once per checked box
#[derive(Debug, Default, Deserialize)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

impl FormInput for BookForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "title" => self.title.as_deref(),
            "author" => self.author.as_deref(),
            "summary" => self.summary.as_deref(),
            "isbn" => self.isbn.as_deref(),
            _ => None,
        }
    }
}

pub static BOOK_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        FieldRules::new("title")
            .trim()
            .min_length(1, "Title must not be empty.")
            .escape(),
        FieldRules::new("author")
            .trim()
            .min_length(1, "Author must not be empty.")
            .escape(),
        FieldRules::new("summary")
            .trim()
            .min_length(1, "Summary must not be empty.")
            .escape(),
        FieldRules::new("isbn")
            .trim()
            .min_length(1, "ISBN must not be empty")
            .escape(),
    ])
});

/// Sanitized book payload with parsed references
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Option<Uuid>,
    pub genre_ids: Vec<Uuid>,
}

impl BookDraft {
    /// Build the draft, recording unparsable references as field errors
    pub fn from_validated(validated: &mut Validated, genres: &[String]) -> Self {
        let author = validated.text("author");
        let author_id = if author.is_empty() {
            None
        } else {
            let parsed = Uuid::parse_str(&author).ok();
            if parsed.is_none() {
                validated.push_error("author", "Author not found");
            }
            parsed
        };

        let mut genre_ids = Vec::with_capacity(genres.len());
        for raw in genres {
            match Uuid::parse_str(&escape_html(raw.trim())) {
                Ok(id) if !genre_ids.contains(&id) => genre_ids.push(id),
                Ok(_) => {}
                Err(_) => validated.push_error("genre", "Genre not found"),
            }
        }

        Self {
            title: validated.text("title"),
            summary: validated.text("summary"),
            isbn: validated.text("isbn"),
            author_id,
            genre_ids,
        }
    }

    pub fn from_book(book: &Book, genre_ids: Vec<Uuid>) -> Self {
        Self {
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            author_id: Some(book.author_id),
            genre_ids,
        }
    }
}
