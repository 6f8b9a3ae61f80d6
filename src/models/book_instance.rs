//! Book instance (physical copy) model

use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{FieldRules, FormInput, Schema, Validated};

/// Copy availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub const NAMES: &'static [&'static str] = &["Available", "Maintenance", "Loaned", "Reserved"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Book instance joined with its book's title
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: String,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn book_url(&self) -> String {
        format!("/catalog/book/{}", self.book_id)
    }

    pub fn due_back_formatted(&self) -> String {
        super::format_date(self.due_back)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BookInstanceForm {
    pub book: Option<String>,
    pub imprint: Option<String>,
    pub status: Option<String>,
    pub due_back: Option<String>,
}

impl FormInput for BookInstanceForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "book" => self.book.as_deref(),
            "imprint" => self.imprint.as_deref(),
            "status" => self.status.as_deref(),
            "due_back" => self.due_back.as_deref(),
            _ => None,
        }
    }
}

pub static BOOK_INSTANCE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        FieldRules::new("book")
            .trim()
            .min_length(1, "Book must be specified")
            .escape(),
        FieldRules::new("imprint")
            .trim()
            .min_length(1, "Imprint must be specified")
            .escape(),
        FieldRules::new("status")
            .optional()
            .escape()
            .one_of(BookInstanceStatus::NAMES, "Invalid status"),
        FieldRules::new("due_back").optional().iso_date("Invalid date"),
    ])
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInstanceDraft {
    pub book_id: Option<Uuid>,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceDraft {
    pub fn from_validated(validated: &mut Validated) -> Self {
        let book = validated.text("book");
        let book_id = if book.is_empty() {
            None
        } else {
            let parsed = Uuid::parse_str(&book).ok();
            if parsed.is_none() {
                validated.push_error("book", "Book not found");
            }
            parsed
        };

        Self {
            book_id,
            imprint: validated.text("imprint"),
            status: validated
                .optional_text("status")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            due_back: validated.date("due_back"),
        }
    }
}

impl From<&BookInstance> for BookInstanceDraft {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book_id: Some(instance.book_id),
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: instance.due_back,
        }
    }
}
