//! Author model and related types

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{FieldRules, FormInput, Schema, Validated};

/// Author document as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "family_name, first_name", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            String::new()
        } else {
            format!("{}, {}", self.family_name, self.first_name)
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn formatted_birth(&self) -> String {
        super::format_date(self.date_of_birth)
    }

    pub fn formatted_death(&self) -> String {
        super::format_date(self.date_of_death)
    }

    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        format!("{} - {}", self.formatted_birth(), self.formatted_death())
    }
}

/// Submitted author form
#[derive(Debug, Default, Deserialize)]
pub struct AuthorForm {
    pub first_name: Option<String>,
    pub family_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

impl FormInput for AuthorForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "first_name" => self.first_name.as_deref(),
            "family_name" => self.family_name.as_deref(),
            "date_of_birth" => self.date_of_birth.as_deref(),
            "date_of_death" => self.date_of_death.as_deref(),
            _ => None,
        }
    }
}

pub static AUTHOR_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![
        FieldRules::new("first_name")
            .trim()
            .min_length(1, "First Name must be specified.")
            .max_length(100, "First name must not exceed 100 characters.")
            .escape()
            .alphanumeric("First name has non-alphanumeric characters."),
        FieldRules::new("family_name")
            .trim()
            .min_length(1, "Family name must be specified.")
            .max_length(100, "Family name must not exceed 100 characters.")
            .escape()
            .alphanumeric("Family name has non-alphanumeric characters."),
        FieldRules::new("date_of_birth")
            .optional()
            .iso_date("Invalid date of birth"),
        FieldRules::new("date_of_death")
            .optional()
            .iso_date("Invalid date of death"),
    ])
});

/// Sanitized author payload; also what the form re-renders with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorDraft {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorDraft {
    pub fn from_validated(validated: &Validated) -> Self {
        Self {
            first_name: validated.text("first_name"),
            family_name: validated.text("family_name"),
            date_of_birth: validated.date("date_of_birth"),
            date_of_death: validated.date("date_of_death"),
        }
    }
}

impl From<&Author> for AuthorDraft {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}
