//! Genre model

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::validation::{FieldRules, FormInput, Schema, Validated};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Case-insensitive lookup key: "Science Fiction", "SCIENCE FICTION" and
/// "science ﬁction" all map to the same key.
pub fn name_key(name: &str) -> String {
    name.nfkc().collect::<String>().to_lowercase()
}

#[derive(Debug, Default, Deserialize)]
pub struct GenreForm {
    pub name: Option<String>,
}

impl FormInput for GenreForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "name" => self.name.as_deref(),
            _ => None,
        }
    }
}

pub static GENRE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(vec![FieldRules::new("name")
        .trim()
        .min_length(3, "Genre name must contain at least 3 characters")
        .max_length(100, "Genre name must not exceed 100 characters")
        .escape()])
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreDraft {
    pub name: String,
}

impl GenreDraft {
    pub fn from_validated(validated: &Validated) -> Self {
        Self {
            name: validated.text("name"),
        }
    }

    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

impl From<&Genre> for GenreDraft {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}
