//! Book pages
//!
//! Book forms carry one `genre` field per checked box, so they are parsed
//! with `axum_extra`'s form extractor, which collects repeated keys.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;
use uuid::Uuid;

use super::{check_delete_target, parse_id, redirect};
use crate::{
    error::AppResult,
    models::book::{BookDraft, BookForm},
    services::{DeleteCheck, DeleteOutcome, Submission},
    views, AppState,
};

const LIST_URL: &str = "/catalog/books";

#[derive(Debug, Deserialize)]
pub struct DeleteBookForm {
    pub bookid: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.books.list().await?;
    Ok(views::books::list(&books))
}

/// Book with author, genres and copies
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let detail = state.services.books.detail(id).await?;
    Ok(views::books::detail(&detail))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let context = state.services.books.form_context().await?;
    Ok(views::books::form("Create Book", &BookDraft::default(), &context, &[]))
}

pub async fn create(State(state): State<AppState>, Form(form): Form<BookForm>) -> AppResult<Response> {
    match state.services.books.create(&form).await? {
        Submission::Saved(book) | Submission::Duplicate(book) => Ok(redirect(&book.url())),
        Submission::Invalid { draft, errors } => {
            let context = state.services.books.form_context().await?;
            Ok(views::books::form("Create Book", &draft, &context, &errors).into_response())
        }
    }
}

pub async fn delete_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(redirect(LIST_URL));
    };

    match state.services.books.delete_check(id).await? {
        DeleteCheck::Missing => Ok(redirect(LIST_URL)),
        DeleteCheck::Clear(book) => Ok(views::books::delete(&book, &[]).into_response()),
        DeleteCheck::Blocked { parent, dependents } => {
            Ok(views::books::delete(&parent, &dependents).into_response())
        }
    }
}

/// Delete unless copies of the book remain
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(body): Form<DeleteBookForm>,
) -> AppResult<Response> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(redirect(LIST_URL));
    };
    check_delete_target(id, body.bookid.as_deref())?;

    match state.services.books.delete(id).await? {
        DeleteOutcome::Missing | DeleteOutcome::Deleted => Ok(redirect(LIST_URL)),
        DeleteOutcome::Blocked { parent, dependents } => {
            Ok(views::books::delete(&parent, &dependents).into_response())
        }
    }
}

pub async fn update_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book")?;
    let ((_, draft), context) = tokio::try_join!(
        state.services.books.edit(id),
        state.services.books.form_context(),
    )?;
    Ok(views::books::form("Update Book", &draft, &context, &[]))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book")?;
    match state.services.books.update(id, &form).await? {
        Submission::Saved(book) | Submission::Duplicate(book) => Ok(redirect(&book.url())),
        Submission::Invalid { draft, errors } => {
            let context = state.services.books.form_context().await?;
            Ok(views::books::form("Update Book", &draft, &context, &errors).into_response())
        }
    }
}
