//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{check_delete_target, parse_id, redirect};
use crate::{
    error::AppResult,
    models::author::{AuthorDraft, AuthorForm},
    services::{DeleteCheck, DeleteOutcome, Submission},
    views, AppState,
};

const LIST_URL: &str = "/catalog/authors";

#[derive(Debug, Deserialize)]
pub struct DeleteAuthorForm {
    pub authorid: Option<String>,
}

/// List all authors
pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    Ok(views::authors::list(&authors))
}

/// Author with their books
pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Author")?;
    let (author, books) = state.services.authors.detail(id).await?;
    Ok(views::authors::detail(&author, &books))
}

pub async fn create_form() -> Html<String> {
    views::authors::form("Create Author", &AuthorDraft::default(), &[])
}

pub async fn create(State(state): State<AppState>, Form(form): Form<AuthorForm>) -> AppResult<Response> {
    match state.services.authors.create(&form).await? {
        Submission::Saved(author) | Submission::Duplicate(author) => Ok(redirect(&author.url())),
        Submission::Invalid { draft, errors } => {
            Ok(views::authors::form("Create Author", &draft, &errors).into_response())
        }
    }
}

pub async fn delete_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(redirect(LIST_URL));
    };

    match state.services.authors.delete_check(id).await? {
        DeleteCheck::Missing => Ok(redirect(LIST_URL)),
        DeleteCheck::Clear(author) => Ok(views::authors::delete(&author, &[]).into_response()),
        DeleteCheck::Blocked { parent, dependents } => {
            Ok(views::authors::delete(&parent, &dependents).into_response())
        }
    }
}

/// Delete unless books still reference the author
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(body): Form<DeleteAuthorForm>,
) -> AppResult<Response> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(redirect(LIST_URL));
    };
    check_delete_target(id, body.authorid.as_deref())?;

    match state.services.authors.delete(id).await? {
        DeleteOutcome::Missing | DeleteOutcome::Deleted => Ok(redirect(LIST_URL)),
        DeleteOutcome::Blocked { parent, dependents } => {
            Ok(views::authors::delete(&parent, &dependents).into_response())
        }
    }
}

pub async fn update_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Author")?;
    let author = state.services.authors.get_by_id(id).await?;
    Ok(views::authors::form("Update Author", &AuthorDraft::from(&author), &[]))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Author")?;
    match state.services.authors.update(id, &form).await? {
        Submission::Saved(author) | Submission::Duplicate(author) => Ok(redirect(&author.url())),
        Submission::Invalid { draft, errors } => {
            Ok(views::authors::form("Update Author", &draft, &errors).into_response())
        }
    }
}
