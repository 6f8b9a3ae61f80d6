//! Book instance (copy) pages

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
    models::book_instance::{BookInstanceDraft, BookInstanceForm},
    services::Submission,
    views, AppState,
};

const LIST_URL: &str = "/catalog/bookinstances";

#[derive(Debug, Deserialize)]
pub struct DeleteBookInstanceForm {
    pub bookinstanceid: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let instances = state.services.book_instances.list().await?;
    Ok(views::book_instances::list(&instances))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let instance = state.services.book_instances.get_by_id(id).await?;
    Ok(views::book_instances::detail(&instance))
}

pub async fn create_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    let books = state.services.book_instances.book_choices().await?;
    Ok(views::book_instances::form(
        "Create BookInstance",
        &BookInstanceDraft::default(),
        &books,
        &[],
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    match state.services.book_instances.create(&form).await? {
        Submission::Saved(instance) | Submission::Duplicate(instance) => Ok(redirect(&instance.url())),
        Submission::Invalid { draft, errors } => {
            let books = state.services.book_instances.book_choices().await?;
            Ok(views::book_instances::form("Create BookInstance", &draft, &books, &errors).into_response())
        }
    }
}

pub async fn delete_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(redirect(LIST_URL));
    };

    match state.services.book_instances.find_by_id(id).await? {
        None => Ok(redirect(LIST_URL)),
        Some(instance) => Ok(views::book_instances::delete(&instance).into_response()),
    }
}

/// Copies have no dependents: delete whenever it exists
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(body): Form<DeleteBookInstanceForm>,
) -> AppResult<Response> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(redirect(LIST_URL));
    };
    check_delete_target(id, body.bookinstanceid.as_deref())?;

    state.services.book_instances.delete(id).await?;
    Ok(redirect(LIST_URL))
}

pub async fn update_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Book copy")?;
    let (instance, books) = state.services.book_instances.edit(id).await?;
    Ok(views::book_instances::form(
        "Update BookInstance",
        &BookInstanceDraft::from(&instance),
        &books,
        &[],
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Book copy")?;
    match state.services.book_instances.update(id, &form).await? {
        Submission::Saved(instance) | Submission::Duplicate(instance) => Ok(redirect(&instance.url())),
        Submission::Invalid { draft, errors } => {
            let books = state.services.book_instances.book_choices().await?;
            Ok(views::book_instances::form("Update BookInstance", &draft, &books, &errors).into_response())
        }
    }
}
