//! Genre pages

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
    models::genre::{GenreDraft, GenreForm},
    services::{DeleteCheck, DeleteOutcome, Submission},
    views, AppState,
};

const LIST_URL: &str = "/catalog/genres";

#[derive(Debug, Deserialize)]
pub struct DeleteGenreForm {
    pub genreid: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    Ok(views::genres::list(&genres))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let (genre, books) = state.services.genres.detail(id).await?;
    Ok(views::genres::detail(&genre, &books))
}

pub async fn create_form() -> Html<String> {
    views::genres::form("Create Genre", &GenreDraft::default(), &[])
}

/// Create, or redirect to the genre that already has this name
pub async fn create(State(state): State<AppState>, Form(form): Form<GenreForm>) -> AppResult<Response> {
    match state.services.genres.create(&form).await? {
        Submission::Saved(genre) | Submission::Duplicate(genre) => Ok(redirect(&genre.url())),
        Submission::Invalid { draft, errors } => {
            Ok(views::genres::form("Create Genre", &draft, &errors).into_response())
        }
    }
}

pub async fn delete_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(redirect(LIST_URL));
    };

    match state.services.genres.delete_check(id).await? {
        DeleteCheck::Missing => Ok(redirect(LIST_URL)),
        DeleteCheck::Clear(genre) => Ok(views::genres::delete(&genre, &[]).into_response()),
        DeleteCheck::Blocked { parent, dependents } => {
            Ok(views::genres::delete(&parent, &dependents).into_response())
        }
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(body): Form<DeleteGenreForm>,
) -> AppResult<Response> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(redirect(LIST_URL));
    };
    check_delete_target(id, body.genreid.as_deref())?;

    match state.services.genres.delete(id).await? {
        DeleteOutcome::Missing | DeleteOutcome::Deleted => Ok(redirect(LIST_URL)),
        DeleteOutcome::Blocked { parent, dependents } => {
            Ok(views::genres::delete(&parent, &dependents).into_response())
        }
    }
}

pub async fn update_form(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Html<String>> {
    let id = parse_id(&id, "Genre")?;
    let genre = state.services.genres.get_by_id(id).await?;
    Ok(views::genres::form("Update Genre", &GenreDraft::from(&genre), &[]))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Genre")?;
    match state.services.genres.update(id, &form).await? {
        Submission::Saved(genre) | Submission::Duplicate(genre) => Ok(redirect(&genre.url())),
        Submission::Invalid { draft, errors } => {
            Ok(views::genres::form("Update Genre", &draft, &errors).into_response())
        }
    }
}
