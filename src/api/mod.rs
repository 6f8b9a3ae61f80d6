//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, ErrorReport},
    views, AppState,
};

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::list))
        .route("/author/create", get(authors::create_form).post(authors::create))
        .route("/author/:id", get(authors::detail))
        .route("/author/:id/delete", get(authors::delete_form).post(authors::delete))
        .route("/author/:id/update", get(authors::update_form).post(authors::update))
        // Genres
        .route("/genres", get(genres::list))
        .route("/genre/create", get(genres::create_form).post(genres::create))
        .route("/genre/:id", get(genres::detail))
        .route("/genre/:id/delete", get(genres::delete_form).post(genres::delete))
        .route("/genre/:id/update", get(genres::update_form).post(genres::update))
        // Books
        .route("/books", get(books::list))
        .route("/book/create", get(books::create_form).post(books::create))
        .route("/book/:id", get(books::detail))
        .route("/book/:id/delete", get(books::delete_form).post(books::delete))
        .route("/book/:id/update", get(books::update_form).post(books::update))
        // Book instances
        .route("/bookinstances", get(book_instances::list))
        .route(
            "/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create),
        )
        .route("/bookinstance/:id", get(book_instances::detail))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_form).post(book_instances::update),
        );

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), error_details))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

/// In development mode, re-render error pages with the underlying error
async fn error_details(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if !state.config.is_development() {
        return response;
    }

    match response.extensions().get::<ErrorReport>().cloned() {
        Some(report) => {
            let mut detailed = (report.status, views::error::page(&report, true)).into_response();
            detailed.extensions_mut().insert(report);
            detailed
        }
        None => response,
    }
}

/// Path identifiers that are not UUIDs cannot name a record
fn parse_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{} not found", entity)))
}

/// The hidden id field of a delete form, when sent, must name the page's record
fn check_delete_target(path_id: Uuid, body_id: Option<&str>) -> AppResult<()> {
    match body_id.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(()),
        Some(raw) if Uuid::parse_str(raw).ok() == Some(path_id) => Ok(()),
        Some(raw) => Err(AppError::BadRequest(format!(
            "Delete target {} does not match {}",
            raw, path_id
        ))),
    }
}

fn redirect(url: &str) -> Response {
    Redirect::to(url).into_response()
}
