//! Shared helpers for the page tests
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use locallibrary_server::{
    api,
    config::{AppConfig, DatabaseConfig},
    repository::{self, Repository},
    AppState,
};
use tower::util::ServiceExt; // for `oneshot`

/// Router over a fresh in-memory database
pub async fn setup_with_mode(run_mode: &str) -> (Router, Repository) {
    let config = AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        run_mode: run_mode.to_string(),
        ..Default::default()
    };
    let pool = repository::connect(&config.database)
        .await
        .expect("Failed to init DB");
    let repository = Repository::new(pool);
    let state = AppState::new(config, repository.clone());
    (api::router(state), repository)
}

pub async fn setup() -> (Router, Repository) {
    setup_with_mode("production").await
}

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

async fn send(app: &Router, request: Request<Body>) -> Page {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    Page {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Page {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Page {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Id at the end of a redirect such as `/catalog/author/<id>`
pub fn redirected_id(page: &Page) -> String {
    assert_eq!(page.status, StatusCode::SEE_OTHER, "expected redirect: {}", page.body);
    let location = page.location.as_deref().expect("No location header");
    location.rsplit('/').next().unwrap().to_string()
}

pub async fn create_author(app: &Router, first_name: &str, family_name: &str) -> String {
    let page = post_form(
        app,
        "/catalog/author/create",
        &format!("first_name={}&family_name={}", first_name, family_name),
    )
    .await;
    redirected_id(&page)
}

pub async fn create_genre(app: &Router, name: &str) -> String {
    let page = post_form(app, "/catalog/genre/create", &format!("name={}", name)).await;
    redirected_id(&page)
}

pub async fn create_book(app: &Router, title: &str, author_id: &str, genre_ids: &[&str]) -> String {
    let mut body = format!(
        "title={}&author={}&summary=A+summary&isbn=9780000000000",
        title, author_id
    );
    for genre_id in genre_ids {
        body.push_str(&format!("&genre={}", genre_id));
    }
    let page = post_form(app, "/catalog/book/create", &body).await;
    redirected_id(&page)
}

pub async fn create_copy(app: &Router, book_id: &str, imprint: &str, status: &str) -> String {
    let page = post_form(
        app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint={}&status={}", book_id, imprint, status),
    )
    .await;
    redirected_id(&page)
}
