mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let (app, _) = setup().await;

    let page = get(&app, "/").await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog"));
}

#[tokio::test]
async fn test_catalog_index_counts() {
    let (app, _) = setup().await;
    let author_id = create_author(&app, "Isaac", "Asimov").await;
    let genre_id = create_genre(&app, "Science+Fiction").await;
    let book_id = create_book(&app, "Foundation", &author_id, &[&genre_id]).await;
    create_copy(&app, &book_id, "Gnome+Press", "Available").await;
    create_copy(&app, &book_id, "Bantam", "Loaned").await;

    let page = get(&app, "/catalog").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<strong>Books:</strong> 1"));
    assert!(page.body.contains("<strong>Copies:</strong> 2"));
    assert!(page.body.contains("<strong>Copies available:</strong> 1"));
    assert!(page.body.contains("<strong>Authors:</strong> 1"));
    assert!(page.body.contains("<strong>Genres:</strong> 1"));
}

#[tokio::test]
async fn test_empty_lists() {
    let (app, _) = setup().await;

    assert!(get(&app, "/catalog/authors").await.body.contains("There are no authors."));
    assert!(get(&app, "/catalog/genres").await.body.contains("There are no genres."));
    assert!(get(&app, "/catalog/books").await.body.contains("There are no books."));
    assert!(get(&app, "/catalog/bookinstances")
        .await
        .body
        .contains("There are no book copies in this library."));
}

#[tokio::test]
async fn test_create_forms_render() {
    let (app, _) = setup().await;

    for (uri, title) in [
        ("/catalog/author/create", "Create Author"),
        ("/catalog/genre/create", "Create Genre"),
        ("/catalog/book/create", "Create Book"),
        ("/catalog/bookinstance/create", "Create BookInstance"),
    ] {
        let page = get(&app, uri).await;
        assert_eq!(page.status, StatusCode::OK, "{}", uri);
        assert!(page.body.contains(title), "{}", uri);
        assert!(page.body.contains("<form method=\"POST\">"), "{}", uri);
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _) = setup().await;

    let page = get(&app, "/catalog/nothing/here").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("Not Found"));
}

#[tokio::test]
async fn test_health_and_readiness() {
    let (app, repository) = setup().await;

    let page = get(&app, "/health").await;
    assert_eq!(page.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&page.body).unwrap();
    assert_eq!(json["status"], "healthy");

    let page = get(&app, "/ready").await;
    assert_eq!(page.status, StatusCode::OK);

    repository.pool.close().await;
    let page = get(&app, "/ready").await;
    assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_database_failure_hides_detail_in_production() {
    let (app, repository) = setup_with_mode("production").await;
    repository.pool.close().await;

    let page = get(&app, "/catalog/authors").await;
    assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(page.body.contains("500"));
    assert!(!page.body.contains("class=\"detail\""));
}

#[tokio::test]
async fn test_database_failure_shows_detail_in_development() {
    let (app, repository) = setup_with_mode("development").await;
    repository.pool.close().await;

    let page = get(&app, "/catalog/authors").await;
    assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(page.body.contains("class=\"detail\""));
}

#[tokio::test]
async fn test_not_found_page_shows_detail_in_development() {
    let (app, _) = setup_with_mode("development").await;

    let page = get(&app, &format!("/catalog/genre/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("Genre not found"));
    assert!(page.body.contains("class=\"detail\""));
}
