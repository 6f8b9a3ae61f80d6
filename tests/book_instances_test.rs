mod common;

use axum::http::StatusCode;
use common::*;
use uuid::Uuid;

async fn book(app: &axum::Router) -> String {
    let author_id = create_author(app, "Isaac", "Asimov").await;
    create_book(app, "Foundation", &author_id, &[]).await
}

#[tokio::test]
async fn test_create_copy_and_view_detail() {
    let (app, _) = setup().await;
    let book_id = book(&app).await;

    let page = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Gnome+Press+1951&status=Loaned&due_back=2024-03-05", book_id),
    )
    .await;
    let id = redirected_id(&page);
    assert_eq!(page.location.as_deref(), Some(format!("/catalog/bookinstance/{}", id).as_str()));

    let page = get(&app, &format!("/catalog/bookinstance/{}", id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Foundation"));
    assert!(page.body.contains("Gnome Press 1951"));
    assert!(page.body.contains("Loaned"));
    assert!(page.body.contains("Mar 5, 2024"));
}

#[tokio::test]
async fn test_copy_status_defaults_to_maintenance() {
    let (app, repository) = setup().await;
    let book_id = book(&app).await;

    let page = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Gnome+Press", book_id),
    )
    .await;
    let id = Uuid::parse_str(&redirected_id(&page)).unwrap();

    let copy = repository.book_instances.get_by_id(id).await.unwrap();
    assert_eq!(copy.status.as_str(), "Maintenance");
    assert_eq!(copy.due_back, None);
}

#[tokio::test]
async fn test_create_copy_rejects_bad_input() {
    let (app, repository) = setup().await;
    let book_id = book(&app).await;

    let page = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=&status=Lost&due_back=soon", book_id),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Imprint must be specified"));
    assert!(page.body.contains("Invalid status"));
    assert!(page.body.contains("Invalid date"));
    assert_eq!(repository.book_instances.count().await.unwrap(), 0);

    let page = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Gnome+Press&status=Available", Uuid::new_v4()),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Book not found"));
    assert_eq!(repository.book_instances.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_copy() {
    let (app, repository) = setup().await;
    let book_id = book(&app).await;
    let id = create_copy(&app, &book_id, "Gnome+Press", "Maintenance").await;

    let page = get(&app, &format!("/catalog/bookinstance/{}/update", id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("value=\"Gnome Press\""));

    let page = post_form(
        &app,
        &format!("/catalog/bookinstance/{}/update", id),
        &format!("book={}&imprint=Gnome+Press&status=Available", book_id),
    )
    .await;
    assert_eq!(redirected_id(&page), id);

    let copy = repository
        .book_instances
        .get_by_id(Uuid::parse_str(&id).unwrap())
        .await
        .unwrap();
    assert_eq!(copy.status.as_str(), "Available");

    let page = post_form(
        &app,
        &format!("/catalog/bookinstance/{}/update", Uuid::new_v4()),
        &format!("book={}&imprint=Gnome+Press&status=Available", book_id),
    )
    .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_copy_list_shows_status() {
    let (app, _) = setup().await;
    let book_id = book(&app).await;
    create_copy(&app, &book_id, "First+Edition", "Available").await;
    create_copy(&app, &book_id, "Second+Edition", "Reserved").await;

    let page = get(&app, "/catalog/bookinstances").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Foundation : First Edition"));
    assert!(page.body.contains("text-success"));
    assert!(page.body.contains("Reserved"));
}

#[tokio::test]
async fn test_delete_copy() {
    let (app, repository) = setup().await;
    let book_id = book(&app).await;
    let id = create_copy(&app, &book_id, "Gnome+Press", "Available").await;

    let page = get(&app, &format!("/catalog/bookinstance/{}/delete", id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Do you really want to delete this BookInstance?"));

    let page = post_form(
        &app,
        &format!("/catalog/bookinstance/{}/delete", id),
        &format!("bookinstanceid={}", id),
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog/bookinstances"));
    assert_eq!(repository.book_instances.count().await.unwrap(), 0);

    let page = get(&app, &format!("/catalog/bookinstance/{}", id)).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_copy_list_is_sorted_by_title_then_imprint() {
    let (app, _) = setup().await;
    let author_id = create_author(&app, "Isaac", "Asimov").await;
    let zeta = create_book(&app, "Zeta", &author_id, &[]).await;
    let alpha = create_book(&app, "Alpha", &author_id, &[]).await;
    create_copy(&app, &zeta, "Z1", "Available").await;
    create_copy(&app, &alpha, "B2", "Available").await;
    create_copy(&app, &alpha, "A1", "Available").await;

    let page = get(&app, "/catalog/bookinstances").await;
    assert_eq!(page.status, StatusCode::OK);
    let alpha_a1 = page.body.find("Alpha : A1").unwrap();
    let alpha_b2 = page.body.find("Alpha : B2").unwrap();
    let zeta_z1 = page.body.find("Zeta : Z1").unwrap();
    assert!(alpha_a1 < alpha_b2 && alpha_b2 < zeta_z1);
}

#[tokio::test]
async fn test_unknown_book_error_comes_first() {
    let (app, _) = setup().await;

    let page = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=&status=Available", Uuid::new_v4()),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    let book = page.body.find("Book not found").unwrap();
    let imprint = page.body.find("Imprint must be specified").unwrap();
    assert!(book < imprint);
}
