mod common;

use axum::http::StatusCode;
use common::*;
use uuid::Uuid;

#[tokio::test]
async fn test_create_author_and_view_detail() {
    let (app, _) = setup().await;

    let page = post_form(&app, "/catalog/author/create", "first_name=Isaac&family_name=Asimov").await;
    let id = redirected_id(&page);
    assert_eq!(page.location.as_deref(), Some(format!("/catalog/author/{}", id).as_str()));

    let page = get(&app, &format!("/catalog/author/{}", id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Asimov, Isaac"));
    assert!(page.body.contains(&format!("/catalog/author/{}/delete", id)));
}

#[tokio::test]
async fn test_create_author_with_empty_first_name() {
    let (app, repository) = setup().await;

    let page = post_form(
        &app,
        "/catalog/author/create",
        "first_name=&family_name=Asimov&date_of_birth=1920-01-02",
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("First Name must be specified."));
    assert!(page.body.contains("value=\"Asimov\""));
    assert!(page.body.contains("value=\"1920-01-02\""));
    assert_eq!(repository.authors.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_author_rejects_bad_input() {
    let (app, repository) = setup().await;

    let page = post_form(
        &app,
        "/catalog/author/create",
        "first_name=J.R.R.&family_name=Tolkien&date_of_death=sometime",
    )
    .await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("First name has non-alphanumeric characters."));
    assert!(page.body.contains("Invalid date of death"));
    assert_eq!(repository.authors.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_author_list_is_sorted_by_family_name() {
    let (app, _) = setup().await;
    create_author(&app, "Roger", "Zelazny").await;
    create_author(&app, "Isaac", "Asimov").await;
    create_author(&app, "Ray", "Bradbury").await;

    let page = get(&app, "/catalog/authors").await;
    assert_eq!(page.status, StatusCode::OK);

    let asimov = page.body.find("Asimov, Isaac").unwrap();
    let bradbury = page.body.find("Bradbury, Ray").unwrap();
    let zelazny = page.body.find("Zelazny, Roger").unwrap();
    assert!(asimov < bradbury && bradbury < zelazny);
}

#[tokio::test]
async fn test_missing_author_is_not_found() {
    let (app, _) = setup().await;

    let page = get(&app, &format!("/catalog/author/{}", Uuid::new_v4())).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("Author not found"));

    let page = get(&app, "/catalog/author/not-an-id").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);

    let page = get(&app, &format!("/catalog/author/{}/update", Uuid::new_v4())).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_author_blocked_by_books() {
    let (app, repository) = setup().await;
    let author_id = create_author(&app, "Isaac", "Asimov").await;
    create_book(&app, "Foundation", &author_id, &[]).await;
    create_book(&app, "I+Robot", &author_id, &[]).await;

    let page = get(&app, &format!("/catalog/author/{}/delete", author_id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Delete the following books"));

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/delete", author_id),
        &format!("authorid={}", author_id),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Foundation"));
    assert!(page.body.contains("I Robot"));
    assert_eq!(repository.authors.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_author_without_books() {
    let (app, repository) = setup().await;
    let author_id = create_author(&app, "Isaac", "Asimov").await;

    let page = get(&app, &format!("/catalog/author/{}/delete", author_id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Do you really want to delete this Author?"));

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/delete", author_id),
        &format!("authorid={}", author_id),
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog/authors"));
    assert_eq!(repository.authors.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_missing_author_redirects_to_list() {
    let (app, _) = setup().await;
    let missing = Uuid::new_v4();

    let page = get(&app, &format!("/catalog/author/{}/delete", missing)).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog/authors"));

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/delete", missing),
        &format!("authorid={}", missing),
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog/authors"));
}

#[tokio::test]
async fn test_delete_with_mismatched_body_id() {
    let (app, repository) = setup().await;
    let author_id = create_author(&app, "Isaac", "Asimov").await;

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/delete", author_id),
        &format!("authorid={}", Uuid::new_v4()),
    )
    .await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert_eq!(repository.authors.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_author_replaces_record() {
    let (app, repository) = setup().await;
    let author_id = create_author(&app, "Isaac", "Asimov").await;

    let page = get(&app, &format!("/catalog/author/{}/update", author_id)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("value=\"Isaac\""));

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/update", author_id),
        "first_name=Ray&family_name=Bradbury&date_of_birth=1920-08-22",
    )
    .await;
    assert_eq!(redirected_id(&page), author_id);

    let author = repository
        .authors
        .get_by_id(Uuid::parse_str(&author_id).unwrap())
        .await
        .unwrap();
    assert_eq!(author.name(), "Bradbury, Ray");
    assert_eq!(author.formatted_birth(), "Aug 22, 1920");
    assert_eq!(author.date_of_death, None);
}

#[tokio::test]
async fn test_update_author_invalid_keeps_record() {
    let (app, repository) = setup().await;
    let author_id = create_author(&app, "Isaac", "Asimov").await;

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/update", author_id),
        "first_name=Ray&family_name=",
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Family name must be specified."));
    assert!(page.body.contains("value=\"Ray\""));

    let author = repository
        .authors
        .get_by_id(Uuid::parse_str(&author_id).unwrap())
        .await
        .unwrap();
    assert_eq!(author.name(), "Asimov, Isaac");
}

#[tokio::test]
async fn test_update_missing_author_is_not_found() {
    let (app, _) = setup().await;

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/update", Uuid::new_v4()),
        "first_name=Isaac&family_name=Asimov",
    )
    .await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}
