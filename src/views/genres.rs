//! Genre pages

use axum::response::Html;

use super::{error_list, list_or, page};
use crate::{
    models::{book::BookSummary, genre::Genre, GenreDraft},
    validation::FieldError,
};

pub fn list(genres: &[Genre]) -> Html<String> {
    let content = list_or(genres, "There are no genres.", |g| {
        format!("<li><a href=\"{}\">{}</a></li>", g.url(), g.name)
    });
    page("Genre List", &content)
}

fn book_list(books: &[BookSummary], empty: &str) -> String {
    list_or(books, empty, |b| {
        format!(
            "<li><a href=\"{}\">{}</a><p>{}</p></li>",
            b.url(),
            b.title,
            b.summary
        )
    })
}

pub fn detail(genre: &Genre, books: &[BookSummary]) -> Html<String> {
    let content = format!(
        r#"<h2>{name}</h2>
<h3>Books</h3>
{books}
<hr>
<p><a href="{url}/delete">Delete genre</a></p>
<p><a href="{url}/update">Update genre</a></p>"#,
        name = genre.name,
        books = book_list(books, "This genre has no books."),
        url = genre.url(),
    );
    page(&format!("Genre: {}", genre.name), &content)
}

pub fn form(title: &str, draft: &GenreDraft, errors: &[FieldError]) -> Html<String> {
    let content = format!(
        r#"<form method="POST">
<div class="form-group">
<label for="name">Genre:</label>
<input id="name" type="text" name="name" placeholder="Fantasy, Poetry etc." value="{name}" required>
</div>
<button type="submit">Submit</button>
</form>
{errors}"#,
        name = draft.name,
        errors = error_list(errors),
    );
    page(title, &content)
}

pub fn delete(genre: &Genre, books: &[BookSummary]) -> Html<String> {
    let action = if books.is_empty() {
        format!(
            r#"<p>Do you really want to delete this Genre?</p>
<form method="POST">
<input id="genreid" type="hidden" name="genreid" value="{}" required>
<button type="submit">Delete</button>
</form>"#,
            genre.id
        )
    } else {
        format!(
            "<p><strong>Delete the following books before attempting to delete this genre.</strong></p><h3>Books</h3>{}",
            book_list(books, "")
        )
    };

    let content = format!(
        "<h2><a href=\"{}\">{}</a></h2>{}",
        genre.url(),
        genre.name,
        action
    );
    page("Delete Genre", &content)
}
