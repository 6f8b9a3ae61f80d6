//! Author pages

use axum::response::Html;

use super::{error_list, list_or, page};
use crate::{
    models::{author::Author, book::BookSummary, input_date, AuthorDraft},
    validation::FieldError,
};

pub fn list(authors: &[Author]) -> Html<String> {
    let content = list_or(authors, "There are no authors.", |a| {
        format!(
            "<li><a href=\"{}\">{}</a> ({})</li>",
            a.url(),
            a.name(),
            a.lifespan()
        )
    });
    page("Author List", &content)
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

pub fn detail(author: &Author, books: &[BookSummary]) -> Html<String> {
    let content = format!(
        r#"<h2>{name}</h2>
<p>{lifespan}</p>
<h3>Books</h3>
{books}
<hr>
<p><a href="{url}/delete">Delete author</a></p>
<p><a href="{url}/update">Update author</a></p>"#,
        name = author.name(),
        lifespan = author.lifespan(),
        books = book_list(books, "This author has no books."),
        url = author.url(),
    );
    page(&format!("Author: {}", author.name()), &content)
}

pub fn form(title: &str, draft: &AuthorDraft, errors: &[FieldError]) -> Html<String> {
    let content = format!(
        r#"<form method="POST">
<div class="form-group">
<label for="first_name">First Name:</label>
<input id="first_name" type="text" name="first_name" placeholder="First name" value="{first_name}" required>
<label for="family_name">Family Name:</label>
<input id="family_name" type="text" name="family_name" placeholder="Family name" value="{family_name}" required>
</div>
<div class="form-group">
<label for="date_of_birth">Date of birth:</label>
<input id="date_of_birth" type="date" name="date_of_birth" value="{date_of_birth}">
<label for="date_of_death">Date of death:</label>
<input id="date_of_death" type="date" name="date_of_death" value="{date_of_death}">
</div>
<button type="submit">Submit</button>
</form>
{errors}"#,
        first_name = draft.first_name,
        family_name = draft.family_name,
        date_of_birth = input_date(draft.date_of_birth),
        date_of_death = input_date(draft.date_of_death),
        errors = error_list(errors),
    );
    page(title, &content)
}

/// Delete confirmation; lists the blocking books instead of the button
pub fn delete(author: &Author, books: &[BookSummary]) -> Html<String> {
    let action = if books.is_empty() {
        format!(
            r#"<p>Do you really want to delete this Author?</p>
<form method="POST">
<input id="authorid" type="hidden" name="authorid" value="{}" required>
<button type="submit">Delete</button>
</form>"#,
            author.id
        )
    } else {
        format!(
            "<p><strong>Delete the following books before attempting to delete this author.</strong></p><h3>Books</h3>{}",
            book_list(books, "")
        )
    };

    let content = format!(
        "<h2><a href=\"{}\">{}</a></h2><p>{}</p>{}",
        author.url(),
        author.name(),
        author.lifespan(),
        action
    );
    page("Delete Author", &content)
}
