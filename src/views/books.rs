//! Book pages

use axum::response::Html;

use super::{checked, error_list, list_or, page, selected};
use crate::{
    models::{
        book::{Book, BookListEntry},
        book_instance::{BookInstance, BookInstanceStatus},
        BookDraft,
    },
    services::books::{BookDetail, BookFormContext},
    validation::FieldError,
};

pub fn list(books: &[BookListEntry]) -> Html<String> {
    let content = list_or(books, "There are no books.", |b| {
        format!(
            "<li><a href=\"{}\">{}</a> ({})</li>",
            b.url(),
            b.title,
            b.author_name()
        )
    });
    page("Book List", &content)
}

pub(super) fn status_class(status: BookInstanceStatus) -> &'static str {
    match status {
        BookInstanceStatus::Available => "text-success",
        BookInstanceStatus::Maintenance => "text-danger",
        BookInstanceStatus::Loaned | BookInstanceStatus::Reserved => "text-warning",
    }
}

fn instance_list(instances: &[BookInstance], empty: &str) -> String {
    list_or(instances, empty, |copy| {
        let due = if copy.status == BookInstanceStatus::Available {
            String::new()
        } else {
            format!("<p><strong>Due back:</strong> {}</p>", copy.due_back_formatted())
        };
        format!(
            r#"<li><p class="{class}">{status}</p><p><strong>Imprint:</strong> {imprint}</p>{due}<p><strong>Id:</strong> <a href="{url}">{id}</a></p></li>"#,
            class = status_class(copy.status),
            status = copy.status,
            imprint = copy.imprint,
            due = due,
            url = copy.url(),
            id = copy.id,
        )
    })
}

pub fn detail(detail: &BookDetail) -> Html<String> {
    let genres = detail
        .genres
        .iter()
        .map(|g| format!("<a href=\"{}\">{}</a>", g.url(), g.name))
        .collect::<Vec<_>>()
        .join(", ");

    let content = format!(
        r#"<p><strong>Author:</strong> <a href="{author_url}">{author}</a></p>
<p><strong>Summary:</strong> {summary}</p>
<p><strong>ISBN:</strong> {isbn}</p>
<p><strong>Genre:</strong> {genres}</p>
<h3>Copies</h3>
{instances}
<hr>
<p><a href="{url}/delete">Delete book</a></p>
<p><a href="{url}/update">Update book</a></p>"#,
        author_url = detail.author.url(),
        author = detail.author.name(),
        summary = detail.book.summary,
        isbn = detail.book.isbn,
        genres = genres,
        instances = instance_list(&detail.instances, "There are no copies of this book in the library."),
        url = detail.book.url(),
    );
    page(&format!("Title: {}", detail.book.title), &content)
}

pub fn form(
    title: &str,
    draft: &BookDraft,
    context: &BookFormContext,
    errors: &[FieldError],
) -> Html<String> {
    let authors: String = context
        .authors
        .iter()
        .map(|a| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                a.id,
                selected(draft.author_id == Some(a.id)),
                a.name()
            )
        })
        .collect();

    let genres: String = context
        .genres
        .iter()
        .map(|g| {
            format!(
                r#"<div class="checkbox"><input type="checkbox" name="genre" id="genre-{id}" value="{id}"{checked}><label for="genre-{id}">{name}</label></div>"#,
                id = g.id,
                checked = checked(draft.genre_ids.contains(&g.id)),
                name = g.name,
            )
        })
        .collect();

    let content = format!(
        r#"<form method="POST">
<div class="form-group">
<label for="title">Title:</label>
<input id="title" type="text" name="title" placeholder="Name of book" value="{book_title}" required>
</div>
<div class="form-group">
<label for="author">Author:</label>
<select id="author" name="author" required>
<option value="">--Please select an author--</option>
{authors}
</select>
</div>
<div class="form-group">
<label for="summary">Summary:</label>
<textarea id="summary" name="summary" placeholder="Summary" required>{summary}</textarea>
</div>
<div class="form-group">
<label for="isbn">ISBN:</label>
<input id="isbn" type="text" name="isbn" placeholder="ISBN13" value="{isbn}" required>
</div>
<div class="form-group">
<label>Genre:</label>
{genres}
</div>
<button type="submit">Submit</button>
</form>
{errors}"#,
        book_title = draft.title,
        authors = authors,
        summary = draft.summary,
        isbn = draft.isbn,
        genres = genres,
        errors = error_list(errors),
    );
    page(title, &content)
}

pub fn delete(book: &Book, instances: &[BookInstance]) -> Html<String> {
    let action = if instances.is_empty() {
        format!(
            r#"<p>Do you really want to delete this Book?</p>
<form method="POST">
<input id="bookid" type="hidden" name="bookid" value="{}" required>
<button type="submit">Delete</button>
</form>"#,
            book.id
        )
    } else {
        format!(
            "<p><strong>Delete the following copies before attempting to delete this book.</strong></p><h3>Copies</h3>{}",
            instance_list(instances, "")
        )
    };

    let content = format!(
        "<h2><a href=\"{}\">{}</a></h2><p>{}</p>{}",
        book.url(),
        book.title,
        book.summary,
        action
    );
    page("Delete Book", &content)
}
