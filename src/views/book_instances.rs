//! Book instance (copy) pages

use axum::response::Html;

use super::{books::status_class, error_list, list_or, page, selected};
use crate::{
    models::{
        book::BookSummary,
        book_instance::{BookInstance, BookInstanceStatus},
        input_date, BookInstanceDraft,
    },
    validation::FieldError,
};

pub fn list(instances: &[BookInstance]) -> Html<String> {
    let content = list_or(instances, "There are no book copies in this library.", |copy| {
        let due = if copy.status == BookInstanceStatus::Available {
            String::new()
        } else {
            format!(" (Due: {})", copy.due_back_formatted())
        };
        format!(
            r#"<li><a href="{url}">{title} : {imprint}</a> - <span class="{class}">{status}</span>{due}</li>"#,
            url = copy.url(),
            title = copy.book_title,
            imprint = copy.imprint,
            class = status_class(copy.status),
            status = copy.status,
            due = due,
        )
    });
    page("Book Instance List", &content)
}

fn summary(copy: &BookInstance) -> String {
    let due = if copy.status == BookInstanceStatus::Available {
        String::new()
    } else {
        format!("<p><strong>Due back:</strong> {}</p>", copy.due_back_formatted())
    };
    format!(
        r#"<h2>ID: {id}</h2>
<p><strong>Title:</strong> <a href="{book_url}">{title}</a></p>
<p><strong>Imprint:</strong> {imprint}</p>
<p><strong>Status:</strong> <span class="{class}">{status}</span></p>
{due}"#,
        id = copy.id,
        book_url = copy.book_url(),
        title = copy.book_title,
        imprint = copy.imprint,
        class = status_class(copy.status),
        status = copy.status,
        due = due,
    )
}

pub fn detail(copy: &BookInstance) -> Html<String> {
    let content = format!(
        r#"{summary}
<hr>
<p><a href="{url}/delete">Delete book instance</a></p>
<p><a href="{url}/update">Update book instance</a></p>"#,
        summary = summary(copy),
        url = copy.url(),
    );
    page(&format!("Copy: {}", copy.book_title), &content)
}

pub fn form(
    title: &str,
    draft: &BookInstanceDraft,
    books: &[BookSummary],
    errors: &[FieldError],
) -> Html<String> {
    let book_options: String = books
        .iter()
        .map(|b| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                b.id,
                selected(draft.book_id == Some(b.id)),
                b.title
            )
        })
        .collect();

    let status_options: String = BookInstanceStatus::ALL
        .iter()
        .map(|s| {
            format!(
                "<option value=\"{s}\"{}>{s}</option>",
                selected(draft.status == *s),
                s = s.as_str()
            )
        })
        .collect();

    let content = format!(
        r#"<form method="POST">
<div class="form-group">
<label for="book">Book:</label>
<select id="book" name="book" required>
<option value="">--Please select a book--</option>
{book_options}
</select>
</div>
<div class="form-group">
<label for="imprint">Imprint:</label>
<input id="imprint" type="text" name="imprint" placeholder="Publisher and date information" value="{imprint}" required>
</div>
<div class="form-group">
<label for="due_back">Date when book available:</label>
<input id="due_back" type="date" name="due_back" value="{due_back}">
</div>
<div class="form-group">
<label for="status">Status:</label>
<select id="status" name="status" required>
{status_options}
</select>
</div>
<button type="submit">Submit</button>
</form>
{errors}"#,
        book_options = book_options,
        imprint = draft.imprint,
        due_back = input_date(draft.due_back),
        status_options = status_options,
        errors = error_list(errors),
    );
    page(title, &content)
}

pub fn delete(copy: &BookInstance) -> Html<String> {
    let content = format!(
        r#"{summary}
<p>Do you really want to delete this BookInstance?</p>
<form method="POST">
<input id="bookinstanceid" type="hidden" name="bookinstanceid" value="{id}" required>
<button type="submit">Delete</button>
</form>"#,
        summary = summary(copy),
        id = copy.id,
    );
    page("Delete Book Instance", &content)
}
