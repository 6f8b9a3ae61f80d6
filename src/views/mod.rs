//! Server-rendered HTML pages
//!
//! Text stored in the catalog went through the validation pipeline's
//! `Escape` rule before it was written, so it is inserted as-is. Anything
//! else (error messages, error details) is escaped here.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod error;
pub mod genres;

use axum::response::Html;

use crate::validation::{escape_html, FieldError};

const NAV: &[(&str, &str)] = &[
    ("/catalog", "Home"),
    ("/catalog/books", "All books"),
    ("/catalog/authors", "All authors"),
    ("/catalog/genres", "All genres"),
    ("/catalog/bookinstances", "All book-instances"),
    ("/catalog/author/create", "Create new author"),
    ("/catalog/genre/create", "Create new genre"),
    ("/catalog/book/create", "Create new book"),
    ("/catalog/bookinstance/create", "Create new book instance (copy)"),
];

/// Wrap page content in the site layout
pub fn page(title: &str, content: &str) -> Html<String> {
    let nav: String = NAV
        .iter()
        .map(|(href, label)| format!("<li><a href=\"{}\">{}</a></li>", href, label))
        .collect();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<nav><ul class="sidebar-nav">{nav}</ul></nav>
<main>
<h1>{title}</h1>
{content}
</main>
</body>
</html>
"#
    ))
}

/// Field messages above a re-rendered form
pub fn error_list(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape_html(&e.message)))
        .collect();
    format!("<ul class=\"errors\">{}</ul>", items)
}

/// `<li>` per item, or a fallback paragraph when empty
fn list_or<T>(items: &[T], empty: &str, render: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return format!("<p>{}</p>", empty);
    }
    let items: String = items.iter().map(render).collect();
    format!("<ul>{}</ul>", items)
}

fn selected(condition: bool) -> &'static str {
    if condition {
        " selected"
    } else {
        ""
    }
}

fn checked(condition: bool) -> &'static str {
    if condition {
        " checked"
    } else {
        ""
    }
}
