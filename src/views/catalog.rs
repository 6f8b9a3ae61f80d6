//! Catalog home page

use axum::response::Html;

use crate::services::catalog::CatalogCounts;

pub fn index(counts: &CatalogCounts) -> Html<String> {
    let content = format!(
        r#"<p>Welcome to <em>LocalLibrary</em>.</p>
<h2>Dynamic content</h2>
<p>The library has the following record counts:</p>
<ul>
<li><strong>Books:</strong> {}</li>
<li><strong>Copies:</strong> {}</li>
<li><strong>Copies available:</strong> {}</li>
<li><strong>Authors:</strong> {}</li>
<li><strong>Genres:</strong> {}</li>
</ul>"#,
        counts.books,
        counts.book_instances,
        counts.available_book_instances,
        counts.authors,
        counts.genres,
    );
    super::page("Local Library Home", &content)
}
