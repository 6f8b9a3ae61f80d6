//! Generic error page

use axum::response::Html;

use crate::{error::ErrorReport, validation::escape_html};

pub fn page(report: &ErrorReport, show_detail: bool) -> Html<String> {
    let mut content = format!(
        "<p class=\"status\">{}</p><p class=\"message\">{}</p>",
        report.status.as_u16(),
        escape_html(&report.message)
    );
    if show_detail {
        content.push_str(&format!(
            "<pre class=\"detail\">{}</pre>",
            escape_html(&report.detail)
        ));
    }
    super::page("Error", &content)
}
