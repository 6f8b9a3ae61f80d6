//! Catalog home page

use axum::{extract::State, response::Html};

use crate::{error::AppResult, views, AppState};

/// Site welcome page with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let counts = state.services.catalog.counts().await?;
    Ok(views::catalog::index(&counts))
}
