use std::sync::Arc;

use axum::{extract::State, response::Html};
use log::info;

use crate::{templates::home_page, AppState};

/// Handler for the index page (GET /)
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    info!("Server request for home page");
    Html(home_page(&state.remote_url, state.climate.summary()).into_string())
}
