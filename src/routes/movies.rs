use axum::extract::State;
use axum::Json;

use crate::routes::AppState;

/// Handler for the movie list endpoint
///
/// Returns every catalog title in order: the data source for the UI's
/// selection dropdown.
pub async fn list(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.titles())
}
