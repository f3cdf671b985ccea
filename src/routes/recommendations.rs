use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;

use crate::middleware::request_id::RequestId;
use crate::models::Recommendation;
use crate::routes::AppState;
use crate::services::DEFAULT_TOP_N;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// Handler for the recommendations endpoint
///
/// A title the catalog does not know is a normal outcome: the response is
/// an empty array, never a 404. The UI renders its own "no
/// recommendations" message.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> Json<Vec<Recommendation>> {
    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        top_n = query.top_n,
        "Processing recommendation request"
    );

    let recommendations = state
        .recommender
        .recommend(&query.title, query.top_n)
        .await;

    Json(recommendations)
}
