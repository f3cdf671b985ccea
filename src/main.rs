use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use cinematch_api::config::Config;
use cinematch_api::data::{Catalog, PosterCache, SimilarityIndex};
use cinematch_api::routes::{create_router, AppState};
use cinematch_api::services::posters::OmdbProvider;
use cinematch_api::services::Recommender;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    // Startup data is all-or-nothing: refuse to serve without it.
    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("failed to load catalog from {}", config.catalog_path))?;
    let similarity = SimilarityIndex::load(&config.similarity_path, &catalog).with_context(|| {
        format!(
            "failed to load similarity matrix from {}",
            config.similarity_path
        )
    })?;

    tracing::info!(
        movies = catalog.len(),
        matrix_rows = similarity.len(),
        imdb_ids = catalog.imdb_id_count(),
        "Catalog and similarity matrix loaded"
    );
    // Dataset check: which ids could drive OMDb lookups by id.
    tracing::debug!(sample = ?catalog.id_sample(10), "Catalog id sample");

    if config.omdb_api_key.is_empty() {
        tracing::warn!("OMDB_API_KEY not set; every poster will be the placeholder image");
    }

    let catalog = Arc::new(catalog);
    let similarity = Arc::new(similarity);
    let posters = OmdbProvider::new(
        PosterCache::new(),
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
    )?;
    let recommender = Arc::new(Recommender::new(
        catalog.clone(),
        similarity.clone(),
        Arc::new(posters),
    ));

    let app = create_router(AppState::new(catalog, recommender));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
