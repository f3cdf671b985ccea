/// OMDb poster provider
///
/// Resolves posters with at most one HTTP GET per lookup, preferring the
/// IMDb id (`?i=`) over a free-text title query (`?t=`), and caching one
/// answer per resolution key for the process lifetime.
///
/// Failure never escapes this module: network errors, bad statuses,
/// malformed bodies, and OMDb's `"N/A"` sentinel all resolve to the
/// placeholder URL.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::data::{CacheKey, PosterCache};
use crate::error::{AppError, AppResult};
use crate::models::MovieRecord;
use crate::services::posters::{PosterProvider, FALLBACK_POSTER};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const READ_TIMEOUT: Duration = Duration::from_secs(7);

/// OMDb's literal for "no poster on file".
const NO_POSTER: &str = "N/A";

/// The slice of an OMDb answer this provider cares about. Lookup misses
/// come back as HTTP 200 with an `Error` message and no poster.
#[derive(Debug, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: PosterCache,
}

impl OmdbProvider {
    /// Creates a provider with the standard connect/read timeout pair.
    ///
    /// The api key may be empty; every resolution then short-circuits to
    /// the placeholder without touching the network.
    pub fn new(cache: PosterCache, api_key: String, api_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .read_timeout(READ_TIMEOUT)
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            cache,
        })
    }

    async fn poster_by_imdb_id(&self, imdb_id: &str) -> String {
        self.resolve_with(CacheKey::Id(imdb_id.to_string()), ("i", imdb_id))
            .await
    }

    async fn poster_by_title(&self, title: &str) -> String {
        self.resolve_with(CacheKey::Title(title.to_string()), ("t", title))
            .await
    }

    /// Cache-through lookup: serve the prior answer for this key, or ask
    /// OMDb once and remember whatever came out, the placeholder included.
    /// One answer per key per session.
    async fn resolve_with(&self, key: CacheKey, param: (&str, &str)) -> String {
        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(
                key = %key,
                resolved_at = %cached.resolved_at,
                provider = self.name(),
                "Poster cache hit"
            );
            return cached.url;
        }

        let url = match self.fetch_poster(param).await {
            Ok(Some(poster)) => poster,
            // OMDb answered but has nothing usable; quiet fallback.
            Ok(None) => FALLBACK_POSTER.to_string(),
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    error = %e,
                    provider = self.name(),
                    "Poster lookup failed"
                );
                FALLBACK_POSTER.to_string()
            }
        };

        self.cache.insert(key, url.clone()).await;
        url
    }

    /// One GET against OMDb, no retries. `Ok(None)` means the API answered
    /// without a usable poster (unknown movie, or the `"N/A"` sentinel).
    async fn fetch_poster(&self, (field, value): (&str, &str)) -> AppResult<Option<String>> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[(field, value), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb returned status {}: {}",
                status, body
            )));
        }

        let payload: OmdbPayload = response.json().await?;

        if let Some(error) = payload.error {
            tracing::debug!(omdb_error = %error, "OMDb lookup came back empty");
        }

        Ok(payload
            .poster
            .filter(|poster| !poster.is_empty() && poster != NO_POSTER))
    }
}

#[async_trait::async_trait]
impl PosterProvider for OmdbProvider {
    async fn resolve_poster(&self, record: &MovieRecord) -> String {
        if self.api_key.is_empty() {
            // Every call would fail auth; skip the network entirely.
            return FALLBACK_POSTER.to_string();
        }

        if let Some(imdb_id) = record.imdb_id() {
            return self.poster_by_imdb_id(imdb_id).await;
        }

        if !record.title.is_empty() {
            return self.poster_by_title(&record.title).await;
        }

        FALLBACK_POSTER.to_string()
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
