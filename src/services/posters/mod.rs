/// Poster lookup abstraction.
///
/// Poster resolution is best-effort by design: implementations never fail,
/// they degrade to [`FALLBACK_POSTER`] so a missing image can never break a
/// recommendation response.
use crate::models::MovieRecord;

pub mod omdb;

pub use omdb::OmdbProvider;

/// Fixed fallback image used whenever a real poster cannot be resolved.
pub const FALLBACK_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Poster";

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Resolves a display poster URL for the record.
    ///
    /// Always returns a renderable URL; any lookup failure yields
    /// [`FALLBACK_POSTER`].
    async fn resolve_poster(&self, record: &MovieRecord) -> String;

    /// Provider name for logging and debugging.
    fn name(&self) -> &'static str;
}
