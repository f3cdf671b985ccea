use std::sync::Arc;

use crate::data::{Catalog, SimilarityIndex};
use crate::models::{MovieRecord, Recommendation};
use crate::services::posters::PosterProvider;

/// How many recommendations to return when the caller does not say.
pub const DEFAULT_TOP_N: usize = 5;

/// Display title substituted when a neighbor index cannot be resolved
/// against the catalog.
const UNKNOWN_TITLE: &str = "Unknown";

/// Answers "given a movie title, the top-N most similar titles with
/// posters".
///
/// Every collaborator is injected and shared: catalog and similarity index
/// are immutable process-wide state, the poster provider carries its own
/// session cache.
pub struct Recommender {
    catalog: Arc<Catalog>,
    similarity: Arc<SimilarityIndex>,
    posters: Arc<dyn PosterProvider>,
}

impl Recommender {
    pub fn new(
        catalog: Arc<Catalog>,
        similarity: Arc<SimilarityIndex>,
        posters: Arc<dyn PosterProvider>,
    ) -> Self {
        Self {
            catalog,
            similarity,
            posters,
        }
    }

    /// The `top_n` movies most similar to `title`, best first, each with a
    /// poster URL that is always safe to render.
    ///
    /// A title absent from the catalog yields an empty list; that is the
    /// designed "no recommendations" outcome, not a failure. Poster lookups
    /// are independent: none of them can abort the batch.
    pub async fn recommend(&self, title: &str, top_n: usize) -> Vec<Recommendation> {
        let neighbors = self.similarity.neighbors(title, top_n);
        if neighbors.is_empty() {
            tracing::info!(title = %title, "No recommendations available");
            return Vec::new();
        }

        let mut recommendations = Vec::with_capacity(neighbors.len());
        for neighbor in neighbors {
            // The load-time invariant makes this lookup infallible, but a
            // bad index must degrade one entry, not the whole request.
            let (display_title, record) = match self.catalog.get(neighbor.index) {
                Some(record) => (record.title.clone(), record.clone()),
                None => {
                    tracing::error!(
                        index = neighbor.index,
                        catalog_size = self.catalog.len(),
                        "Neighbor index out of bounds"
                    );
                    (UNKNOWN_TITLE.to_string(), MovieRecord::default())
                }
            };

            let poster_url = self.posters.resolve_poster(&record).await;
            recommendations.push(Recommendation {
                title: display_title,
                poster_url,
            });
        }

        tracing::info!(
            title = %title,
            requested = top_n,
            returned = recommendations.len(),
            provider = self.posters.name(),
            "Recommendations assembled"
        );

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::posters::MockPosterProvider;

    const STUB_POSTER: &str = "http://posters/fallback.jpg";

    fn abc_catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::from_records(vec![
                record("tt0001", "A"),
                record("tt0002", "B"),
                record("tt0003", "C"),
            ])
            .unwrap(),
        )
    }

    fn record(id: &str, title: &str) -> MovieRecord {
        MovieRecord {
            id: Some(id.to_string()),
            title: title.to_string(),
        }
    }

    fn abc_similarity(catalog: &Catalog) -> Arc<SimilarityIndex> {
        Arc::new(
            SimilarityIndex::from_matrix(
                catalog.titles(),
                vec![
                    vec![1.0, 0.9, 0.1],
                    vec![0.9, 1.0, 0.5],
                    vec![0.1, 0.5, 1.0],
                ],
            )
            .unwrap(),
        )
    }

    /// Mock that derives a poster from the record's id, so assertions can
    /// tell which record each poster came from.
    fn poster_stub() -> MockPosterProvider {
        let mut posters = MockPosterProvider::new();
        posters.expect_resolve_poster().returning(|record| {
            format!(
                "http://posters/{}",
                record.id.clone().unwrap_or_else(|| "none".to_string())
            )
        });
        posters.expect_name().returning(|| "mock");
        posters
    }

    fn recommender(posters: MockPosterProvider) -> Recommender {
        let catalog = abc_catalog();
        let similarity = abc_similarity(&catalog);
        Recommender::new(catalog, similarity, Arc::new(posters))
    }

    #[tokio::test]
    async fn test_top_one_returns_nearest_neighbor_with_poster() {
        let service = recommender(poster_stub());

        let result = service.recommend("A", 1).await;

        assert_eq!(
            result,
            vec![Recommendation {
                title: "B".to_string(),
                poster_url: "http://posters/tt0002".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_unknown_title_yields_empty_result() {
        let mut posters = MockPosterProvider::new();
        posters.expect_resolve_poster().never();
        let service = recommender(posters);

        assert!(service.recommend("Z", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_rank_order_preserved() {
        let service = recommender(poster_stub());

        let result = service.recommend("A", 2).await;
        let titles: Vec<&str> = result.iter().map(|r| r.title.as_str()).collect();

        assert_eq!(titles, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn test_result_capped_by_catalog_size() {
        let service = recommender(poster_stub());

        // Three movies total: at most two neighbors exist.
        assert_eq!(service.recommend("A", 10).await.len(), 2);
        assert_eq!(service.recommend("A", 2).await.len(), 2);
        assert_eq!(service.recommend("A", 0).await.len(), 0);
    }

    #[tokio::test]
    async fn test_out_of_bounds_index_degrades_to_unknown() {
        // An index sized for four titles over a three-record catalog: the
        // extra neighbor cannot be resolved and must not sink the request.
        let catalog = abc_catalog();
        let similarity = Arc::new(
            SimilarityIndex::from_matrix(
                vec!["A".into(), "B".into(), "C".into(), "D".into()],
                vec![
                    vec![1.0, 0.9, 0.8, 0.7],
                    vec![0.9, 1.0, 0.5, 0.4],
                    vec![0.8, 0.5, 1.0, 0.3],
                    vec![0.7, 0.4, 0.3, 1.0],
                ],
            )
            .unwrap(),
        );
        let service = Recommender::new(catalog, similarity, Arc::new(poster_stub()));

        let result = service.recommend("A", 3).await;

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].title, "B");
        assert_eq!(result[2].title, "Unknown");
        // The empty record carries no id; the stub shows what it was given.
        assert_eq!(result[2].poster_url, "http://posters/none");
    }

    #[tokio::test]
    async fn test_poster_resolved_once_per_neighbor() {
        let mut posters = MockPosterProvider::new();
        posters
            .expect_resolve_poster()
            .times(2)
            .returning(|_| STUB_POSTER.to_string());
        posters.expect_name().returning(|| "mock");
        let service = recommender(posters);

        let result = service.recommend("A", 2).await;
        assert!(result.iter().all(|r| r.poster_url == STUB_POSTER));
    }
}
