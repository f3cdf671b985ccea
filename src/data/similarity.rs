use std::cmp::Ordering;
use std::path::Path;

use crate::data::Catalog;
use crate::error::LoadError;

/// A neighbor of the queried movie: catalog index plus similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub score: f64,
}

/// The precomputed similarity matrix, one row per catalog entry, aligned
/// positionally with the catalog it was built from.
///
/// Built externally before startup; immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    titles: Vec<String>,
    scores: Vec<Vec<f64>>,
}

impl SimilarityIndex {
    /// Loads the similarity artifact (a JSON array of float arrays) and
    /// validates it against the catalog it must align with. Any failure is
    /// fatal to startup.
    pub fn load(path: impl AsRef<Path>, catalog: &Catalog) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scores: Vec<Vec<f64>> =
            serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_matrix(catalog.titles(), scores)
    }

    /// Builds an index from an in-memory matrix, enforcing that it is
    /// square and sized to the title list.
    pub fn from_matrix(titles: Vec<String>, scores: Vec<Vec<f64>>) -> Result<Self, LoadError> {
        let expected = titles.len();
        if scores.len() != expected {
            return Err(LoadError::RowCount {
                found: scores.len(),
                expected,
            });
        }
        for (row, entries) in scores.iter().enumerate() {
            if entries.len() != expected {
                return Err(LoadError::RowLength {
                    row,
                    found: entries.len(),
                    expected,
                });
            }
        }
        Ok(Self { titles, scores })
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// The nearest neighbors of `title`, best first.
    ///
    /// An unknown title yields an empty list; callers treat "no
    /// recommendations" as a normal outcome, not a failure. Ties keep
    /// catalog order (stable sort) and the query's own entry is removed by
    /// index identity, so a noisy diagonal can never leak the query back
    /// into its own results.
    pub fn neighbors(&self, title: &str, top_n: usize) -> Vec<Neighbor> {
        let query = match self.titles.iter().position(|t| t == title) {
            Some(index) => index,
            None => return Vec::new(),
        };

        let mut ranked: Vec<Neighbor> = self.scores[query]
            .iter()
            .enumerate()
            .map(|(index, &score)| Neighbor { index, score })
            .collect();

        // NaN scores rank as equal, which the stable sort leaves in
        // catalog order rather than panicking or reshuffling.
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.retain(|neighbor| neighbor.index != query);
        ranked.truncate(top_n);
        ranked
    }
}
