pub mod catalog;
pub mod poster_cache;
pub mod similarity;

pub use catalog::Catalog;
pub use poster_cache::{CacheKey, CachedPoster, PosterCache};
pub use similarity::{Neighbor, SimilarityIndex};
