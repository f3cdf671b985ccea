pub mod movie;

pub use movie::looks_like_imdb_id;
pub use movie::MovieRecord;
pub use movie::Recommendation;
