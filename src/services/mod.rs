pub mod posters;
pub mod recommendations;

pub use recommendations::Recommender;
pub use recommendations::DEFAULT_TOP_N;
