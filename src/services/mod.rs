pub mod dispatcher;
pub mod providers;
pub mod search;
pub mod similarity;
pub mod title_matcher;
pub mod vibe_scorer;

pub use dispatcher::Recommender;
