pub mod algorithm;
pub mod config;
pub mod quality;
pub mod ranking;
pub mod reasons;
pub mod scoring;

pub use algorithm::{best_match, find_and_rank, ScoredMatch, DEFAULT_MIN_SCORE};
pub use config::MatchOptions;
pub use quality::{classify_match, MatchQuality};
