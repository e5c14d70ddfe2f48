pub mod db;
pub mod matching;
pub mod reconcile;
pub mod settings;

pub use db::{CallDirection, CallRecord, Database, Link, Recording};
pub use matching::{
    best_match, classify_match, find_and_rank, MatchOptions, MatchQuality, ScoredMatch,
    DEFAULT_MIN_SCORE,
};
pub use reconcile::ReconcileController;
pub use settings::SettingsStore;
