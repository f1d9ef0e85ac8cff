pub mod health_scores;
pub mod runner;

pub use health_scores::HealthScoreJob;
pub use runner::JobRunner;
