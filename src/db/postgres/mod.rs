mod analytics;
mod tools;

pub use analytics::PostgresAnalyticsRepo;
pub use tools::PostgresToolRepo;
