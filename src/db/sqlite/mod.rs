mod analytics;
mod tools;

pub use analytics::SqliteAnalyticsRepo;
pub use tools::SqliteToolRepo;
