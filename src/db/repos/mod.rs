mod analytics;
mod tools;

pub use analytics::AnalyticsRepo;
pub use tools::ToolRepo;
