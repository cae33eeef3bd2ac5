mod analytics;
mod tools;

use std::sync::Arc;

pub use analytics::AnalyticsService;
pub use tools::{NO_FIELDS_TO_UPDATE, ToolService};

use crate::db::DbPool;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub tools: ToolService,
    pub analytics: AnalyticsService,
}

impl Services {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self {
            tools: ToolService::new(db.clone()),
            analytics: AnalyticsService::new(db),
        }
    }
}
