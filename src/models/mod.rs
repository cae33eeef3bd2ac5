mod analytics;
mod tool;
mod validators;

pub use analytics::*;
pub use tool::*;
