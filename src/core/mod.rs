pub mod aggregator;
pub mod export;
pub mod fallback;
pub mod features;
pub mod scoring;
pub mod validate;

pub use aggregator::{ReportAggregator, Session};
pub use features::extract_features;
