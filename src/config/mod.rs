//! Run configuration for the extraction pipeline.

mod builder;
mod types;

pub use builder::ScrapeConfigBuilder;
pub use types::ScrapeConfig;
