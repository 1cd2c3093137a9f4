pub mod error;
pub mod fetch;
pub mod hash;
pub mod normalize;
pub mod pipeline;
pub mod store;

pub use error::{IngestError, Result};
pub use fetch::IndicatorFetcher;
pub use normalize::NormalizedRecord;
pub use pipeline::{Pipeline, RunSummary, SOURCE_KEY, SOURCE_NAME};
