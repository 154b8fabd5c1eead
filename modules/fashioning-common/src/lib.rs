pub mod config;
pub mod error;
pub mod taxonomy;
pub mod traits;
pub mod types;

pub use config::{AlgoliaSettings, Config};
pub use error::FashioningError;
pub use traits::TrendPublisher;
pub use types::{Category, Demographics, Region, Trend};
