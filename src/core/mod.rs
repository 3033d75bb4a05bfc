//! Aggregates the “business logic” layer.

pub mod bounds;
pub mod buckets;
pub mod config;
pub mod constants;
pub mod detect;
pub mod error;
pub mod filter;
pub mod granularity;
pub mod ingest;
pub mod timestamp;

// re-export frequently-used items for convenience
pub use buckets::Buckets;
pub use config::{ChartConfig, ConfigBuilder};
pub use constants::{
    BRAILLE_HORIZONTAL_RESOLUTION, BRAILLE_VERTICAL_RESOLUTION, DETECT_ATTEMPTS, MIN_CHART_HEIGHT,
    MIN_LABEL_CELLS,
};
pub use detect::{Detector, TimeFields};
pub use error::ChartError;
pub use granularity::Tracks;
pub use ingest::{Ingest, Loaded};
pub use timestamp::Unit;
