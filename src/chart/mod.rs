pub mod extractor;
pub mod models;

pub use extractor::{ChartExtractor, ChartSource, parse_chart};
pub use models::ChartEntry;
