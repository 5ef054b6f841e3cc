pub mod classifier;
pub mod config;
pub mod error;
pub mod history;
pub mod http;
pub mod model;
pub mod render;
pub mod store;

pub use classifier::{classify, classify_with};
pub use error::{PredictorError, Result};
pub use history::{HistorySummary, summarize};
pub use model::{Category, PredictionInput, PredictionRecord};
pub use store::{CsvStore, MemoryStore, PredictionStore};
