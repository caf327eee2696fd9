pub mod classifier;
pub mod engine;
pub mod frequency;
pub mod histogram;
pub mod uniqueness;

pub use classifier::ColumnKind;
pub use engine::{summarize_dataset, ColumnReport, ColumnSummary};
