pub mod engine;
pub mod options;
pub mod parser;
pub mod variance;

pub use engine::{compute, join_and_rank, ComputeSummary, EngineWarning, VarianceEngine, VarianceOutcome};
pub use options::{EngineOptions, ReaderKind, RowPolicy};
pub use parser::{ParsedInput, SkippedRow};
pub use variance::{VarianceReport, VarianceService};
