pub mod line_item;
pub mod variance;

pub use line_item::{CompositeKey, EntryType, LineItem};
pub use variance::VarianceRecord;
