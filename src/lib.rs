//! FP&A 差异分析: 解析 Actual/Budget CSV, 按 (Month, Entity, Account) 配对,
//! 计算 Variance = Actual - Budget 并升序排名, 附带预览表与汇报幻灯片模型。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod service;

pub use crate::config::AppConfig;
pub use error::{Result, VarianceError};
pub use models::{CompositeKey, EntryType, LineItem, VarianceRecord};
pub use service::{compute, EngineOptions, VarianceEngine, VarianceService};
