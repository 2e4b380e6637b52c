use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 数据类型 (Type 列)
///
/// 区分大小写, 只有 "Actual" / "Budget" 参与配对, 其余原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Actual,
    Budget,
    Other(String),
}

impl EntryType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Actual" => Self::Actual,
            "Budget" => Self::Budget,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actual => f.write_str("Actual"),
            Self::Budget => f.write_str("Budget"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// 配对键 (Month, Entity, Account)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey {
    pub month: String,
    pub entity: String,
    pub account: String,
}

/// 输入明细行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub row: usize,       // 源文件行号 (表头为 0)
    pub month: String,
    pub entity: String,
    pub account: String,
    pub entry_type: EntryType,
    pub amount: BigDecimal,
}

impl LineItem {
    pub fn key(&self) -> CompositeKey {
        CompositeKey {
            month: self.month.clone(),
            entity: self.entity.clone(),
            account: self.account.clone(),
        }
    }
}
