use serde::{Deserialize, Serialize};

/// 行读取方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReaderKind {
    /// 按行切分, 逗号分隔, 不支持引号
    #[default]
    Naive,
    /// csv crate (RFC 4180): 支持引号与字段内逗号
    Rfc4180,
}

/// 非法数据行的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// 遇错即整体失败
    #[default]
    Fail,
    /// 记录并跳过 (需显式开启)
    Skip,
}

/// 引擎选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    #[serde(default)]
    pub reader: ReaderKind,
    #[serde(default)]
    pub on_invalid_row: RowPolicy,
}
