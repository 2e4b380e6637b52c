use thiserror::Error;

/// 差异计算错误
///
/// 行号从 1 开始计数, 表头算第 0 行。
#[derive(Error, Debug)]
pub enum VarianceError {
    #[error("input has no header row")]
    MissingHeader,

    #[error("row {row}: expected 5 fields, found {found}: {raw:?}")]
    FieldCount { row: usize, found: usize, raw: String },

    #[error("row {row}: amount is not numeric: {raw:?}")]
    InvalidAmount { row: usize, raw: String },

    #[error("failed to read input stream: {0}")]
    Stream(#[from] std::io::Error),
}

impl VarianceError {
    /// 是否为数据结构错误 (字段数/金额), skip 策略下可跳过
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::FieldCount { .. } | Self::InvalidAmount { .. })
    }

    /// 出错的行号 (如有)
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::FieldCount { row, .. } | Self::InvalidAmount { row, .. } => Some(*row),
            Self::MissingHeader | Self::Stream(_) => None,
        }
    }

    /// HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingHeader | Self::FieldCount { .. } | Self::InvalidAmount { .. } => 422,
            Self::Stream(_) => 400,
        }
    }
}

pub type Result<T> = std::result::Result<T, VarianceError>;
