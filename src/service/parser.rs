use crate::error::{Result, VarianceError};
use crate::models::{EntryType, LineItem};
use crate::service::options::{EngineOptions, ReaderKind, RowPolicy};
use bigdecimal::BigDecimal;
use serde::Serialize;
use std::str::FromStr;

/// 每行固定字段数: Month, Entity, Account, Type, Amount
pub const FIELD_COUNT: usize = 5;

/// 金额文本最大长度
pub const MAX_AMOUNT_LEN: usize = 64;

/// 金额 scale (小数位/指数) 绝对值上限, 超出则相减对齐时代价无界
pub const MAX_AMOUNT_SCALE: i64 = 64;

/// 切分后的原始行
#[derive(Debug, Clone)]
struct RawRow {
    row: usize,
    fields: Vec<String>,
    raw: String,
}

/// skip 策略下被丢弃的行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

/// 解析结果
#[derive(Debug, Clone, Default)]
pub struct ParsedInput {
    pub items: Vec<LineItem>,
    pub skipped: Vec<SkippedRow>,
}

/// 解析 CSV 文本为明细行
///
/// 第一行无条件视为表头并丢弃; 空白行忽略但仍占行号。
pub fn parse(text: &str, options: &EngineOptions) -> Result<ParsedInput> {
    if text.is_empty() {
        return Err(VarianceError::MissingHeader);
    }

    let rows = match options.reader {
        ReaderKind::Naive => split_naive(text),
        ReaderKind::Rfc4180 => split_rfc4180(text),
    };

    let mut parsed = ParsedInput::default();
    for row in rows {
        match row.and_then(into_line_item) {
            Ok(item) => parsed.items.push(item),
            Err(e) if e.is_schema_error() && options.on_invalid_row == RowPolicy::Skip => {
                tracing::warn!("Skipping invalid row: {}", e);
                parsed.skipped.push(SkippedRow {
                    row: e.row().unwrap_or_default(),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(parsed)
}

fn split_naive(text: &str) -> Vec<Result<RawRow>> {
    text.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(row, line)| {
            Ok(RawRow {
                row,
                fields: line.split(',').map(str::to_string).collect(),
                raw: line.to_string(),
            })
        })
        .collect()
}

fn split_rfc4180(text: &str) -> Vec<Result<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    // 输入已是 &str 且 flexible, 读取失败只可能来自底层 IO
    let rows = reader
        .records()
        .map(|record| match record {
            Ok(record) => {
                let row = record
                    .position()
                    .map(|p| p.line().saturating_sub(1) as usize)
                    .unwrap_or_default();
                let fields: Vec<String> = record.iter().map(str::to_string).collect();
                Ok(RawRow {
                    row,
                    raw: fields.join(","),
                    fields,
                })
            }
            Err(e) => Err(VarianceError::Stream(e.into())),
        })
        .collect();
    rows
}

fn into_line_item(raw: RawRow) -> Result<LineItem> {
    if raw.fields.len() != FIELD_COUNT {
        return Err(VarianceError::FieldCount {
            row: raw.row,
            found: raw.fields.len(),
            raw: raw.raw,
        });
    }

    let mut fields = raw.fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    let month = next();
    let entity = next();
    let account = next();
    let entry_type = EntryType::parse(&next());
    let amount_raw = next();

    let amount = parse_amount(amount_raw.trim()).ok_or_else(|| VarianceError::InvalidAmount {
        row: raw.row,
        raw: amount_raw.clone(),
    })?;

    Ok(LineItem {
        row: raw.row,
        month,
        entity,
        account,
        entry_type,
        amount,
    })
}

fn parse_amount(text: &str) -> Option<BigDecimal> {
    if text.len() > MAX_AMOUNT_LEN {
        return None;
    }
    // 先限制指数: bigdecimal 计算 scale 时不检查溢出
    if let Some(pos) = text.find(['e', 'E']) {
        let exp = text[pos + 1..].strip_prefix('+').unwrap_or(&text[pos + 1..]);
        let exp = i64::from_str(exp).ok()?;
        if exp.unsigned_abs() > MAX_AMOUNT_SCALE as u64 {
            return None;
        }
    }
    let amount = BigDecimal::from_str(text).ok()?;
    let (_, scale) = amount.as_bigint_and_exponent();
    (scale.abs() <= MAX_AMOUNT_SCALE).then_some(amount)
}
