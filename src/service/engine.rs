use crate::error::Result;
use crate::models::{CompositeKey, EntryType, LineItem, VarianceRecord};
use crate::service::options::EngineOptions;
use crate::service::parser::{self, SkippedRow};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::io::Read;

/// 非致命提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineWarning {
    /// 配对结果为空 (无 Actual/Budget 行或无交集键)
    EmptyResult,
}

/// 单次计算的统计信息
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComputeSummary {
    pub data_rows: usize,
    pub actual_rows: usize,
    pub budget_rows: usize,
    pub other_type_rows: usize,
    pub unmatched_actual_rows: usize,
    pub unmatched_budget_rows: usize,
    pub skipped_rows: Vec<SkippedRow>,
    pub warnings: Vec<EngineWarning>,
}

/// 计算结果: 排好序的差异表 + 统计
#[derive(Debug, Clone, Default)]
pub struct VarianceOutcome {
    pub records: Vec<VarianceRecord>,
    pub summary: ComputeSummary,
}

/// 差异引擎
///
/// 无共享可变状态, 每次调用独立完成: 读取 -> 解析 -> 拆分 -> 配对 -> 排序。
#[derive(Debug, Clone, Default)]
pub struct VarianceEngine {
    options: EngineOptions,
}

impl VarianceEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// 计算差异表, 按 Variance 升序 (最不利在前)
    pub fn compute<R: Read>(&self, input: R) -> Result<Vec<VarianceRecord>> {
        self.compute_detailed(input).map(|outcome| outcome.records)
    }

    /// 计算差异表并返回统计信息
    pub fn compute_detailed<R: Read>(&self, mut input: R) -> Result<VarianceOutcome> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        self.compute_text(&text)
    }

    pub fn compute_text(&self, text: &str) -> Result<VarianceOutcome> {
        let parsed = parser::parse(text, &self.options)?;
        tracing::debug!(
            "Parsed {} rows ({} skipped)",
            parsed.items.len(),
            parsed.skipped.len()
        );

        let mut outcome = join_and_rank(&parsed.items);
        outcome.summary.skipped_rows = parsed.skipped;

        tracing::info!(
            "Variance computed: {} records from {} actual / {} budget rows",
            outcome.records.len(),
            outcome.summary.actual_rows,
            outcome.summary.budget_rows
        );

        Ok(outcome)
    }
}

/// 使用默认选项计算 (朴素读取, 遇错即失败)
pub fn compute<R: Read>(input: R) -> Result<Vec<VarianceRecord>> {
    VarianceEngine::default().compute(input)
}

/// 拆分 + 内连接 + 稳定排序
///
/// 同键多行时做笛卡尔积; 输出顺序先按 Actual 输入顺序, 再按 Budget 输入顺序,
/// 排序后同 Variance 的记录保持该顺序。
pub fn join_and_rank(items: &[LineItem]) -> VarianceOutcome {
    let mut summary = ComputeSummary {
        data_rows: items.len(),
        ..ComputeSummary::default()
    };

    let mut actuals: Vec<&LineItem> = Vec::new();
    let mut budgets: IndexMap<CompositeKey, Vec<&LineItem>> = IndexMap::new();
    for item in items {
        match item.entry_type {
            EntryType::Actual => actuals.push(item),
            EntryType::Budget => budgets.entry(item.key()).or_default().push(item),
            EntryType::Other(_) => summary.other_type_rows += 1,
        }
    }
    summary.actual_rows = actuals.len();
    summary.budget_rows = budgets.values().map(Vec::len).sum();
    tracing::debug!(
        "Partitioned: {} actual, {} budget ({} keys), {} other",
        summary.actual_rows,
        summary.budget_rows,
        budgets.len(),
        summary.other_type_rows
    );

    let mut records = Vec::new();
    let mut matched_keys: IndexSet<CompositeKey> = IndexSet::new();
    for actual in &actuals {
        let key = actual.key();
        match budgets.get(&key) {
            Some(group) => {
                records.extend(group.iter().map(|budget| VarianceRecord::from_pair(actual, budget)));
                matched_keys.insert(key);
            }
            None => summary.unmatched_actual_rows += 1,
        }
    }
    summary.unmatched_budget_rows = budgets
        .iter()
        .filter(|(key, _)| !matched_keys.contains(*key))
        .map(|(_, group)| group.len())
        .sum();
    tracing::debug!(
        "Joined {} pairs, unmatched: {} actual / {} budget",
        records.len(),
        summary.unmatched_actual_rows,
        summary.unmatched_budget_rows
    );

    // sort_by 为稳定排序
    records.sort_by(|a, b| a.variance().cmp(b.variance()));

    if records.is_empty() {
        tracing::warn!("Variance join produced no rows");
        summary.warnings.push(EngineWarning::EmptyResult);
    }

    VarianceOutcome { records, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VarianceError;
    use crate::service::options::RowPolicy;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn run(text: &str) -> Result<VarianceOutcome> {
        VarianceEngine::default().compute_detailed(text.as_bytes())
    }

    #[test]
    fn test_scenario_single_pair() {
        let text = "Month,Entity,Account,Type,Amount\n\
                    Jan,APAC,Rev,Actual,100000\n\
                    Jan,APAC,Rev,Budget,180000\n";
        let outcome = run(text).unwrap();
        assert_eq!(outcome.records.len(), 1);
        let rec = &outcome.records[0];
        assert_eq!(rec.variance(), &BigDecimal::from(-80000));
        assert_eq!(rec.actual_amount(), &BigDecimal::from(100000));
        assert_eq!(rec.budget_amount(), &BigDecimal::from(180000));
        assert!(outcome.summary.warnings.is_empty());
    }

    #[test]
    fn test_unmatched_rows_are_dropped() {
        let text = "h\n\
                    Jan,APAC,Rev,Actual,100\n\
                    Jan,EMEA,Rev,Actual,50\n\
                    Jan,APAC,Rev,Budget,80\n\
                    Feb,APAC,Rev,Budget,70\n";
        let outcome = run(text).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].entity(), "APAC");
        assert_eq!(outcome.summary.unmatched_actual_rows, 1);
        assert_eq!(outcome.summary.unmatched_budget_rows, 1);
    }

    #[test]
    fn test_duplicate_keys_cross_product() {
        let text = "h\n\
                    Jan,APAC,Rev,Actual,100\n\
                    Jan,APAC,Rev,Actual,300\n\
                    Jan,APAC,Rev,Budget,200\n";
        let outcome = run(text).unwrap();
        assert_eq!(outcome.records.len(), 2);
        for rec in &outcome.records {
            assert_eq!(rec.budget_amount(), &BigDecimal::from(200));
        }
        assert_eq!(outcome.records[0].variance(), &BigDecimal::from(-100));
        assert_eq!(outcome.records[1].variance(), &BigDecimal::from(100));
    }

    #[test]
    fn test_two_by_two_group_yields_four_records() {
        let text = "h\n\
                    Jan,APAC,Rev,Actual,1\n\
                    Jan,APAC,Rev,Budget,10\n\
                    Jan,APAC,Rev,Actual,2\n\
                    Jan,APAC,Rev,Budget,20\n";
        let outcome = run(text).unwrap();
        assert_eq!(outcome.records.len(), 4);
    }

    #[test]
    fn test_sorted_ascending_and_stable() {
        let text = "h\n\
                    Jan,AMER,COGS,Actual,10\n\
                    Jan,AMER,COGS,Budget,0\n\
                    Jan,EMEA,Rev,Actual,5\n\
                    Jan,EMEA,Rev,Budget,10\n\
                    Jan,APAC,Rev,Actual,20\n\
                    Jan,APAC,Rev,Budget,25\n\
                    Jan,APAC,SGA,Actual,-1\n\
                    Jan,APAC,SGA,Budget,-1\n";
        let outcome = run(text).unwrap();
        let order: Vec<(&str, &str)> = outcome
            .records
            .iter()
            .map(|r| (r.entity(), r.account()))
            .collect();
        // EMEA 与 APAC Rev 同为 -5, 保持 join 顺序
        assert_eq!(
            order,
            vec![("EMEA", "Rev"), ("APAC", "Rev"), ("APAC", "SGA"), ("AMER", "COGS")]
        );
    }

    #[test]
    fn test_non_numeric_amount_fails_whole_call() {
        let text = "h\n\
                    Jan,APAC,Rev,Actual,100\n\
                    Jan,APAC,Rev,Budget,100\n\
                    Jan,AMER,COGS,Actual,five\n";
        match run(text) {
            Err(VarianceError::InvalidAmount { row, raw }) => {
                assert_eq!(row, 3);
                assert_eq!(raw, "five");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty_not_error() {
        let outcome = run("Month,Entity,Account,Type,Amount\n").unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.summary.warnings, vec![EngineWarning::EmptyResult]);
    }

    #[test]
    fn test_other_types_do_not_join() {
        let text = "h\n\
                    Jan,APAC,Rev,actual,100\n\
                    Jan,APAC,Rev,Forecast,90\n\
                    Jan,APAC,Rev,Budget,80\n";
        let outcome = run(text).unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.summary.other_type_rows, 2);
        assert_eq!(outcome.summary.unmatched_budget_rows, 1);
        assert_eq!(outcome.summary.warnings, vec![EngineWarning::EmptyResult]);
    }

    #[test]
    fn test_decimal_amounts() {
        let text = "h\nJan,APAC,Rev,Actual,1000.10\nJan,APAC,Rev,Budget,999.99\n";
        let records = compute(text.as_bytes()).unwrap();
        assert_eq!(records[0].variance(), &BigDecimal::from_str("0.11").unwrap());
    }

    #[test]
    fn test_skip_policy_keeps_valid_rows() {
        let engine = VarianceEngine::new(EngineOptions {
            on_invalid_row: RowPolicy::Skip,
            ..EngineOptions::default()
        });
        let text = "h\n\
                    Jan,APAC,Rev,Actual,100\n\
                    Jan,AMER,COGS,Actual,five\n\
                    Jan,APAC,Rev,Budget,150\n";
        let outcome = engine.compute_detailed(text.as_bytes()).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.summary.skipped_rows.len(), 1);
        assert_eq!(outcome.summary.skipped_rows[0].row, 2);
    }

    #[test]
    fn test_invalid_utf8_is_stream_error() {
        let bytes: &[u8] = &[b'h', b'\n', 0xff, 0xfe];
        assert!(matches!(
            VarianceEngine::default().compute(bytes),
            Err(VarianceError::Stream(_))
        ));
    }
}
