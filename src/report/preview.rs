use crate::models::VarianceRecord;
use indexmap::IndexMap;

/// 预览表列顺序
pub const PREVIEW_COLUMNS: [&str; 6] = [
    "Month",
    "Entity",
    "Account",
    "Actual_Amount",
    "Budget_Amount",
    "Variance",
];

pub type PreviewRow = IndexMap<&'static str, String>;

/// 取排名前 n 条, 全部转为字符串以便直接展示
pub fn preview(records: &[VarianceRecord], n: usize) -> Vec<PreviewRow> {
    records
        .iter()
        .take(n)
        .map(|rec| {
            let values = [
                rec.month().to_string(),
                rec.entity().to_string(),
                rec.account().to_string(),
                rec.actual_amount().to_string(),
                rec.budget_amount().to_string(),
                rec.variance().to_string(),
            ];
            PREVIEW_COLUMNS.into_iter().zip(values).collect()
        })
        .collect()
}
