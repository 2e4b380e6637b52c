use crate::config::ReportConfig;
use crate::error::Result;
use crate::models::VarianceRecord;
use crate::report::{preview, PreviewRow, SlideDeck};
use crate::service::engine::{ComputeSummary, VarianceEngine, VarianceOutcome};
use std::io::Read;

/// 汇报结果
#[derive(Debug, Clone)]
pub struct VarianceReport {
    pub records: Vec<VarianceRecord>,
    pub summary: ComputeSummary,
    pub preview: Vec<PreviewRow>,
    pub deck: SlideDeck,
}

/// 差异分析服务: 引擎 + 报告配置, 只读共享
pub struct VarianceService {
    engine: VarianceEngine,
    report: ReportConfig,
}

impl VarianceService {
    pub fn new(engine: VarianceEngine, report: ReportConfig) -> Self {
        Self { engine, report }
    }

    /// 计算排好序的差异表
    pub fn analyze<R: Read>(&self, input: R) -> Result<VarianceOutcome> {
        self.engine.compute_detailed(input)
    }

    /// 计算差异表并生成预览和幻灯片; commentary 为空时使用配置中的默认点评
    pub fn build_report<R: Read>(&self, input: R, commentary: Option<&str>) -> Result<VarianceReport> {
        let outcome = self.engine.compute_detailed(input)?;
        let commentary = commentary.unwrap_or(&self.report.commentary);

        let preview = preview(&outcome.records, self.report.preview_rows);
        let deck = SlideDeck::build(&outcome.records, commentary, &self.report);
        tracing::info!(
            "Report built: {} preview rows, {} slides",
            preview.len(),
            deck.slides.len()
        );

        Ok(VarianceReport {
            records: outcome.records,
            summary: outcome.summary,
            preview,
            deck,
        })
    }
}
