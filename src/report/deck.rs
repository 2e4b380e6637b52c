use crate::config::ReportConfig;
use crate::models::VarianceRecord;
use crate::report::format::thousands;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 建议的下载文件名 (不含扩展名)
pub const DECK_FILE_NAME: &str = "FP&A_Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideLayout {
    Title,
    Text,
    Bullets,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub layout: SlideLayout,
    pub title: String,
    pub body: Vec<String>,
}

/// 固定模板的汇报幻灯片: 标题页, 管理层点评, 差异 Top N
#[derive(Debug, Clone, Serialize)]
pub struct SlideDeck {
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
    pub slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn build(records: &[VarianceRecord], commentary: &str, config: &ReportConfig) -> Self {
        let bullets = records.iter().take(config.top_n).map(variance_bullet).collect();

        let slides = vec![
            Slide {
                layout: SlideLayout::Title,
                title: config.title.clone(),
                body: vec![config.subtitle.clone()],
            },
            Slide {
                layout: SlideLayout::Text,
                title: "Executive Summary".to_string(),
                body: vec![commentary.to_string()],
            },
            Slide {
                layout: SlideLayout::Bullets,
                title: "Top Variances".to_string(),
                body: bullets,
            },
        ];

        Self {
            file_name: DECK_FILE_NAME.to_string(),
            generated_at: Utc::now(),
            slides,
        }
    }

    /// 纯文本大纲
    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        for (idx, slide) in self.slides.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(&format!("# {}\n", slide.title));
            for line in &slide.body {
                let line = match slide.layout {
                    SlideLayout::Title => format!("{line}\n"),
                    SlideLayout::Bullets => format!("- {line}\n"),
                    SlideLayout::Text => format!("{}\n", line.trim()),
                };
                out.push_str(&line);
            }
        }
        out
    }
}

/// "{Entity} {Account}: {Variance}"
pub fn variance_bullet(record: &VarianceRecord) -> String {
    format!(
        "{} {}: {}",
        record.entity(),
        record.account(),
        thousands(record.variance())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompositeKey;
    use bigdecimal::BigDecimal;

    fn record(entity: &str, account: &str, actual: i64, budget: i64) -> VarianceRecord {
        VarianceRecord::new(
            CompositeKey {
                month: "Jan-2025".to_string(),
                entity: entity.to_string(),
                account: account.to_string(),
            },
            BigDecimal::from(actual),
            BigDecimal::from(budget),
        )
    }

    #[test]
    fn test_bullet_format() {
        let rec = record("APAC", "Revenue", 100000, 180000);
        assert_eq!(variance_bullet(&rec), "APAC Revenue: -80,000");
    }

    #[test]
    fn test_deck_layout() {
        let records: Vec<_> = (0..8)
            .map(|i| record("EMEA", &format!("Acct{i}"), i * 1000, 0))
            .collect();
        let deck = SlideDeck::build(&records, "Below plan.", &ReportConfig::default());

        assert_eq!(deck.file_name, DECK_FILE_NAME);
        assert_eq!(deck.slides.len(), 3);
        assert_eq!(deck.slides[0].layout, SlideLayout::Title);
        assert_eq!(deck.slides[0].title, "FP&A Variance Report");
        assert_eq!(deck.slides[0].body, vec!["Automated Analysis".to_string()]);
        assert_eq!(deck.slides[1].body, vec!["Below plan.".to_string()]);
        assert_eq!(deck.slides[2].body.len(), 5);
        assert_eq!(deck.slides[2].body[2], "EMEA Acct2: 2,000");
    }

    #[test]
    fn test_deck_with_no_records() {
        let deck = SlideDeck::build(&[], "Nothing to report.", &ReportConfig::default());
        assert!(deck.slides[2].body.is_empty());
        assert!(deck.to_outline().contains("# Top Variances"));
    }

    #[test]
    fn test_outline() {
        let records = vec![record("APAC", "Revenue", 100000, 180000)];
        let config = ReportConfig {
            top_n: 1,
            ..ReportConfig::default()
        };
        let deck = SlideDeck::build(&records, "  Shortfall in APAC.\n", &config);
        let outline = deck.to_outline();
        assert_eq!(
            outline,
            "# FP&A Variance Report\nAutomated Analysis\n\n\
             # Executive Summary\nShortfall in APAC.\n\n\
             # Top Variances\n- APAC Revenue: -80,000\n"
        );
    }
}
