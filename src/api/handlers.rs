use crate::error::VarianceError;
use crate::models::VarianceRecord;
use crate::report::{PreviewRow, SlideDeck};
use crate::service::{ComputeSummary, VarianceService};
use axum::{
    body::Bytes,
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 查询参数: 管理层点评 (可选)
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub commentary: Option<String>,
}

/// 差异表响应体
#[derive(Debug, Serialize)]
pub struct VarianceResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<VarianceRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ComputeSummary>,
}

/// 汇报响应体 (预览 + 幻灯片)
#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<Vec<PreviewRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck: Option<SlideDeck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 上传 CSV, 返回完整排名差异表
pub async fn compute_variance(
    State(service): State<Arc<VarianceService>>,
    body: Bytes,
) -> Response {
    // 解析与排序为 CPU 密集, 放到阻塞线程池
    let result = tokio::task::spawn_blocking(move || service.analyze(body.as_ref())).await;
    match result {
        Ok(Ok(outcome)) => {
            let response = VarianceResponse {
                success: true,
                message: format!("Computed {} variance records", outcome.records.len()),
                records: Some(outcome.records),
                summary: Some(outcome.summary),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(Err(e)) => {
            tracing::warn!("Variance computation failed: {}", e);
            let response = VarianceResponse {
                success: false,
                message: format!("Error: {}", e),
                records: None,
                summary: None,
            };
            (error_status(&e), Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Variance task aborted: {}", e);
            let response = VarianceResponse {
                success: false,
                message: "Error: variance task aborted".to_string(),
                records: None,
                summary: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 上传 CSV, 返回预览表和汇报幻灯片
pub async fn build_report(
    State(service): State<Arc<VarianceService>>,
    Query(query): Query<ReportQuery>,
    body: Bytes,
) -> Response {
    let commentary = query.commentary;
    let result = tokio::task::spawn_blocking(move || {
        service.build_report(body.as_ref(), commentary.as_deref())
    })
    .await;
    match result {
        Ok(Ok(report)) => {
            let outline = report.deck.to_outline();
            let response = ReportResponse {
                success: true,
                message: format!(
                    "Report generated from {} variance records",
                    report.records.len()
                ),
                preview: Some(report.preview),
                deck: Some(report.deck),
                outline: Some(outline),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(Err(e)) => {
            tracing::warn!("Report generation failed: {}", e);
            let response = ReportResponse {
                success: false,
                message: format!("Error: {}", e),
                preview: None,
                deck: None,
                outline: None,
            };
            (error_status(&e), Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Report task aborted: {}", e);
            let response = ReportResponse {
                success: false,
                message: "Error: report task aborted".to_string(),
                preview: None,
                deck: None,
                outline: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

fn error_status(e: &VarianceError) -> StatusCode {
    StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
