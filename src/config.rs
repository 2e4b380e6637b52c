use crate::service::EngineOptions;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::{Deserialize, Serialize};

/// 默认管理层点评 (外部传入的固定文本, 非生成内容)
pub const DEFAULT_COMMENTARY: &str = "January results are below budget primarily driven by APAC and EMEA revenue shortfalls.\n\
Cost pressures were observed in AMER COGS. SG&A remains controlled.";

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineOptions,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

/// 报告 (预览表 + 幻灯片) 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    #[serde(default = "default_commentary")]
    pub commentary: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            preview_rows: default_preview_rows(),
            title: default_title(),
            subtitle: default_subtitle(),
            commentary: default_commentary(),
        }
    }
}

fn default_top_n() -> usize {
    5
}

fn default_preview_rows() -> usize {
    10
}

fn default_title() -> String {
    "FP&A Variance Report".to_string()
}

fn default_subtitle() -> String {
    "Automated Analysis".to_string()
}

fn default_commentary() -> String {
    DEFAULT_COMMENTARY.to_string()
}

impl AppConfig {
    /// 从配置文件 (可选) 和环境变量加载配置
    ///
    /// 环境变量前缀 `FPA`, 层级分隔符 `__`, 例如 `FPA__SERVER__PORT=9000`。
    pub fn from_env() -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("FPA")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
