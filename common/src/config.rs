//! コントローラ設定
//!
//! ページ側から JS オブジェクト（または JSON 文字列）で渡す。全項目に既定値あり。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// バックエンドの送信先
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endpoints {
    pub upload: String,
    pub clear_log: String,
    pub download_log: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            upload: "/upload".into(),
            clear_log: "/clear-performance-log".into(),
            download_log: "/download-performance-log".into(),
        }
    }
}

/// バインド対象の要素ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementIds {
    pub upload_form: String,
    pub status: String,
    pub loading_spinner: String,
    pub image_results: String,
    pub llm_result_text: String,
    pub llm_result_image: String,
    pub log_table_container: String,
    pub download_log_button: String,
    pub clear_log_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            upload_form: "uploadForm".into(),
            status: "status".into(),
            loading_spinner: "loadingSpinner".into(),
            image_results: "imageResults".into(),
            llm_result_text: "llmResultText".into(),
            llm_result_image: "llmResultImage".into(),
            log_table_container: "logTableContainer".into(),
            download_log_button: "downloadLogBtn".into(),
            clear_log_button: "clearLogBtn".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerConfig {
    pub endpoints: Endpoints,
    pub element_ids: ElementIds,
}

impl ControllerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ControllerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 空の送信先・IDを拒否
    pub fn validate(&self) -> Result<()> {
        let endpoints = [
            ("upload", &self.endpoints.upload),
            ("clearLog", &self.endpoints.clear_log),
            ("downloadLog", &self.endpoints.download_log),
        ];
        for (name, value) in endpoints {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("endpoints.{} が空です", name)));
            }
        }

        let ids = &self.element_ids;
        let required = [
            ("uploadForm", &ids.upload_form),
            ("status", &ids.status),
            ("loadingSpinner", &ids.loading_spinner),
            ("imageResults", &ids.image_results),
            ("llmResultText", &ids.llm_result_text),
            ("llmResultImage", &ids.llm_result_image),
            ("logTableContainer", &ids.log_table_container),
            ("downloadLogBtn", &ids.download_log_button),
            ("clearLogBtn", &ids.clear_log_button),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("elementIds.{} が空です", name)));
            }
        }
        Ok(())
    }
}
