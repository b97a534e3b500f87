//! サーバー応答の型定義
//!
//! - PerformanceLogEntry: ログ1行（キー順を保持）
//! - PerformanceLog: ログ全体（時系列順）
//! - UploadResult: `/upload` 成功応答
//! - ErrorPayload: 失敗応答
//! - ClearResult: `/clear-performance-log` 成功応答

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::log_table::value_text;
use crate::messages::NO_RESPONSE_SENTINELS;

/// ログ1行
///
/// 列名はサーバーが送ってきた順序のまま保持する（serde_json の preserve_order）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceLogEntry(Map<String, Value>);

impl PerformanceLogEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 列を追加（同名の列は上書き、位置は最初の挿入位置のまま）
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl FromIterator<(String, Value)> for PerformanceLogEntry {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// パフォーマンスログ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceLog(Vec<PerformanceLogEntry>);

impl PerformanceLog {
    pub fn new(entries: Vec<PerformanceLogEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[PerformanceLogEntry] {
        &self.0
    }

    pub fn first(&self) -> Option<&PerformanceLogEntry> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PerformanceLogEntry>> for PerformanceLog {
    fn from(entries: Vec<PerformanceLogEntry>) -> Self {
        Self(entries)
    }
}

/// `/upload` 成功応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResult {
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,

    pub llm_response_text: Option<String>,

    pub llm_image_url: Option<String>,

    /// 元のePubページを画像化したもののURL
    #[serde(deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,

    pub performance_log: Option<PerformanceLog>,

    /// サーバーがテキスト結果の有無を明示する場合のフラグ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_text_available: Option<bool>,
}

impl UploadResult {
    /// 表示すべきAIテキスト
    ///
    /// `llm_text_available` があればそれに従い、無ければ番兵文字列と完全一致比較する。
    pub fn meaningful_text(&self) -> Option<&str> {
        let text = self.llm_response_text.as_deref().filter(|t| !t.is_empty())?;
        match self.llm_text_available {
            Some(available) => available.then_some(text),
            None if NO_RESPONSE_SENTINELS.contains(&text) => None,
            None => Some(text),
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.llm_image_url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn has_response_text(&self) -> bool {
        self.llm_response_text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// 失敗応答（`/upload`・`/clear-performance-log` 共通）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPayload {
    /// 文字列以外（数値など）も届くことがある
    pub error: Option<Value>,
    pub performance_log: Option<PerformanceLog>,
}

impl ErrorPayload {
    /// 表示用のエラー文言（null・空文字・false・0 は無しとみなす）
    pub fn error_text(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(value_text(other)),
        }
    }
}

/// `/clear-performance-log` 成功応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearResult {
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    pub performance_log: Option<PerformanceLog>,
}

/// null をデフォルト値として読む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_preserves_field_order() {
        let json = r#"{"Timestamp": "2024-05-01 10:00:00", "ePub Filename": "a.epub", "Num Chunks": 3}"#;
        let entry: PerformanceLogEntry = serde_json::from_str(json).expect("デシリアライズ失敗");
        let fields: Vec<&str> = entry.fields().collect();
        assert_eq!(fields, vec!["Timestamp", "ePub Filename", "Num Chunks"]);
    }

    #[test]
    fn test_entry_order_not_alphabetical() {
        let entry = PerformanceLogEntry::new()
            .with("Status Message", "ok")
            .with("Num Chunks", 2)
            .with("LLM Prompt", "p");
        let fields: Vec<&str> = entry.fields().collect();
        assert_eq!(fields, vec!["Status Message", "Num Chunks", "LLM Prompt"]);
    }

    #[test]
    fn test_log_deserialize() {
        let json = r#"[{"Status Message": "ok"}, {"Status Message": null}]"#;
        let log: PerformanceLog = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].get("Status Message"), Some(&Value::Null));
    }

    #[test]
    fn test_upload_result_full() {
        let json = json!({
            "message": "OK",
            "llm_response_text": "hello",
            "llm_image_url": "/generated_images/x/ai.png",
            "image_urls": ["a.png", "b.png"],
            "performance_log": [{"Status Message": "ok"}]
        });
        let result: UploadResult = serde_json::from_value(json).expect("デシリアライズ失敗");
        assert_eq!(result.message, "OK");
        assert_eq!(result.meaningful_text(), Some("hello"));
        assert_eq!(result.image_url(), Some("/generated_images/x/ai.png"));
        assert_eq!(result.image_urls.len(), 2);
        assert_eq!(result.performance_log.map(|l| l.len()), Some(1));
    }

    #[test]
    fn test_upload_result_missing_and_null_fields() {
        let json = json!({"message": null, "image_urls": null, "llm_response_text": null});
        let result: UploadResult = serde_json::from_value(json).expect("デシリアライズ失敗");
        assert_eq!(result.message, "");
        assert!(result.image_urls.is_empty());
        assert_eq!(result.meaningful_text(), None);
        assert!(result.performance_log.is_none());
    }

    #[test]
    fn test_meaningful_text_sentinels() {
        for sentinel in NO_RESPONSE_SENTINELS {
            let result = UploadResult {
                llm_response_text: Some(sentinel.to_string()),
                ..Default::default()
            };
            assert_eq!(result.meaningful_text(), None);
            // スクロール判定では番兵でも「テキストあり」扱い
            assert!(result.has_response_text());
        }
    }

    #[test]
    fn test_meaningful_text_sentinel_is_exact_match() {
        let result = UploadResult {
            llm_response_text: Some("Tidak ada respons dari AI. Coba lagi".to_string()),
            ..Default::default()
        };
        assert_eq!(result.meaningful_text(), Some("Tidak ada respons dari AI. Coba lagi"));
    }

    #[test]
    fn test_meaningful_text_flag_overrides_sentinel() {
        let hidden = UploadResult {
            llm_response_text: Some("something".to_string()),
            llm_text_available: Some(false),
            ..Default::default()
        };
        assert_eq!(hidden.meaningful_text(), None);

        let shown = UploadResult {
            llm_response_text: Some(NO_RESPONSE_SENTINELS[0].to_string()),
            llm_text_available: Some(true),
            ..Default::default()
        };
        assert_eq!(shown.meaningful_text(), Some(NO_RESPONSE_SENTINELS[0]));
    }

    #[test]
    fn test_empty_image_url_is_absent() {
        let result = UploadResult {
            llm_image_url: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(result.image_url(), None);
    }

    #[test]
    fn test_error_payload_deserialize() {
        let payload: ErrorPayload = serde_json::from_str(r#"{"error": "bad file"}"#).expect("デシリアライズ失敗");
        assert_eq!(payload.error_text().as_deref(), Some("bad file"));
        assert!(payload.performance_log.is_none());

        let empty: ErrorPayload = serde_json::from_str("{}").expect("デシリアライズ失敗");
        assert_eq!(empty, ErrorPayload::default());
    }

    #[test]
    fn test_error_payload_non_string_error() {
        let number: ErrorPayload = serde_json::from_str(r#"{"error": 42}"#).expect("デシリアライズ失敗");
        assert_eq!(number.error_text().as_deref(), Some("42"));

        let flag: ErrorPayload = serde_json::from_str(r#"{"error": true}"#).expect("デシリアライズ失敗");
        assert_eq!(flag.error_text().as_deref(), Some("true"));

        for falsy in [r#"{"error": null}"#, r#"{"error": ""}"#, r#"{"error": false}"#, r#"{"error": 0}"#] {
            let payload: ErrorPayload = serde_json::from_str(falsy).expect("デシリアライズ失敗");
            assert_eq!(payload.error_text(), None, "{}", falsy);
        }
    }

    #[test]
    fn test_clear_result_deserialize() {
        let result: ClearResult =
            serde_json::from_str(r#"{"message": "cleared", "performance_log": []}"#).expect("デシリアライズ失敗");
        assert_eq!(result.message, "cleared");
        assert_eq!(result.performance_log, Some(PerformanceLog::default()));
    }
}
