//! パフォーマンスログ表のモデル
//!
//! 列順は先頭行のキー順から1回だけ決定し（LogSchema）、全行をその列に射影する。
//! 長文列（プロンプト・応答・ステータス）のみ50文字で切り詰める。

use serde_json::Value;

use crate::messages::NOT_AVAILABLE;
use crate::types::{PerformanceLog, PerformanceLogEntry};

/// 長文列の最大表示文字数
pub const TRUNCATE_AT: usize = 50;

/// 切り詰め時に付与する記号
pub const ELLIPSIS: &str = "...";

/// バックエンドが書き出すログ列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogColumn {
    Timestamp,
    EpubFilename,
    LlmPrompt,
    LlmResponse,
    RougeScore,
    TotalDuration,
    NumEpubPages,
    NumChunks,
    StatusMessage,
}

impl LogColumn {
    pub const ALL: [LogColumn; 9] = [
        LogColumn::Timestamp,
        LogColumn::EpubFilename,
        LogColumn::LlmPrompt,
        LogColumn::LlmResponse,
        LogColumn::RougeScore,
        LogColumn::TotalDuration,
        LogColumn::NumEpubPages,
        LogColumn::NumChunks,
        LogColumn::StatusMessage,
    ];

    /// 表ヘッダ（= JSONのキー）
    pub fn header(&self) -> &'static str {
        match self {
            LogColumn::Timestamp => "Timestamp",
            LogColumn::EpubFilename => "ePub Filename",
            LogColumn::LlmPrompt => "LLM Prompt",
            LogColumn::LlmResponse => "LLM Response (Partial)",
            LogColumn::RougeScore => "ROUGE-1 F1 Score",
            LogColumn::TotalDuration => "Total Duration (s)",
            LogColumn::NumEpubPages => "Num ePub Pages",
            LogColumn::NumChunks => "Num Chunks",
            LogColumn::StatusMessage => "Status Message",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.header() == header)
    }

    /// 切り詰め対象の長文列か
    pub fn is_long_text(&self) -> bool {
        matches!(
            self,
            LogColumn::LlmPrompt | LogColumn::LlmResponse | LogColumn::StatusMessage
        )
    }
}

/// 1回の描画で使う列順
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSchema {
    columns: Vec<String>,
}

impl LogSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// 先頭行のキー順から列を決定（空ログならNone）
    pub fn from_first_entry(log: &PerformanceLog) -> Option<Self> {
        log.first()
            .map(|entry| Self::new(entry.fields().map(str::to_string).collect()))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 1行を列順のセル文字列に変換
    pub fn project(&self, entry: &PerformanceLogEntry) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| format_cell(column, entry.get(column)))
            .collect()
    }
}

/// 描画用の表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTable {
    pub schema: LogSchema,
    pub rows: Vec<Vec<String>>,
}

impl LogTable {
    /// 空ログはNone（プレースホルダ表示）
    pub fn build(log: &PerformanceLog) -> Option<Self> {
        let schema = LogSchema::from_first_entry(log)?;
        let rows = log.entries().iter().map(|entry| schema.project(entry)).collect();
        Some(Self { schema, rows })
    }

    /// 列名とセルの組（`data-label` 用）
    pub fn labelled_rows(&self) -> impl Iterator<Item = Vec<(&str, &str)>> + '_ {
        self.rows.iter().map(move |row| {
            self.schema
                .columns()
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect()
        })
    }
}

/// セル1つの表示文字列
pub fn format_cell(column: &str, value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => return NOT_AVAILABLE.to_string(),
        Some(value) => value_text(value),
    };

    let long_text = LogColumn::from_header(column).is_some_and(|c| c.is_long_text());
    if long_text {
        truncate(&text)
    } else {
        text
    }
}

/// 50文字を超える場合のみ切り詰める
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(TRUNCATE_AT) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // ブラウザの String(-0) は "0"
            Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
            // 整数値の浮動小数（Pythonの 3.0 等）はブラウザ表示に合わせて "3"
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
                format!("{:.0}", f)
            }
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Null => NOT_AVAILABLE.to_string(),
        other => other.to_string(),
    }
}
