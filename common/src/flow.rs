//! アップロード・ログ削除フロー
//!
//! DOMに依存しない部分のみを扱う。各段階で画面に加える変更を ViewChange の列として返し、
//! 描画側はそれを順に反映する。
//!
//! - upload_started / UploadOutcome: `/upload`
//! - clear_started / ClearOutcome: `/clear-performance-log`
//! - RequestGeneration: 古い応答で新しい描画を上書きしないための世代番号

use crate::error::{Error, Result};
use crate::log_table::LogTable;
use crate::messages::{
    error_status, CLEAR_ERROR_FALLBACK, CLEAR_NETWORK_ERROR, STATUS_CLEARING,
    STATUS_INITIALIZING, STATUS_UPLOADING, UPLOAD_ERROR_FALLBACK, UPLOAD_NETWORK_ERROR,
};
use crate::results::{scroll_candidates, ResultPanels, ResultRegion};
use crate::status::Status;
use crate::types::{ClearResult, ErrorPayload, PerformanceLog, UploadResult};

/// 画面への変更1件
#[derive(Debug, Clone, PartialEq)]
pub enum ViewChange {
    Status(Status),
    Results(ResultPanels),
    /// ログ表を丸ごと置き換える
    Log(PerformanceLog),
    /// 候補のうち表示されている最初の領域へスクロール
    ScrollTo(Vec<ResultRegion>),
}

/// HTTP応答（ステータス判定済み、本文は未解析）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            ok: (200..300).contains(&status),
            status,
            body: body.into(),
        }
    }

    /// 失敗応答の本文が JSON でない場合のエラー（ステータスを残す）
    fn unreadable_error(&self, e: serde_json::Error) -> Error {
        Error::Transport(format!("HTTP {}: {}", self.status, e))
    }
}

// ============================================
// アップロード
// ============================================

/// 送信直前の変更
pub fn upload_started() -> Vec<ViewChange> {
    vec![
        ViewChange::Status(Status::loading(STATUS_INITIALIZING)),
        ViewChange::Results(ResultPanels::cleared()),
        ViewChange::Status(Status::loading(STATUS_UPLOADING)),
    ]
}

/// `/upload` の結果
#[derive(Debug)]
pub enum UploadOutcome {
    Completed(UploadResult),
    Rejected(ErrorPayload),
    /// 通信失敗・JSON解析失敗
    Failed(Error),
}

impl UploadOutcome {
    pub fn from_reply(reply: &HttpReply) -> Self {
        if reply.ok {
            match serde_json::from_str::<UploadResult>(&reply.body) {
                Ok(result) => UploadOutcome::Completed(result),
                Err(e) => UploadOutcome::Failed(e.into()),
            }
        } else {
            match serde_json::from_str::<ErrorPayload>(&reply.body) {
                Ok(payload) => UploadOutcome::Rejected(payload),
                Err(e) => UploadOutcome::Failed(reply.unreadable_error(e)),
            }
        }
    }

    pub fn from_transport(result: Result<HttpReply>) -> Self {
        match result {
            Ok(reply) => Self::from_reply(&reply),
            Err(e) => UploadOutcome::Failed(e),
        }
    }

    pub fn changes(&self) -> Vec<ViewChange> {
        match self {
            UploadOutcome::Completed(result) => {
                let mut changes = vec![
                    ViewChange::Status(Status::success(result.message.clone())),
                    ViewChange::Results(ResultPanels::from_upload(result)),
                ];
                let candidates = scroll_candidates(result);
                if !candidates.is_empty() {
                    changes.push(ViewChange::ScrollTo(candidates));
                }
                if let Some(log) = &result.performance_log {
                    changes.push(ViewChange::Log(log.clone()));
                }
                changes
            }
            UploadOutcome::Rejected(payload) => {
                let mut changes = vec![
                    ViewChange::Status(Status::error(error_status(
                        payload.error_text().as_deref(),
                        UPLOAD_ERROR_FALLBACK,
                    ))),
                    ViewChange::Results(ResultPanels::failed()),
                ];
                if let Some(log) = &payload.performance_log {
                    changes.push(ViewChange::Log(log.clone()));
                }
                changes
            }
            UploadOutcome::Failed(_) => vec![
                ViewChange::Status(Status::error(UPLOAD_NETWORK_ERROR)),
                ViewChange::Results(ResultPanels::cleared()),
            ],
        }
    }
}

// ============================================
// ログ削除
// ============================================

/// 確認ダイアログの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// 送信直前の変更。拒否された場合は None（何も変えず中断）
pub fn clear_started(confirmation: Confirmation) -> Option<Vec<ViewChange>> {
    match confirmation {
        Confirmation::Confirmed => Some(vec![ViewChange::Status(Status::loading(STATUS_CLEARING))]),
        Confirmation::Declined => None,
    }
}

/// `/clear-performance-log` の結果
#[derive(Debug)]
pub enum ClearOutcome {
    Cleared(ClearResult),
    Rejected(ErrorPayload),
    Failed(Error),
}

impl ClearOutcome {
    pub fn from_reply(reply: &HttpReply) -> Self {
        if reply.ok {
            match serde_json::from_str::<ClearResult>(&reply.body) {
                Ok(result) => ClearOutcome::Cleared(result),
                Err(e) => ClearOutcome::Failed(e.into()),
            }
        } else {
            match serde_json::from_str::<ErrorPayload>(&reply.body) {
                Ok(payload) => ClearOutcome::Rejected(payload),
                Err(e) => ClearOutcome::Failed(reply.unreadable_error(e)),
            }
        }
    }

    pub fn from_transport(result: Result<HttpReply>) -> Self {
        match result {
            Ok(reply) => Self::from_reply(&reply),
            Err(e) => ClearOutcome::Failed(e),
        }
    }

    pub fn changes(&self) -> Vec<ViewChange> {
        match self {
            ClearOutcome::Cleared(result) => vec![
                ViewChange::Status(Status::success(result.message.clone())),
                ViewChange::Log(result.performance_log.clone().unwrap_or_default()),
            ],
            // 削除に失敗した場合はサーバー側に残っているログが返る
            ClearOutcome::Rejected(payload) => vec![
                ViewChange::Status(Status::error(error_status(
                    payload.error_text().as_deref(),
                    CLEAR_ERROR_FALLBACK,
                ))),
                ViewChange::Log(payload.performance_log.clone().unwrap_or_default()),
            ],
            ClearOutcome::Failed(_) => vec![ViewChange::Status(Status::error(CLEAR_NETWORK_ERROR))],
        }
    }
}

// ============================================
// 世代番号
// ============================================

/// フローごとの要求世代
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGeneration {
    latest: u64,
}

impl RequestGeneration {
    /// 新しい要求を開始し、その世代を返す
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// 最新の要求の応答か
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}

// ============================================
// 画面状態
// ============================================

/// 画面全体の状態
///
/// ステータスは初回の変更まで None（サーバー描画のまま）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub status: Option<Status>,
    pub results: ResultPanels,
    pub log: PerformanceLog,
    pub last_scroll: Option<Vec<ResultRegion>>,
}

impl ViewState {
    pub fn new(initial_log: PerformanceLog) -> Self {
        Self {
            log: initial_log,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, change: ViewChange) {
        match change {
            ViewChange::Status(status) => self.status = Some(status),
            ViewChange::Results(results) => self.results = results,
            ViewChange::Log(log) => self.log = log,
            ViewChange::ScrollTo(candidates) => self.last_scroll = Some(candidates),
        }
    }

    pub fn apply_all(&mut self, changes: impl IntoIterator<Item = ViewChange>) {
        for change in changes {
            self.apply(change);
        }
    }

    /// 現在のログ表（空ならNone）
    pub fn log_table(&self) -> Option<LogTable> {
        LogTable::build(&self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_reply_ok_range() {
        assert!(HttpReply::new(200, "").ok);
        assert!(HttpReply::new(204, "").ok);
        assert!(!HttpReply::new(199, "").ok);
        assert!(!HttpReply::new(400, "").ok);
        assert!(!HttpReply::new(500, "").ok);
    }

    #[test]
    fn test_upload_started_sequence() {
        let changes = upload_started();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0], ViewChange::Status(Status::loading(STATUS_INITIALIZING)));
        assert_eq!(changes[1], ViewChange::Results(ResultPanels::cleared()));
        assert_eq!(changes[2], ViewChange::Status(Status::loading(STATUS_UPLOADING)));
    }

    #[test]
    fn test_upload_malformed_success_body_is_failure() {
        let outcome = UploadOutcome::from_reply(&HttpReply::new(200, "<html>"));
        assert!(matches!(outcome, UploadOutcome::Failed(Error::Json(_))));
    }

    #[test]
    fn test_upload_malformed_error_body_is_failure() {
        let outcome = UploadOutcome::from_reply(&HttpReply::new(502, "Bad Gateway"));
        match outcome {
            UploadOutcome::Failed(e) => assert!(e.to_string().contains("HTTP 502")),
            other => panic!("Failed になるはず: {:?}", other),
        }
    }

    #[test]
    fn test_upload_non_string_error_is_rejected() {
        let outcome = UploadOutcome::from_reply(&HttpReply::new(400, r#"{"error": 42}"#));
        assert_eq!(
            outcome.changes(),
            vec![
                ViewChange::Status(Status::error("Error: 42")),
                ViewChange::Results(ResultPanels::failed()),
            ]
        );
    }

    #[test]
    fn test_clear_malformed_error_body_keeps_status_code() {
        let outcome = ClearOutcome::from_reply(&HttpReply::new(500, "Internal Server Error"));
        match outcome {
            ClearOutcome::Failed(e) => assert!(e.to_string().contains("HTTP 500")),
            other => panic!("Failed になるはず: {:?}", other),
        }
    }

    #[test]
    fn test_upload_transport_error() {
        let outcome = UploadOutcome::from_transport(Err(Error::Transport("offline".into())));
        let changes = outcome.changes();
        assert_eq!(
            changes,
            vec![
                ViewChange::Status(Status::error(UPLOAD_NETWORK_ERROR)),
                ViewChange::Results(ResultPanels::cleared()),
            ]
        );
    }

    #[test]
    fn test_upload_success_without_log_keeps_log() {
        let outcome = UploadOutcome::from_reply(&HttpReply::new(200, r#"{"message": "OK"}"#));
        let changes = outcome.changes();
        assert!(!changes.iter().any(|c| matches!(c, ViewChange::Log(_))));
        assert!(!changes.iter().any(|c| matches!(c, ViewChange::ScrollTo(_))));
    }

    #[test]
    fn test_clear_declined() {
        assert!(clear_started(Confirmation::Declined).is_none());
        assert!(clear_started(false.into()).is_none());
    }

    #[test]
    fn test_clear_confirmed() {
        let changes = clear_started(true.into()).expect("確認済みなら開始する");
        assert_eq!(changes, vec![ViewChange::Status(Status::loading(STATUS_CLEARING))]);
    }

    #[test]
    fn test_clear_rejected_without_log_renders_placeholder() {
        let outcome = ClearOutcome::from_reply(&HttpReply::new(500, "{}"));
        let changes = outcome.changes();
        assert_eq!(
            changes,
            vec![
                ViewChange::Status(Status::error("Error: Gagal membersihkan log.")),
                ViewChange::Log(PerformanceLog::default()),
            ]
        );
    }

    #[test]
    fn test_clear_failure_leaves_log() {
        let outcome = ClearOutcome::from_transport(Err(Error::Transport("offline".into())));
        let changes = outcome.changes();
        assert_eq!(changes, vec![ViewChange::Status(Status::error(CLEAR_NETWORK_ERROR))]);
    }

    #[test]
    fn test_request_generation() {
        let mut generation = RequestGeneration::default();
        let first = generation.begin();
        assert!(generation.is_current(first));
        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_view_state_apply() {
        let mut state = ViewState::default();
        assert!(state.status.is_none());
        state.apply_all(upload_started());
        assert_eq!(state.status, Some(Status::loading(STATUS_UPLOADING)));
        assert_eq!(state.results, ResultPanels::cleared());
        assert!(state.log_table().is_none());
    }
}
