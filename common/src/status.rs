//! ステータス表示のモデル

/// エラー表示色
pub const ERROR_COLOR: &str = "#D32F2F";
/// 処理中の表示色
pub const BUSY_COLOR: &str = "var(--secondary-color)";
/// 完了時の表示色
pub const SUCCESS_COLOR: &str = "var(--primary-color)";

/// 表示トーン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Error,
    Busy,
    Success,
}

impl StatusTone {
    pub fn color(&self) -> &'static str {
        match self {
            StatusTone::Error => ERROR_COLOR,
            StatusTone::Busy => BUSY_COLOR,
            StatusTone::Success => SUCCESS_COLOR,
        }
    }
}

/// ステータス行の内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
    pub show_spinner: bool,
}

impl Status {
    pub fn new(message: impl Into<String>, is_error: bool, show_spinner: bool) -> Self {
        Self {
            message: message.into(),
            is_error,
            show_spinner,
        }
    }

    /// 処理中（スピナー表示）
    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(message, false, true)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, false, false)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, true, false)
    }

    /// エラーが最優先、次に処理中
    pub fn tone(&self) -> StatusTone {
        if self.is_error {
            StatusTone::Error
        } else if self.show_spinner {
            StatusTone::Busy
        } else {
            StatusTone::Success
        }
    }

    /// スピナーの CSS display 値
    pub fn spinner_display(&self) -> &'static str {
        if self.show_spinner {
            "block"
        } else {
            "none"
        }
    }
}
