//! ePub Lens Common Library
//!
//! ブラウザ側ビューコントローラのDOM非依存部分:
//! ログ表・結果パネル・ステータスのモデルと、アップロード/ログ削除フロー

pub mod types;
pub mod messages;
pub mod error;
pub mod config;
pub mod log_table;
pub mod status;
pub mod results;
pub mod flow;

pub use types::{ClearResult, ErrorPayload, PerformanceLog, PerformanceLogEntry, UploadResult};
pub use error::{Error, Result};
pub use config::{ControllerConfig, ElementIds, Endpoints};
pub use log_table::{format_cell, LogColumn, LogSchema, LogTable};
pub use status::{Status, StatusTone};
pub use results::{Panel, ResultPanels, ResultRegion};
pub use flow::{
    clear_started, upload_started, ClearOutcome, Confirmation, HttpReply, RequestGeneration,
    UploadOutcome, ViewChange, ViewState,
};
