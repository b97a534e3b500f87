//! 画面コンポーネント

pub mod log_table;
pub mod result_panels;
