//! ePub Lens Web View Controller (Leptos + WASM)
//!
//! ページ側からの呼び出し:
//! ```js
//! import init, { startViewController } from "./pkg/epub_lens_web.js";
//! await init();
//! startViewController(initialPerformanceLogs, { endpoints: { upload: "/upload" } });
//! ```

mod api;
pub mod components;
mod controller;
mod dom;

pub use controller::ViewController;

use wasm_bindgen::prelude::*;
use epub_lens_common::{ControllerConfig, Error, PerformanceLog, Result};

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}

/// コントローラを起動する
///
/// # Arguments
/// * `initial_logs` - サーバーがページに埋め込んだ初期ログ（undefined可）
/// * `config` - ControllerConfig 相当のオブジェクト（undefined なら既定値）
#[wasm_bindgen(js_name = startViewController)]
pub fn start_view_controller(initial_logs: JsValue, config: JsValue) -> std::result::Result<(), JsValue> {
    let started = read_config(config).and_then(|config| {
        let initial_log = read_initial_log(initial_logs)?;
        ViewController::new(config, initial_log)
    });

    match started {
        Ok(controller) => {
            controller.bind();
            Ok(())
        }
        Err(e) => {
            gloo::console::error!(format!("起動に失敗: {}", e));
            Err(JsValue::from_str(&e.to_string()))
        }
    }
}

fn read_config(value: JsValue) -> Result<ControllerConfig> {
    if value.is_undefined() || value.is_null() {
        return Ok(ControllerConfig::default());
    }
    // JSON文字列でも受け付ける
    if let Some(json) = value.as_string() {
        return ControllerConfig::from_json(&json);
    }
    let config: ControllerConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| Error::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn read_initial_log(value: JsValue) -> Result<PerformanceLog> {
    if value.is_undefined() || value.is_null() {
        return Ok(PerformanceLog::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| Error::Config(format!("初期ログを読み込めません: {}", e)))
}
