//! `/upload`・`/clear-performance-log` への送信
//!
//! 応答本文はテキストのまま返し、JSON解析は共通ライブラリのフロー側で行う。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};
use epub_lens_common::{Error, HttpReply, Result};

/// POST送信（共通処理）
async fn post(url: &str, body: Option<&JsValue>) -> std::result::Result<HttpReply, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    if let Some(body) = body {
        opts.set_body(body);
    }

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window がありません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;

    Ok(HttpReply {
        ok: resp.ok(),
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    })
}

/// フォーム内容をmultipartで送信
pub async fn post_form(url: &str, form: &FormData) -> Result<HttpReply> {
    post(url, Some(form.as_ref())).await.map_err(transport_error)
}

/// 本文なしで送信
pub async fn post_empty(url: &str) -> Result<HttpReply> {
    post(url, None).await.map_err(transport_error)
}

pub fn transport_error(err: JsValue) -> Error {
    Error::Transport(describe_js_error(&err))
}

/// JS例外を文字列化
pub fn describe_js_error(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", err)
}
