//! DOM要素の取得と直接操作
//!
//! ステータス行とスピナーはサーバー描画済みの要素をそのまま書き換える。

use gloo::console;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use epub_lens_common::{Error, ResultRegion, Result, Status};

use crate::api::backend::describe_js_error;

pub fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| Error::Dom("document がありません".into()))
}

/// 必須要素
pub fn required<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    optional(document, id).ok_or_else(|| Error::Dom(format!("要素が見つかりません: #{}", id)))
}

/// 任意要素（無い・型が違う場合は None）
pub fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

/// ステータス文言とスピナー
pub struct StatusLine {
    text: HtmlElement,
    spinner: HtmlElement,
}

impl StatusLine {
    pub fn new(text: HtmlElement, spinner: HtmlElement) -> Self {
        Self { text, spinner }
    }

    pub fn show(&self, status: &Status) {
        self.text.set_text_content(Some(&status.message));
        // style 設定の失敗は表示上の問題のみ
        set_style(&self.text, "color", status.tone().color());
        set_style(&self.spinner, "display", status.spinner_display());
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        console::debug!(format!(
            "style 設定に失敗: {}={} ({})",
            property,
            value,
            describe_js_error(&e)
        ));
    }
}

/// 結果表示領域
#[derive(Clone)]
pub struct ResultElements {
    pub text: HtmlElement,
    pub image: HtmlElement,
    pub gallery: HtmlElement,
}

impl ResultElements {
    pub fn get(&self, region: ResultRegion) -> &HtmlElement {
        match region {
            ResultRegion::Text => &self.text,
            ResultRegion::Image => &self.image,
            ResultRegion::Gallery => &self.gallery,
        }
    }

    /// 候補のうち高さを持つ最初の領域
    pub fn first_visible(&self, candidates: &[ResultRegion]) -> Option<&HtmlElement> {
        candidates
            .iter()
            .map(|region| self.get(*region))
            .find(|element| element.offset_height() > 0)
    }
}

/// 要素の先頭までスムーズスクロール
pub fn scroll_to_top(element: &HtmlElement) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
