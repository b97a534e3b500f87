//! 結果パネル（テキスト・画像・ギャラリー）のモデル

use crate::messages::{
    GALLERY_FAILED, GALLERY_PLACEHOLDER, IMAGE_PLACEHOLDER, TEXT_PLACEHOLDER,
};
use crate::types::UploadResult;

/// パネル1つの表示内容
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel<T> {
    /// 何も表示しない
    #[default]
    Empty,
    /// 固定文言の段落
    Placeholder(&'static str),
    /// 見出し付きの結果
    Content(T),
}

impl<T> Panel<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Panel::Empty)
    }
}

/// 結果表示領域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultRegion {
    Text,
    Image,
    Gallery,
}

/// 3つの結果パネル
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPanels {
    /// AI生成テキスト
    pub text: Panel<String>,
    /// AI生成画像のURL
    pub image: Panel<String>,
    /// 元コンテンツ画像のURL
    pub gallery: Panel<Vec<String>>,
}

impl ResultPanels {
    /// 全パネルを空に
    pub fn cleared() -> Self {
        Self::default()
    }

    /// 成功応答の表示内容
    pub fn from_upload(result: &UploadResult) -> Self {
        let text = match result.meaningful_text() {
            Some(text) => Panel::Content(text.to_string()),
            None => Panel::Placeholder(TEXT_PLACEHOLDER),
        };

        let image = match result.image_url() {
            Some(url) => Panel::Content(url.to_string()),
            None => Panel::Placeholder(IMAGE_PLACEHOLDER),
        };

        let gallery = if result.image_urls.is_empty() {
            Panel::Placeholder(GALLERY_PLACEHOLDER)
        } else {
            Panel::Content(result.image_urls.clone())
        };

        Self { text, image, gallery }
    }

    /// サーバーが失敗を返したとき
    pub fn failed() -> Self {
        Self {
            text: Panel::Empty,
            image: Panel::Empty,
            gallery: Panel::Placeholder(GALLERY_FAILED),
        }
    }
}

/// スクロール先の候補（優先順）
///
/// ギャラリー画像がある場合のみスクロールする。候補のうち実際に
/// 高さを持つ最初の領域へスクロールするのは描画側の責務。
pub fn scroll_candidates(result: &UploadResult) -> Vec<ResultRegion> {
    if result.image_urls.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::with_capacity(3);
    if result.has_response_text() {
        candidates.push(ResultRegion::Text);
    }
    if result.image_url().is_some() {
        candidates.push(ResultRegion::Image);
    }
    candidates.push(ResultRegion::Gallery);
    candidates
}
