//! 結果パネルコンポーネント（AIテキスト・AI画像・元コンテンツ画像）

use leptos::prelude::*;
use epub_lens_common::messages::{
    GALLERY_HEADING, GALLERY_IMAGE_ALT, IMAGE_ALT, IMAGE_HEADING, TEXT_HEADING,
};
use epub_lens_common::Panel;

#[component]
pub fn TextResult(panel: ReadSignal<Panel<String>>) -> impl IntoView {
    move || match panel.get() {
        Panel::Empty => ().into_any(),
        Panel::Placeholder(message) => view! { <p>{message}</p> }.into_any(),
        Panel::Content(text) => view! {
            <h2>{TEXT_HEADING}</h2>
            <pre>{text}</pre>
        }
        .into_any(),
    }
}

#[component]
pub fn ImageResult(panel: ReadSignal<Panel<String>>) -> impl IntoView {
    move || match panel.get() {
        Panel::Empty => ().into_any(),
        Panel::Placeholder(message) => view! { <p>{message}</p> }.into_any(),
        Panel::Content(url) => view! {
            <h2>{IMAGE_HEADING}</h2>
            <img src=url alt=IMAGE_ALT />
        }
        .into_any(),
    }
}

/// ページ数が多いので画像は遅延読み込み
#[component]
pub fn Gallery(panel: ReadSignal<Panel<Vec<String>>>) -> impl IntoView {
    move || match panel.get() {
        Panel::Empty => ().into_any(),
        Panel::Placeholder(message) => view! { <p>{message}</p> }.into_any(),
        Panel::Content(urls) => {
            let images = urls
                .into_iter()
                .map(|url| view! { <img src=url alt=GALLERY_IMAGE_ALT loading="lazy" /> })
                .collect_view();
            view! {
                <h2>{GALLERY_HEADING}</h2>
                {images}
            }
            .into_any()
        }
    }
}
