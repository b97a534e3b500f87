//! ビューコントローラ
//!
//! サーバー描画済みページの各領域にコンポーネントをマウントし、
//! フォーム送信・ログ削除・ログダウンロードのイベントを受けて画面を更新する。

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use gloo::console;
use gloo::events::{EventListener, EventListenerOptions};
use leptos::prelude::*;
use web_sys::{FormData, HtmlElement, HtmlFormElement};
use epub_lens_common::messages::CLEAR_CONFIRMATION;
use epub_lens_common::{
    clear_started, upload_started, ClearOutcome, Confirmation, ControllerConfig, HttpReply, Panel,
    PerformanceLog, RequestGeneration, Result, UploadOutcome, ViewChange,
};

use crate::api::backend;
use crate::components::{
    log_table::PerformanceLogTable,
    result_panels::{Gallery, ImageResult, TextResult},
};
use crate::dom::{self, ResultElements, StatusLine};

/// コンポーネントを初回の描画時にマウントする領域
///
/// マウントまではサーバー描画の内容をそのまま残す。
struct Region {
    element: HtmlElement,
    mounted: Cell<bool>,
}

impl Region {
    fn new(element: HtmlElement) -> Self {
        Self {
            element,
            mounted: Cell::new(false),
        }
    }

    fn mount_once<F, N>(&self, view: F)
    where
        F: FnOnce() -> N + 'static,
        N: IntoView,
    {
        if self.mounted.replace(true) {
            return;
        }
        self.element.set_inner_html("");
        leptos::mount::mount_to(self.element.clone(), view).forget();
    }
}

/// 任意のボタン・フォーム
struct Triggers {
    upload_form: Option<HtmlFormElement>,
    download_button: Option<HtmlElement>,
    clear_button: Option<HtmlElement>,
}

pub struct ViewController {
    config: ControllerConfig,
    status_line: StatusLine,
    results: ResultElements,
    triggers: Triggers,

    log_region: Region,
    text_region: Region,
    image_region: Region,
    gallery_region: Region,

    log: RwSignal<PerformanceLog>,
    text: RwSignal<Panel<String>>,
    image: RwSignal<Panel<String>>,
    gallery: RwSignal<Panel<Vec<String>>>,

    upload_generation: RefCell<RequestGeneration>,
    clear_generation: RefCell<RequestGeneration>,
}

impl ViewController {
    /// ページの要素を取得し、初期ログがあれば表示する
    pub fn new(config: ControllerConfig, initial_log: PerformanceLog) -> Result<Rc<Self>> {
        let document = dom::document()?;
        let ids = &config.element_ids;

        let status_line = StatusLine::new(
            dom::required(&document, &ids.status)?,
            dom::required(&document, &ids.loading_spinner)?,
        );
        let results = ResultElements {
            text: dom::required(&document, &ids.llm_result_text)?,
            image: dom::required(&document, &ids.llm_result_image)?,
            gallery: dom::required(&document, &ids.image_results)?,
        };
        let log_container: HtmlElement = dom::required(&document, &ids.log_table_container)?;

        let triggers = Triggers {
            upload_form: dom::optional(&document, &ids.upload_form),
            download_button: dom::optional(&document, &ids.download_log_button),
            clear_button: dom::optional(&document, &ids.clear_log_button),
        };

        let has_initial_log = !initial_log.is_empty();

        let controller = Rc::new(Self {
            log_region: Region::new(log_container),
            text_region: Region::new(results.text.clone()),
            image_region: Region::new(results.image.clone()),
            gallery_region: Region::new(results.gallery.clone()),
            log: RwSignal::new(initial_log),
            text: RwSignal::new(Panel::Empty),
            image: RwSignal::new(Panel::Empty),
            gallery: RwSignal::new(Panel::Empty),
            upload_generation: RefCell::new(RequestGeneration::default()),
            clear_generation: RefCell::new(RequestGeneration::default()),
            config,
            status_line,
            results,
            triggers,
        });

        if has_initial_log {
            controller.mount_log();
        }

        Ok(controller)
    }

    /// イベントリスナー登録（要素が無いものは登録しない）
    pub fn bind(self: &Rc<Self>) {
        if let Some(form) = &self.triggers.upload_form {
            let controller = Rc::clone(self);
            let form_for_submit = form.clone();
            EventListener::new_with_options(
                form,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let controller = Rc::clone(&controller);
                    let form = form_for_submit.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        controller.submit_upload(&form).await;
                    });
                },
            )
            .forget();
        }

        if let Some(button) = &self.triggers.download_button {
            let controller = Rc::clone(self);
            EventListener::new(button, "click", move |_| controller.download_log()).forget();
        }

        if let Some(button) = &self.triggers.clear_button {
            let controller = Rc::clone(self);
            EventListener::new(button, "click", move |_| {
                let controller = Rc::clone(&controller);
                wasm_bindgen_futures::spawn_local(async move {
                    controller.clear_log().await;
                });
            })
            .forget();
        }
    }

    /// アップロードフォーム送信
    pub async fn submit_upload(&self, form: &HtmlFormElement) {
        let url = self.config.endpoints.upload.as_str();
        self.run_upload(async move {
            let data = FormData::new_with_form(form).map_err(backend::transport_error)?;
            backend::post_form(url, &data).await
        })
        .await;
    }

    /// アップロードの画面遷移
    ///
    /// 世代番号は最初のポーリング時に確定するため、後から開始した要求の応答が優先される。
    pub async fn run_upload(&self, request: impl Future<Output = Result<HttpReply>>) {
        let generation = self.upload_generation.borrow_mut().begin();
        self.apply_all(upload_started());

        let outcome = UploadOutcome::from_transport(request.await);

        if let UploadOutcome::Failed(e) = &outcome {
            console::error!(format!("サーバー通信エラー: {}", e));
        }

        if !self.upload_generation.borrow().is_current(generation) {
            console::debug!(format!("古いアップロード応答を破棄: #{}", generation));
            return;
        }

        self.apply_all(outcome.changes());
    }

    /// ログ削除（確認ダイアログで拒否されたら何もしない）
    pub async fn clear_log(&self) {
        let confirmed = gloo::dialogs::confirm(CLEAR_CONFIRMATION);
        self.run_clear(
            confirmed.into(),
            backend::post_empty(&self.config.endpoints.clear_log),
        )
        .await;
    }

    /// ログ削除の画面遷移（拒否時は要求を送らない）
    pub async fn run_clear(
        &self,
        confirmation: Confirmation,
        request: impl Future<Output = Result<HttpReply>>,
    ) {
        let Some(changes) = clear_started(confirmation) else {
            return;
        };

        let generation = self.clear_generation.borrow_mut().begin();
        self.apply_all(changes);

        let outcome = ClearOutcome::from_transport(request.await);

        if let ClearOutcome::Failed(e) = &outcome {
            console::error!(format!("ログ削除エラー: {}", e));
        }

        if !self.clear_generation.borrow().is_current(generation) {
            console::debug!(format!("古いログ削除応答を破棄: #{}", generation));
            return;
        }

        self.apply_all(outcome.changes());
    }

    /// ダウンロードはブラウザの遷移に任せる
    pub fn download_log(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(&self.config.endpoints.download_log) {
            console::error!(format!(
                "ログのダウンロードに失敗: {}",
                backend::describe_js_error(&e)
            ));
        }
    }

    pub fn apply_all(&self, changes: impl IntoIterator<Item = ViewChange>) {
        for change in changes {
            self.apply(change);
        }
    }

    pub fn apply(&self, change: ViewChange) {
        match change {
            ViewChange::Status(status) => self.status_line.show(&status),
            ViewChange::Results(panels) => {
                self.text.set(panels.text);
                self.image.set(panels.image);
                self.gallery.set(panels.gallery);
                self.mount_results();
            }
            ViewChange::Log(log) => {
                console::debug!(format!("ログ表を更新: {}行", log.len()));
                self.log.set(log);
                self.mount_log();
            }
            ViewChange::ScrollTo(candidates) => {
                // 描画が反映されてから高さを判定する
                let results = self.results.clone();
                request_animation_frame(move || {
                    if let Some(element) = results.first_visible(&candidates) {
                        dom::scroll_to_top(element);
                    }
                });
            }
        }
    }

    fn mount_log(&self) {
        let log = self.log.read_only();
        self.log_region
            .mount_once(move || view! { <PerformanceLogTable log=log /> });
    }

    fn mount_results(&self) {
        let text = self.text.read_only();
        let image = self.image.read_only();
        let gallery = self.gallery.read_only();
        self.text_region.mount_once(move || view! { <TextResult panel=text /> });
        self.image_region.mount_once(move || view! { <ImageResult panel=image /> });
        self.gallery_region.mount_once(move || view! { <Gallery panel=gallery /> });
    }
}
