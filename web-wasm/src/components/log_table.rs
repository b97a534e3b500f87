//! パフォーマンスログ表コンポーネント

use leptos::prelude::*;
use epub_lens_common::messages::EMPTY_LOG;
use epub_lens_common::{LogTable, PerformanceLog};

/// ログが変わるたびに表全体を作り直す
#[component]
pub fn PerformanceLogTable(log: ReadSignal<PerformanceLog>) -> impl IntoView {
    move || {
        let Some(table) = LogTable::build(&log.get()) else {
            return view! { <p>{EMPTY_LOG}</p> }.into_any();
        };

        let headers = table
            .schema
            .columns()
            .iter()
            .map(|column| {
                let column = column.clone();
                view! { <th>{column}</th> }
            })
            .collect_view();

        let rows = table
            .labelled_rows()
            .map(|cells| {
                let cells = cells
                    .into_iter()
                    .map(|(label, cell)| {
                        // モバイル表示用の列名
                        let label = label.to_string();
                        let cell = cell.to_string();
                        view! { <td data-label=label>{cell}</td> }
                    })
                    .collect_view();
                view! { <tr>{cells}</tr> }
            })
            .collect_view();

        view! {
            <table class="performance-table">
                <thead>
                    <tr>{headers}</tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        }
        .into_any()
    }
}
