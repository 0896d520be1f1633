//! One draft in the import list.

#[cfg(test)]
#[path = "file_row_test.rs"]
mod file_row_test;

use frames::{FileData, FileStatus};
use leptos::prelude::*;

use crate::util::format;

/// Modifier class for the status pill.
pub fn status_class(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Ready => "file-row__status--ready",
        FileStatus::Done => "file-row__status--done",
        FileStatus::Error => "file-row__status--error",
        FileStatus::Waiting => "file-row__status--waiting",
        _ => "file-row__status--running",
    }
}

/// Reports in pipeline order, formatted for the expanded row.
pub fn report_lines(file: &FileData) -> Vec<String> {
    file.status_report
        .values()
        .map(|r| {
            let took = format::took(r.took);
            if took.is_empty() {
                format!("{}: {}", r.status, r.message)
            } else {
                format!("{}: {} ({took})", r.status, r.message)
            }
        })
        .collect()
}

/// Subtitle below the file name: URL or size.
pub fn subtitle(file: &FileData) -> String {
    if file.is_url { file.source.clone() } else { format::file_size(file.file_size) }
}

#[component]
pub fn FileRow(
    file: FileData,
    #[prop(into)] selected: Signal<bool>,
    on_select: Callback<String>,
    on_remove: Callback<String>,
) -> impl IntoView {
    let select_id = file.file_id.clone();
    let remove_id = file.file_id.clone();
    let status = file.status;
    let message = file.status_message().map(str::to_owned);
    let lines = report_lines(&file);
    let sub = subtitle(&file);
    let in_flight = !status.is_terminal();

    view! {
        <li
            class="file-row"
            class:file-row--selected=move || selected.get()
            on:click=move |_| on_select.run(select_id.clone())
        >
            <div class="file-row__main">
                <span class="file-row__name">{file.filename}</span>
                <span class="file-row__subtitle">{sub}</span>
            </div>
            <span class=format!("file-row__status {}", status_class(status))>{status.as_str()}</span>
            {message.map(|m| view! { <span class="file-row__message">{m}</span> })}
            <div class="file-row__labels">
                {file.labels.into_iter().map(|l| view! { <span class="chip">{l}</span> }).collect_view()}
            </div>
            <details class="file-row__reports" on:click=move |ev| ev.stop_propagation()>
                <summary>"Reports"</summary>
                <ul>{lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}</ul>
            </details>
            <button
                class="btn btn--ghost btn--small"
                title="Remove"
                disabled=in_flight
                on:click=move |ev| {
                    ev.stop_propagation();
                    on_remove.run(remove_id.clone());
                }
            >
                "✕"
            </button>
        </li>
    }
}
