//! Reading picked files into drafts.

#[cfg(test)]
#[path = "file_reader_test.rs"]
mod file_reader_test;

use frames::{FileData, RagConfig};

/// Read every file of an `<input type="file">` change event into drafts.
/// Files that fail to read are skipped with a console warning.
#[cfg(feature = "hydrate")]
pub async fn read_input_files(input: &web_sys::HtmlInputElement, rag_config: &RagConfig) -> Vec<FileData> {
    use wasm_bindgen_futures::JsFuture;

    let Some(list) = input.files() else {
        return Vec::new();
    };
    let mut drafts = Vec::with_capacity(list.length() as usize);
    for idx in 0..list.length() {
        let Some(file) = list.get(idx) else {
            continue;
        };
        match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => {
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                drafts.push(FileData::from_bytes(&file.name(), &bytes, rag_config.clone()));
            }
            Err(e) => leptos::logging::warn!("failed to read {}: {e:?}", file.name()),
        }
    }
    drafts
}

/// Build a URL-import draft if `url` looks like an http(s) URL.
pub fn url_draft(url: &str, rag_config: &RagConfig) -> Option<FileData> {
    let url = url.trim();
    let is_web = url.starts_with("http://") || url.starts_with("https://");
    (is_web && url.len() > "https://".len()).then(|| FileData::from_url(url, rag_config.clone()))
}
