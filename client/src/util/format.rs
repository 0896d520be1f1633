//! Small display formatters shared by the views.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Human file size (`1.5 KB`, `3.0 MB`).
#[allow(clippy::cast_precision_loss)]
pub fn file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Stage duration in seconds as reported by status frames.
pub fn took(seconds: f64) -> String {
    if seconds <= 0.0 {
        String::new()
    } else if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else {
        format!("{seconds:.1}s")
    }
}

/// Relevance score with two decimals.
pub fn score(value: f64) -> String {
    format!("{value:.2}")
}

/// At most `max_chars` characters of `text`, with an ellipsis when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", trimmed[..idx].trim_end()),
        None => trimmed.to_owned(),
    }
}
