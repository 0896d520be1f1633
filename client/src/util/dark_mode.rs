//! Light/dark theme preference.
//!
//! The preference is stored in `localStorage` and applied as a `data-theme`
//! attribute on `<html>`. Without a stored value the system color scheme
//! decides. SSR paths no-op.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use super::ui_persistence::{self, Preference};

/// Stored preference, falling back to `prefers-color-scheme`.
pub fn read_preference() -> bool {
    if let Some(stored) = ui_persistence::load::<bool>(Preference::DarkMode) {
        return stored;
    }
    system_prefers_dark()
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Attribute value for the `<html data-theme>` switch.
pub fn theme_attribute(enabled: bool) -> &'static str {
    if enabled { "dark" } else { "light" }
}

pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = el.set_attribute("data-theme", theme_attribute(enabled));
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

/// Flip the preference, apply it and persist it.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    ui_persistence::save(Preference::DarkMode, &next);
    next
}
