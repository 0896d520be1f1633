//! Browser `localStorage` access for UI preferences.
//!
//! Only presentation preferences live here. File drafts and chat history are
//! never persisted; they last for the page lifetime only. Every key is
//! namespaced under `verba.` so preferences from other apps on the same
//! origin are never read back.

#[cfg(test)]
#[path = "ui_persistence_test.rs"]
mod ui_persistence_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Preferences the front end remembers between visits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preference {
    DarkMode,
}

impl Preference {
    /// Namespaced storage key.
    pub fn key(self) -> &'static str {
        match self {
            Self::DarkMode => "verba.dark_mode",
        }
    }
}

/// Decode a stored preference. Unparsable values read as unset.
#[cfg(any(test, feature = "hydrate"))]
fn decode<T: DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    serde_json::from_str(raw?).ok()
}

/// Stored value for `pref`; `None` when absent, unparsable, or outside the
/// browser.
pub fn load<T: DeserializeOwned>(pref: Preference) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(pref.key()).ok().flatten();
        decode(raw.as_deref())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = pref;
        None
    }
}

/// Store `value` for `pref`. Quota and serialization failures are ignored.
pub fn save<T: Serialize>(pref: Preference, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        if let Ok(raw) = serde_json::to_string(value) {
            let _ = storage.set_item(pref.key(), &raw);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (pref, value);
    }
}
