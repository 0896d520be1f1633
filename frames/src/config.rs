//! RAG pipeline configuration and theme settings.
//!
//! DESIGN
//! ======
//! Every field is defaulted: the backend returns partial objects (the mock
//! server sends `{ "generator": { "name": "OpenAI" } }`) and the front end
//! must still render something. Unknown theme keys (colors, fonts) are kept
//! in `extra` so a get/set round trip does not lose them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pipeline stages keyed by stage name (`Reader`, `Chunker`, `Embedder`,
/// `Retriever`, `Generator`).
pub type RagConfig = BTreeMap<String, RagComponentClass>;

/// Stage names in pipeline order.
pub const RAG_STAGES: [&str; 5] = ["Reader", "Chunker", "Embedder", "Retriever", "Generator"];

/// One pipeline stage: the available implementations and the selected one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagComponentClass {
    pub selected: String,
    pub components: BTreeMap<String, RagComponentConfig>,
}

impl RagComponentClass {
    /// The selected implementation, if it is among the listed components.
    #[must_use]
    pub fn selected_component(&self) -> Option<&RagComponentConfig> {
        self.components.get(&self.selected)
    }

    /// Select `name` if it is available. Returns whether the selection changed.
    pub fn select(&mut self, name: &str) -> bool {
        let available = self.components.get(name).is_some_and(|c| c.available);
        if !available || self.selected == name {
            return false;
        }
        self.selected = name.to_owned();
        true
    }
}

/// One implementation of a pipeline stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagComponentConfig {
    pub name: String,
    pub variables: Vec<String>,
    pub library: Vec<String>,
    pub description: String,
    pub config: BTreeMap<String, ConfigSetting>,
    #[serde(rename = "type")]
    pub kind: String,
    pub available: bool,
}

impl Default for RagComponentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            variables: Vec::new(),
            library: Vec::new(),
            description: String::new(),
            config: BTreeMap::new(),
            kind: String::new(),
            available: true,
        }
    }
}

/// A single tunable setting of a component (`dropdown`, `text`, `number`, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSetting {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
    pub description: String,
    pub values: Vec<String>,
}

/// A text field in a theme (title, subtitle, intro message).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSetting {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub description: String,
}

impl TextSetting {
    fn text(text: &str, description: &str) -> Self {
        Self { kind: "text".to_owned(), text: text.to_owned(), description: description.to_owned() }
    }
}

/// Visual theme. Only the fields the front end reads are typed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub theme_name: String,
    pub title: TextSetting,
    pub subtitle: TextSetting,
    pub intro_message: TextSetting,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            theme_name: "Light".to_owned(),
            title: TextSetting::text("Verba", "Title of the application"),
            subtitle: TextSetting::text("The Golden RAGtriever", "Subtitle of the application"),
            intro_message: TextSetting::text(
                "Welcome to Verba, your open-source RAG application! Ask a question about your documents to get started.",
                "Introduction message shown when the chat starts",
            ),
            extra: Map::new(),
        }
    }
}

impl Theme {
    /// Text shown as the first system message of a fresh chat.
    #[must_use]
    pub fn intro_text(&self) -> &str {
        &self.intro_message.text
    }
}

/// Active theme plus all selectable themes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub theme: Theme,
    pub themes: BTreeMap<String, Theme>,
}

impl ThemeConfig {
    /// Switch the active theme by name. Returns `false` for unknown names.
    pub fn select(&mut self, name: &str) -> bool {
        let Some(theme) = self.themes.get(name) else {
            return false;
        };
        self.theme = theme.clone();
        true
    }
}
