//! Pipeline configuration editor (reader, chunker, embedder, retriever,
//! generator).
//!
//! SYSTEM CONTEXT
//! ==============
//! Used on the settings page for the global config and on the import page for
//! per-file overrides. The editor is controlled: it renders the config it is
//! given and reports edits through callbacks, which validate and store them.

#[cfg(test)]
#[path = "rag_config_editor_test.rs"]
mod rag_config_editor_test;

use frames::{ConfigSetting, RagConfig};
use leptos::prelude::*;
use serde_json::Value;

use crate::state::settings::edit_component_setting;

/// Form control used for one component setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingInput {
    Dropdown,
    Checkbox,
    Number,
    Password,
    Text,
}

pub fn setting_input(setting: &ConfigSetting) -> SettingInput {
    match setting.kind.as_str() {
        "dropdown" if !setting.values.is_empty() => SettingInput::Dropdown,
        "bool" | "boolean" => SettingInput::Checkbox,
        "number" => SettingInput::Number,
        "password" => SettingInput::Password,
        _ => SettingInput::Text,
    }
}

/// Value as shown in a form control. Strings are shown unquoted.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One edit reported by the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigEdit {
    Select { stage: String, component: String },
    Setting { stage: String, component: String, key: String, raw: String },
}

/// Apply an edit to a config that is not owned by `SettingsState`, such as a
/// per-file override. Returns `true` when something changed.
pub fn apply_edit(config: &mut RagConfig, edit: &ConfigEdit) -> bool {
    match edit {
        ConfigEdit::Select { stage, component } => config.get_mut(stage).is_some_and(|class| class.select(component)),
        ConfigEdit::Setting { stage, component, key, raw } => {
            edit_component_setting(config, stage, component, key, raw)
        }
    }
}

#[component]
pub fn RagConfigEditor(
    #[prop(into)] config: Signal<RagConfig>,
    on_edit: Callback<ConfigEdit>,
    #[prop(optional, into)] read_only: MaybeProp<bool>,
) -> impl IntoView {
    view! {
        <div class="rag-config">
            {move || {
                let config = config.get();
                if config.is_empty() {
                    return view! { <p class="rag-config__empty">"Connect to load the pipeline configuration"</p> }
                        .into_any();
                }
                config
                    .into_iter()
                    .map(|(stage, class)| {
                        let selected = class.selected.clone();
                        let stage_for_select = stage.clone();
                        let settings = class
                            .selected_component()
                            .map(|c| (c.name.clone(), c.description.clone(), c.config.clone()));
                        view! {
                            <section class="rag-config__stage">
                                <h3 class="rag-config__stage-name">{stage.clone()}</h3>
                                <select
                                    class="rag-config__select"
                                    disabled=move || read_only.get().unwrap_or(false)
                                    on:change=move |ev| {
                                        on_edit.run(ConfigEdit::Select {
                                            stage: stage_for_select.clone(),
                                            component: event_target_value(&ev),
                                        });
                                    }
                                >
                                    {class
                                        .components
                                        .values()
                                        .map(|c| {
                                            view! {
                                                <option
                                                    value=c.name.clone()
                                                    selected=c.name == selected
                                                    disabled=!c.available
                                                >
                                                    {c.name.clone()}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                                {settings
                                    .map(|(component, description, entries)| {
                                        view! {
                                            <p class="rag-config__description">{description}</p>
                                            {entries
                                                .into_iter()
                                                .map(|(key, setting)| {
                                                    setting_row(&stage, &component, key, setting, on_edit, read_only)
                                                })
                                                .collect_view()}
                                        }
                                    })}
                            </section>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

fn setting_row(
    stage: &str,
    component: &str,
    key: String,
    setting: ConfigSetting,
    on_edit: Callback<ConfigEdit>,
    read_only: MaybeProp<bool>,
) -> AnyView {
    let (stage, component, label) = (stage.to_owned(), component.to_owned(), key.clone());
    let edit = move |raw: String| {
        on_edit.run(ConfigEdit::Setting {
            stage: stage.clone(),
            component: component.clone(),
            key: key.clone(),
            raw,
        });
    };
    let current = display_value(&setting.value);

    let control = match setting_input(&setting) {
        SettingInput::Dropdown => view! {
            <select disabled=move || read_only.get().unwrap_or(false) on:change=move |ev| edit(event_target_value(&ev))>
                {setting
                    .values
                    .iter()
                    .map(|v| view! { <option value=v.clone() selected=*v == current>{v.clone()}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        SettingInput::Checkbox => {
            let checked = setting.value.as_bool().unwrap_or(false);
            view! {
                <input
                    type="checkbox"
                    prop:checked=checked
                    disabled=move || read_only.get().unwrap_or(false)
                    on:change=move |ev| edit(event_target_checked(&ev).to_string())
                />
            }
            .into_any()
        }
        kind => {
            let input_type = match kind {
                SettingInput::Number => "number",
                SettingInput::Password => "password",
                _ => "text",
            };
            view! {
                <input
                    type=input_type
                    prop:value=current
                    disabled=move || read_only.get().unwrap_or(false)
                    on:change=move |ev| edit(event_target_value(&ev))
                />
            }
            .into_any()
        }
    };

    view! {
        <label class="rag-config__setting" title=setting.description>
            <span class="rag-config__setting-name">{label}</span>
            {control}
        </label>
    }
    .into_any()
}
