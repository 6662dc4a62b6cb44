//! Render hints: a pure projection of client state for whatever draws it.
//!
//! The core does not render. It hands out display-ready markdown and flags
//! describing which tab, region and buttons should be active.

use super::entities::{DisplayLanguage, InputMode};
use super::lifecycle::{LifecycleState, RequestLifecycle};
use serde::Serialize;

pub const TRANSLATE_LABEL: &str = "Translate to বাংলা";
pub const TRANSLATING_LABEL: &str = "Translating...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Idle,
    Loading,
    Result,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabHint {
    pub mode: InputMode,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonHint {
    pub visible: bool,
    pub enabled: bool,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderHints {
    /// Bumped by every submission and rejection; tells repeated outcomes apart.
    pub generation: u64,
    pub active_mode: InputMode,
    pub tabs: Vec<TabHint>,
    pub region: Region,
    pub error_message: Option<String>,
    /// Markdown source. Also the plain-text fallback.
    pub english: Option<String>,
    pub bangla: Option<String>,
    pub language: DisplayLanguage,
    /// Markdown for `language`, only while the result region is visible.
    pub display_text: Option<String>,
    pub english_button_active: bool,
    pub bangla_button_visible: bool,
    pub bangla_button_active: bool,
    pub translate_button: ButtonHint,
    /// A translation request is pending, whichever region is shown.
    pub translating: bool,
}

pub fn project(mode: InputMode, lifecycle: &RequestLifecycle) -> RenderHints {
    let session = lifecycle.session();
    let result = session.result();
    let translating = lifecycle.is_translating();

    let (region, error_message) = match lifecycle.state() {
        LifecycleState::Idle => (Region::Idle, None),
        LifecycleState::Loading => (Region::Loading, None),
        LifecycleState::Result => (Region::Result, None),
        LifecycleState::Error(msg) => (Region::Error, Some(msg.clone())),
    };
    let showing_result = region == Region::Result;
    let language = session.display_language();
    let has_translation = session.has_translation();

    RenderHints {
        generation: lifecycle.generation(),
        active_mode: mode,
        tabs: InputMode::ALL
            .iter()
            .map(|&m| TabHint {
                mode: m,
                active: m == mode,
            })
            .collect(),
        region,
        error_message,
        english: result.map(|r| r.english.clone()),
        bangla: result.and_then(|r| r.bangla.clone()),
        language,
        display_text: if showing_result {
            session.display_text().map(str::to_string)
        } else {
            None
        },
        english_button_active: showing_result && language == DisplayLanguage::English,
        bangla_button_visible: showing_result && has_translation,
        bangla_button_active: showing_result && language == DisplayLanguage::Bangla,
        translate_button: ButtonHint {
            visible: result.is_some() && !has_translation,
            enabled: result.is_some() && !translating,
            label: if translating {
                TRANSLATING_LABEL
            } else {
                TRANSLATE_LABEL
            },
        },
        translating,
    }
}
