//! Implements InputPort. Inquire-based interactive prompts.
//!
//! Main menu: pick an input mode and fill its form, translate the current
//! analysis, switch display language, quit. All state lives in AnalysisService;
//! output goes through the RenderPort.

use crate::adapters::ui::files::load_upload;
use crate::domain::{
    DisplayLanguage, DomainError, Dosage, InputMode, MedicinePayload, Patient, Region,
    SymptomsPayload,
};
use crate::ports::InputPort;
use crate::usecases::AnalysisService;
use async_trait::async_trait;
use crossterm::style::Stylize;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{CustomType, Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const GENDERS: &[&str] = &["male", "female", "other"];

/// Applies the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightCyan))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightCyan));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Analyze(InputMode),
    Translate,
    ShowLanguage(DisplayLanguage),
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Analyze(InputMode::Report) => f.write_str("Analyze a report (JPG/PDF)"),
            MenuItem::Analyze(InputMode::Symptoms) => f.write_str("Analyze symptoms"),
            MenuItem::Analyze(InputMode::Medicine) => f.write_str("Analyze a medicine"),
            MenuItem::Translate => f.write_str(crate::domain::render::TRANSLATE_LABEL),
            MenuItem::ShowLanguage(lang) => write!(f, "Show {}", lang),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    service: Arc<AnalysisService>,
}

impl TuiInputPort {
    pub fn new(service: Arc<AnalysisService>) -> Self {
        Self { service }
    }

    /// Menu entries for the current state; the active mode is listed first.
    fn menu(&self) -> Vec<MenuItem> {
        let hints = self.service.snapshot();
        let mut items: Vec<MenuItem> = InputMode::ALL.iter().map(|&m| MenuItem::Analyze(m)).collect();
        items.sort_by_key(|item| *item != MenuItem::Analyze(hints.active_mode));

        if hints.translate_button.visible && hints.translate_button.enabled {
            items.push(MenuItem::Translate);
        }
        if hints.region == Region::Result && hints.bangla_button_visible {
            let other = if hints.bangla_button_active {
                DisplayLanguage::English
            } else {
                DisplayLanguage::Bangla
            };
            items.push(MenuItem::ShowLanguage(other));
        }
        items.push(MenuItem::Quit);
        items
    }

    async fn analyze(&self, mode: InputMode) -> Result<(), DomainError> {
        self.service.select_mode(mode);
        let outcome = match mode {
            InputMode::Report => {
                let Some(path) = answer(Text::new("Path to report (JPG or PDF):").prompt())? else {
                    return Ok(());
                };
                let payload = load_upload(&PathBuf::from(path.trim())).await;
                self.service.submit_upload(&payload).await
            }
            InputMode::Symptoms => {
                let Some(text) = answer(
                    Text::new("Describe your symptoms:")
                        .with_help_message("e.g. fever and cough for two days")
                        .prompt(),
                )?
                else {
                    return Ok(());
                };
                self.service
                    .submit_symptoms(&SymptomsPayload { text })
                    .await
            }
            InputMode::Medicine => {
                let Some(payload) = prompt_medicine()? else {
                    return Ok(());
                };
                self.service.submit_medicine(&payload).await
            }
        };
        report(outcome.map(|_| ()))
    }
}

/// Esc or Ctrl-C inside a form means "back to the menu".
fn answer<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn prompt_medicine() -> Result<Option<MedicinePayload>, DomainError> {
    let Some(name) = answer(Text::new("Medicine name:").prompt())? else {
        return Ok(None);
    };
    let mut doses = [0u32; 3];
    for (dose, time_of_day) in doses.iter_mut().zip(["Morning", "Evening", "Night"]) {
        let message = format!("{} dose (tablets):", time_of_day);
        let Some(n) = answer(
            CustomType::<u32>::new(&message)
                .with_default(0)
                .with_error_message("Enter a whole number")
                .prompt(),
        )?
        else {
            return Ok(None);
        };
        *dose = n;
    }
    let Some(age) = answer(Text::new("Patient age:").prompt())? else {
        return Ok(None);
    };
    let Some(gender) = answer(Select::new("Patient gender:", GENDERS.to_vec()).prompt())? else {
        return Ok(None);
    };

    Ok(Some(MedicinePayload {
        name,
        dosage: Dosage {
            morning: doses[0],
            evening: doses[1],
            night: doses[2],
        },
        patient: Patient {
            // blank or non-numeric counts as missing
            age: age.trim().parse().ok(),
            gender: gender.to_string(),
        },
    }))
}

/// Validation and gateway failures are already on screen via the renderer.
/// Session errors leave state untouched, so print them here.
fn report(outcome: Result<(), DomainError>) -> Result<(), DomainError> {
    match outcome {
        Ok(()) => Ok(()),
        Err(DomainError::Session(e)) => {
            println!("{} {}", "Note:".bold().yellow(), e);
            Ok(())
        }
        Err(DomainError::Ui(e)) => Err(DomainError::Ui(e)),
        Err(e) => {
            debug!(error = %e, "request ended with error");
            Ok(())
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let Some(choice) = answer(Select::new("What would you like to do?", self.menu()).prompt())?
            else {
                return Ok(());
            };

            match choice {
                MenuItem::Analyze(mode) => self.analyze(mode).await?,
                MenuItem::Translate => report(self.service.translate().await.map(|_| ()))?,
                MenuItem::ShowLanguage(lang) => report(self.service.set_display_language(lang))?,
                MenuItem::Quit => return Ok(()),
            }
        }
    }
}
