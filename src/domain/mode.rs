//! Active input mode. Pure UI routing; touches nothing else.

use super::entities::InputMode;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputModeController {
    active: InputMode,
}

impl InputModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_mode(&mut self, mode: InputMode) {
        self.active = mode;
    }

    pub fn active(&self) -> InputMode {
        self.active
    }

    pub fn is_active(&self, mode: InputMode) -> bool {
        self.active == mode
    }
}
