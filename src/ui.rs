//! UI surface state: toolbar indicators, properties panel, swatches,
//! theme, calculator visibility, and pending user alerts.
//!
//! The host chrome (DOM, toolkit, ...) is external; this struct is the
//! single source of truth it mirrors.

use crate::draw::color::SWATCHES;
use crate::draw::Color;

/// Blocking, user-facing message (e.g. the clipboard fallback alert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

/// State of the toolbar, panels, and theme.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Indicator id of the highlighted tool button (`tool-<mode>`).
    active_indicator: Option<&'static str>,
    properties_panel_visible: bool,
    /// Index into [`SWATCHES`] of the selected palette entry.
    selected_swatch: usize,
    dark_mode: bool,
    calculator_visible: bool,
    alerts: Vec<Alert>,
}

impl UiState {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            active_indicator: None,
            properties_panel_visible: false,
            selected_swatch: 0,
            dark_mode,
            calculator_visible: false,
            alerts: Vec::new(),
        }
    }

    /// Deactivates all tool indicators, then activates the given one.
    pub fn activate_indicator(&mut self, id: &'static str) {
        self.active_indicator = Some(id);
    }

    pub fn active_indicator(&self) -> Option<&'static str> {
        self.active_indicator
    }

    pub fn show_properties_panel(&mut self) {
        self.properties_panel_visible = true;
    }

    pub fn hide_properties_panel(&mut self) {
        self.properties_panel_visible = false;
    }

    pub fn properties_panel_visible(&self) -> bool {
        self.properties_panel_visible
    }

    /// Selects a swatch and returns its color; out-of-range indices are
    /// ignored and return `None`.
    pub fn select_swatch(&mut self, index: usize) -> Option<Color> {
        let color = SWATCHES.get(index).copied()?;
        self.selected_swatch = index;
        Some(color)
    }

    pub fn selected_swatch(&self) -> usize {
        self.selected_swatch
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, dark: bool) {
        self.dark_mode = dark;
    }

    pub fn toggle_calculator(&mut self) -> bool {
        self.calculator_visible = !self.calculator_visible;
        self.calculator_visible
    }

    pub fn calculator_visible(&self) -> bool {
        self.calculator_visible
    }

    /// Queues a blocking user-facing alert for the host to display.
    pub fn push_alert(&mut self, message: impl Into<String>) {
        self.alerts.push(Alert {
            message: message.into(),
        });
    }

    /// Drains queued alerts.
    pub fn take_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }
}
