use tracing::{debug, info};

use crate::error::ConfigError;
use crate::problem::Mode;
use crate::session::SessionConfig;

/// Time limits offered on the settings screen
pub const TIME_OPTIONS: [u32; 4] = [30, 40, 50, 60];

/// Collects a time limit and a mode before a session can start
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsSelector {
    time: Option<u32>,
    mode: Option<Mode>,
}

impl SettingsSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preselect from the command line. Zero time limits are refused.
    pub fn with_presets(time: Option<u32>, mode: Option<Mode>) -> Result<Self, ConfigError> {
        let mut selector = Self::new();
        if let Some(secs) = time {
            if secs == 0 {
                return Err(ConfigError::ZeroTimeLimit);
            }
            selector.select_time(secs);
        }
        if let Some(mode) = mode {
            selector.select_mode(mode);
        }
        Ok(selector)
    }

    pub fn select_time(&mut self, secs: u32) {
        debug!(secs, "time limit selected");
        self.time = Some(secs);
    }

    pub fn select_mode(&mut self, mode: Mode) {
        debug!(%mode, "mode selected");
        self.mode = Some(mode);
    }

    pub fn selected_time(&self) -> Option<u32> {
        self.time
    }

    pub fn selected_mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn is_ready(&self) -> bool {
        self.config().is_some()
    }

    /// Hand out a config and clear both selections, or do nothing at all
    /// when a selection is still missing.
    pub fn try_launch(&mut self) -> Option<SessionConfig> {
        let Some(config) = self.config() else {
            debug!(time = ?self.time, mode = ?self.mode, "launch ignored, settings incomplete");
            return None;
        };
        info!(
            time_limit = config.time_limit_seconds(),
            mode = %config.mode(),
            "launching session"
        );
        *self = Self::default();
        Some(config)
    }

    fn config(&self) -> Option<SessionConfig> {
        let (time, mode) = (self.time?, self.mode?);
        SessionConfig::new(time, mode).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unselected() {
        let selector = SettingsSelector::new();
        assert_eq!(selector.selected_time(), None);
        assert_eq!(selector.selected_mode(), None);
        assert!(!selector.is_ready());
    }

    #[test]
    fn reselecting_overwrites() {
        let mut selector = SettingsSelector::new();
        selector.select_time(30);
        selector.select_time(60);
        selector.select_mode(Mode::Addition);
        selector.select_mode(Mode::Mixed);
        assert_eq!(selector.selected_time(), Some(60));
        assert_eq!(selector.selected_mode(), Some(Mode::Mixed));
    }

    #[test]
    fn launch_is_noop_until_both_selected() {
        let mut selector = SettingsSelector::new();
        assert_eq!(selector.try_launch(), None);

        selector.select_time(40);
        assert_eq!(selector.try_launch(), None);
        assert_eq!(selector.selected_time(), Some(40));

        let mut mode_only = SettingsSelector::new();
        mode_only.select_mode(Mode::Subtraction);
        assert_eq!(mode_only.try_launch(), None);
        assert_eq!(mode_only.selected_mode(), Some(Mode::Subtraction));
    }

    #[test]
    fn launch_hands_out_config_and_clears() {
        let mut selector = SettingsSelector::new();
        selector.select_time(50);
        selector.select_mode(Mode::Subtraction);

        let config = selector.try_launch().unwrap();
        assert_eq!(config.time_limit_seconds(), 50);
        assert_eq!(config.mode(), Mode::Subtraction);
        assert_eq!(selector, SettingsSelector::new());
        assert_eq!(selector.try_launch(), None);
    }

    #[test]
    fn presets_only_apply_to_first_launch() {
        let mut selector = SettingsSelector::with_presets(Some(45), Some(Mode::Mixed)).unwrap();
        assert!(selector.is_ready());
        assert!(selector.try_launch().is_some());
        assert!(!selector.is_ready());
    }

    #[test]
    fn zero_preset_rejected() {
        assert_eq!(
            SettingsSelector::with_presets(Some(0), None),
            Err(ConfigError::ZeroTimeLimit)
        );
    }
}
