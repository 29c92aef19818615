use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// App id NGX is initialized with when [`DlssSettings::app_id`] is left at 0.
pub const FALLBACK_APP_ID: u32 = 231313132;

/// The settings for the DLSS plugin, stored as a JSON settings asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DlssSettings {
    /// App ID to pass for DLSS to identify the app. 0 if unused.
    pub app_id: u32,
    /// Project ID to pass for DLSS to identify the project.
    pub project_id: Option<Uuid>,
    /// If set, DLSS initialization is delayed until actually used.
    pub lazy_init: bool,
}

impl Default for DlssSettings {
    fn default() -> Self {
        Self {
            app_id: 0,
            project_id: None,
            lazy_init: true,
        }
    }
}

impl DlssSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn effective_app_id(&self) -> u32 {
        match self.app_id {
            0 => FALLBACK_APP_ID,
            app_id => app_id,
        }
    }
}

/// Error returned when reading or writing [`DlssSettings`].
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Invalid DLSS settings: {0}")]
    Json(#[from] serde_json::Error),
}
