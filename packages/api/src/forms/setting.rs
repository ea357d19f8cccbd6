use crate::models::{AppSetting, SettingType};

use super::FormErrors;

/// Inline editor for one application setting.
#[derive(Clone, Debug, PartialEq)]
pub struct AppSettingForm {
    pub setting_type: SettingType,
    pub value: String,
}

impl AppSettingForm {
    pub fn from_setting(setting: &AppSetting) -> Self {
        Self {
            setting_type: setting.setting_type,
            value: setting.setting_value.clone(),
        }
    }

    /// The value to send, normalised for its type.
    pub fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        let value = self.value.trim();
        let normalised = match self.setting_type {
            SettingType::String => self.value.clone(),
            SettingType::Number => {
                if value.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
                    value.to_string()
                } else {
                    errors.add("setting_value", "Nilai harus berupa angka");
                    String::new()
                }
            }
            SettingType::Boolean => match value.to_ascii_lowercase().as_str() {
                "true" | "false" => value.to_ascii_lowercase(),
                _ => {
                    errors.add("setting_value", "Nilai harus true atau false");
                    String::new()
                }
            },
            SettingType::Json => match serde_json::from_str::<serde_json::Value>(value) {
                Ok(parsed) => parsed.to_string(),
                Err(_) => {
                    errors.add("setting_value", "JSON tidak valid");
                    String::new()
                }
            },
        };
        errors.finish(|| normalised)
    }
}
