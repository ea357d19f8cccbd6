use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    #[default]
    String,
    Number,
    Boolean,
    Json,
}

/// A key/value application setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSetting {
    #[serde(default)]
    pub id: Option<i64>,
    pub setting_key: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub setting_value: String,
    #[serde(default)]
    pub setting_type: SettingType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub updated_by: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdateSetting {
    pub setting_value: String,
}

/// Look up a setting value by key; blank values count as missing.
pub fn setting_value<'a>(settings: &'a [AppSetting], key: &str) -> Option<&'a str> {
    settings
        .iter()
        .find(|s| s.setting_key == key)
        .map(|s| s.setting_value.as_str())
        .filter(|v| !v.trim().is_empty())
}

/// Letterhead printed on disposition sheets, read from the public settings.
#[derive(Clone, Debug, PartialEq)]
pub struct OrgProfile {
    pub name: String,
    pub unit: String,
    pub address: String,
}

impl Default for OrgProfile {
    fn default() -> Self {
        Self {
            name: "KEPOLISIAN NEGARA REPUBLIK INDONESIA".to_string(),
            unit: "DAERAH NUSA TENGGARA BARAT".to_string(),
            address: "Jl. Majapahit No. 2, Mataram".to_string(),
        }
    }
}

impl OrgProfile {
    pub fn from_settings(settings: &[AppSetting]) -> Self {
        let defaults = Self::default();
        Self {
            name: setting_value(settings, "org_name").map_or(defaults.name, str::to_string),
            unit: setting_value(settings, "org_unit").map_or(defaults.unit, str::to_string),
            address: setting_value(settings, "org_address").map_or(defaults.address, str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_setting_shape() {
        let settings: Vec<AppSetting> = serde_json::from_str(
            r#"[{"setting_key":"org_name","setting_value":"DINAS ARSIP","description":null,"is_public":true},
                {"setting_key":"org_unit","setting_value":null,"is_public":true}]"#,
        )
        .unwrap();
        assert_eq!(settings[1].setting_value, "");
        assert_eq!(settings[0].setting_type, SettingType::String);

        let org = OrgProfile::from_settings(&settings);
        assert_eq!(org.name, "DINAS ARSIP");
        assert_eq!(org.unit, OrgProfile::default().unit);
    }
}
