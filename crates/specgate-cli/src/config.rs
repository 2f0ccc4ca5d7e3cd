use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use specgate_contract::ContractSyntax;
use specgate_fixtures::FixtureLayout;
use specgate_report::{DEFAULT_DETAIL_LIMIT, DEFAULT_STEP_SUMMARY_ENV, OutputFormat, RenderOptions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub report: ReportSettings,
    pub step_summary: StepSummarySettings,
    pub contract: ContractSettings,
    pub fixtures: FixtureSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportSettings {
    pub format: OutputFormat,
    pub detail_limit: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            detail_limit: DEFAULT_DETAIL_LIMIT,
        }
    }
}

impl ReportSettings {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            detail_limit: self.detail_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StepSummarySettings {
    /// Environment variable naming the step summary file.
    pub env_var: String,
}

impl Default for StepSummarySettings {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_STEP_SUMMARY_ENV.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractSettings {
    pub section_key: String,
    pub list_keys: Vec<String>,
}

impl Default for ContractSettings {
    fn default() -> Self {
        let syntax = ContractSyntax::default();
        Self {
            section_key: syntax.section_key,
            list_keys: syntax.list_keys,
        }
    }
}

impl ContractSettings {
    pub fn syntax(&self) -> ContractSyntax {
        ContractSyntax {
            section_key: self.section_key.clone(),
            list_keys: self.list_keys.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureSettings {
    pub good_dir: String,
    pub bad_dir: String,
    pub extension: String,
}

impl Default for FixtureSettings {
    fn default() -> Self {
        let layout = FixtureLayout::default();
        Self {
            good_dir: layout.good_dir,
            bad_dir: layout.bad_dir,
            extension: layout.extension,
        }
    }
}

impl FixtureSettings {
    pub fn layout(&self) -> FixtureLayout {
        FixtureLayout {
            good_dir: self.good_dir.clone(),
            bad_dir: self.bad_dir.clone(),
            extension: self.extension.clone(),
        }
    }
}

/// Load settings from an explicit file, or fall back to defaults.
pub fn load_settings(path: Option<&Path>) -> ConfigResult<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}

/// Effective settings as TOML.
pub fn render_settings(settings: &Settings) -> ConfigResult<String> {
    Ok(toml::to_string_pretty(settings)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[report]
format = "md"

[contract]
list_keys = ["expect"]
"#,
        )
        .expect("parse settings");

        assert_eq!(settings.report.format, OutputFormat::Md);
        assert_eq!(settings.report.detail_limit, DEFAULT_DETAIL_LIMIT);
        assert_eq!(settings.contract.section_key, "contract");
        assert_eq!(settings.contract.list_keys, vec!["expect"]);
        assert_eq!(settings.step_summary.env_var, "GITHUB_STEP_SUMMARY");
        assert_eq!(settings.fixtures.layout(), FixtureLayout::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<Settings>("[report]\nformats = \"md\"\n");
        assert!(err.is_err());
    }

    #[test]
    fn rendered_settings_round_trip() {
        let settings = Settings::default();
        let text = render_settings(&settings).expect("render settings");
        let back: Settings = toml::from_str(&text).expect("parse rendered settings");
        assert_eq!(back, settings);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "specgate_missing_config_{}.toml",
            uuid::Uuid::new_v4()
        ));
        let err = load_settings(Some(&path)).expect_err("missing config");
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
