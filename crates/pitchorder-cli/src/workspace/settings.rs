use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use pitchorder_draw::{DEFAULT_MAX_ATTEMPTS, DrawOptions};

use super::atomic::write_bytes_atomic;
use super::{WorkspacePaths, WorkspaceResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    /// Randomized attempts before the deterministic fallback.
    pub max_attempts: u32,
    /// Fixed seed for reproducible draws.
    pub seed: Option<u64>,
    /// Where `export` writes CSV files, relative to the workspace root.
    pub export_dir: PathBuf,
    /// Partner names offered by `partner presets`.
    pub partner_presets: Vec<String>,
}

const DEFAULT_PARTNER_PRESETS: &[&str] = &[
    "Альфа-Банк",
    "НСПК",
    "Центр-инвест",
    "Московская Биржа",
    "Т-Банк",
    "ВТБ",
    "ИТ Холдинг Т1",
    "Газпромбанк.Тех",
    "Робокасса",
];

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            export_dir: PathBuf::from("out"),
            partner_presets: DEFAULT_PARTNER_PRESETS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl WorkspaceSettings {
    /// Draw options from settings, with command-line overrides applied.
    pub fn draw_options(&self, seed: Option<u64>, max_attempts: Option<u32>) -> DrawOptions {
        DrawOptions {
            max_attempts: max_attempts.unwrap_or(self.max_attempts),
            seed: seed.or(self.seed),
        }
    }
}

pub fn load_or_create_settings(paths: &WorkspacePaths) -> WorkspaceResult<WorkspaceSettings> {
    let path = paths.settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        let settings: WorkspaceSettings = toml::from_str(&content)?;
        return Ok(settings);
    }

    let settings = WorkspaceSettings::default();
    save_settings(paths, &settings)?;
    Ok(settings)
}

pub fn save_settings(paths: &WorkspacePaths, settings: &WorkspaceSettings) -> WorkspaceResult<()> {
    let path = paths.settings_path();
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(&path, encoded.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let settings: WorkspaceSettings = toml::from_str("seed = 9\n").expect("parse settings");
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(settings.export_dir, PathBuf::from("out"));
        assert_eq!(settings.partner_presets.len(), DEFAULT_PARTNER_PRESETS.len());
    }

    #[test]
    fn presets_can_be_replaced() {
        let settings: WorkspaceSettings = toml::from_str("partner_presets = [\"Acme\", \"Globex\"]\n")
            .expect("parse settings");
        assert_eq!(settings.partner_presets, vec!["Acme", "Globex"]);

        let encoded = toml::to_string_pretty(&settings).expect("encode settings");
        let back: WorkspaceSettings = toml::from_str(&encoded).expect("decode settings");
        assert_eq!(back, settings);
    }

    #[test]
    fn flags_override_settings() {
        let settings = WorkspaceSettings {
            max_attempts: 10,
            seed: Some(1),
            ..WorkspaceSettings::default()
        };
        let options = settings.draw_options(Some(5), None);
        assert_eq!(options.seed, Some(5));
        assert_eq!(options.max_attempts, 10);

        let options = settings.draw_options(None, Some(0));
        assert_eq!(options.seed, Some(1));
        assert_eq!(options.max_attempts, 0);
    }
}
