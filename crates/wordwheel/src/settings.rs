use crate::candidate::Candidate;
use crate::config::{ConfigError, Radii, Thresholds, WheelConfig};
use crate::wheel::{Point, Size};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Surface-relative layout, turned into a [`WheelConfig`] once the surface
/// has been measured.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub inner_fraction: f64,
    pub outer_fraction: f64,
    pub dead_zone_fraction: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub activation_delay: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub hide_animation: Duration,
    pub thresholds: Thresholds,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            inner_fraction: 0.5,
            outer_fraction: 0.9,
            dead_zone_fraction: 0.15,
            activation_delay: Duration::from_millis(300),
            hide_animation: Duration::from_millis(150),
            thresholds: Thresholds::default(),
        }
    }
}

impl LayoutSettings {
    pub fn derive(&self, surface: Size) -> Result<WheelConfig, ConfigError> {
        let (hw, hh) = (surface.width / 2.0, surface.height / 2.0);
        let config = WheelConfig {
            center: Point::new(hw, hh),
            inner_radius: Radii::new(hw * self.inner_fraction, hh * self.inner_fraction),
            outer_radius: Radii::new(hw * self.outer_fraction, hh * self.outer_fraction),
            dead_zone: hw.min(hh) * self.dead_zone_fraction,
            activation_delay: self.activation_delay,
            hide_animation: self.hide_animation,
            thresholds: self.thresholds,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub words: Vec<String>,
}

impl Settings {
    /// Ranked list: explicit candidates first, then plain words.
    pub fn ranked_candidates(&self) -> Vec<Candidate> {
        self.candidates
            .iter()
            .cloned()
            .chain(self.words.iter().map(Candidate::word))
            .collect()
    }
}

pub fn get_settings_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "wordwheel", "wordwheel")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("settings.toml"))
}

pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&get_settings_path()?)
}

pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("WORDWHEEL")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Settings from `path` (or the default location), falling back to the
/// bundled defaults when nothing usable is found.
pub fn load_or_default(path: Option<&Path>) -> Settings {
    let loaded = match path {
        Some(p) => load_settings_from(p),
        None => load_settings(),
    };
    match loaded {
        Ok(s) => s,
        Err(e) => {
            log::error!("Failed to load settings, using defaults: {}", e);
            bundled_defaults()
        }
    }
}

pub fn bundled_defaults() -> Settings {
    config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_SETTINGS,
            config::FileFormat::Toml,
        ))
        .build()
        .and_then(|c| c.try_deserialize())
        .unwrap_or_else(|e| {
            log::error!("Bundled settings are invalid: {}", e);
            Settings::default()
        })
}

pub fn write_default_settings() -> Result<PathBuf, ConfigError> {
    let path = get_settings_path()?;
    write_default_settings_to(&path)?;
    Ok(path)
}

pub fn write_default_settings_to(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_SETTINGS)?;
    }
    Ok(())
}

pub const DEFAULT_SETTINGS: &str = include_str!("default_settings.toml");

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wordwheel-{}-{}", name, std::process::id()));
        let _ = fs_err::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_default_layout_matches_reference_wheel() {
        let config = LayoutSettings::default()
            .derive(Size::new(400.0, 400.0))
            .unwrap();
        assert_eq!(config, WheelConfig::default());
    }

    #[test]
    fn test_tall_surface_gives_elliptical_rings() {
        let config = LayoutSettings::default()
            .derive(Size::new(400.0, 800.0))
            .unwrap();
        assert_eq!(config.center, Point::new(200.0, 400.0));
        assert_eq!(config.inner_radius, Radii::new(100.0, 200.0));
        assert_eq!(config.outer_radius, Radii::new(180.0, 360.0));
        assert_eq!(config.dead_zone, 30.0);
    }

    #[test]
    fn test_derive_rejects_broken_fractions() {
        let layout = LayoutSettings {
            inner_fraction: 0.1,
            dead_zone_fraction: 0.2,
            ..LayoutSettings::default()
        };
        assert!(layout.derive(Size::new(400.0, 400.0)).is_err());
    }

    #[test]
    fn test_bundled_defaults_parse() {
        let settings = bundled_defaults();
        assert_eq!(settings.layout, LayoutSettings::default());
        let ranked = settings.ranked_candidates();
        assert_eq!(ranked.len(), 12);
        assert_eq!(ranked[0].text.as_str(), "yes");
    }

    #[test]
    fn test_explicit_candidates_rank_before_words() {
        let settings = Settings {
            candidates: vec![Candidate::new("g1", "hello", 0.8)],
            words: vec!["bye".to_string()],
            ..Settings::default()
        };
        let ranked = settings.ranked_candidates();
        assert_eq!(ranked[0].id.as_str(), "g1");
        assert_eq!(ranked[1].id.as_str(), "bye");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = scratch_dir("load");
        let path = dir.join("settings.toml");
        fs_err::create_dir_all(&dir).unwrap();
        fs_err::write(
            &path,
            r#"
words = ["tea", "coffee"]

[layout]
activation_delay = 450

[layout.thresholds]
collapse_distance = 60.0
"#,
        )
        .unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.layout.activation_delay, Duration::from_millis(450));
        assert_eq!(settings.layout.thresholds.collapse_distance, 60.0);
        assert_eq!(settings.layout.thresholds.band_offset, 40.0);
        assert_eq!(settings.layout.inner_fraction, 0.5);
        assert_eq!(settings.words, vec!["tea", "coffee"]);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = scratch_dir("missing");
        let settings = load_settings_from(&dir.join("settings.toml")).unwrap();
        assert!(settings.candidates.is_empty());
    }

    #[test]
    fn test_write_default_does_not_clobber() {
        let dir = scratch_dir("write");
        let path = dir.join("nested").join("settings.toml");
        write_default_settings_to(&path).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), DEFAULT_SETTINGS);

        fs_err::write(&path, "words = []").unwrap();
        write_default_settings_to(&path).unwrap();
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "words = []");
    }
}
