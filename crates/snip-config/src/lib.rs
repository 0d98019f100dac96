//! Configuration management for snipdocs.
//!
//! Parses `snip.toml` with serde and discovers it in the current directory or
//! any parent. Every key is optional; a missing file yields the defaults.
//!
//! CLI settings are applied on top of the loaded file via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` expands to the value of VAR and errors if unset
//! - `${VAR:-default}` falls back to `default`
//!
//! Expanded fields: `site.title`, `build.output_dir`, `build.runtime_dir`.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use snip_outline::{DEFAULT_FOCUS_BOTTOM, DEFAULT_FOCUS_TOP, FocusBand};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "snip.toml";

/// Upper bound for the copy acknowledgment.
const MAX_FEEDBACK_MS: u64 = 10_000;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the site title.
    pub title: Option<String>,
    /// Override whether the runtime script tag is emitted.
    pub script: Option<bool>,
    /// Override the directory holding the prebuilt browser runtime.
    pub runtime_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(rename = "build")]
    build_raw: BuildConfigRaw,
    pub outline: OutlineConfig,
    pub copy: CopyConfig,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build: BuildConfig,
    /// Path to the config file, if one was loaded.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title shown in the top bar and the `<title>` element.
    pub title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "NEW.JS".to_owned(),
        }
    }
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
    script: Option<bool>,
    runtime_dir: Option<String>,
}

/// Resolved build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Directory receiving the static site.
    pub output_dir: PathBuf,
    /// Emit the `<script>` tag loading the browser runtime.
    pub script: bool,
    /// `wasm-bindgen --target web` output copied into the site's assets.
    pub runtime_dir: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            script: true,
            runtime_dir: None,
        }
    }
}

/// Outline focus band and scroll-spy behavior.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Fraction of the viewport excluded from the top.
    pub focus_top: f64,
    /// Fraction of the viewport excluded from the bottom.
    pub focus_bottom: f64,
    /// Keep the last active entry when no heading is in the band.
    pub sticky_active: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            focus_top: DEFAULT_FOCUS_TOP,
            focus_bottom: DEFAULT_FOCUS_BOTTOM,
            sticky_active: false,
        }
    }
}

impl OutlineConfig {
    /// The configured band.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the fractions leave no band.
    pub fn band(&self) -> Result<FocusBand, ConfigError> {
        FocusBand::new(self.focus_top, self.focus_bottom)
            .map_err(|e| ConfigError::Validation(format!("outline: {e}")))
    }
}

/// Copy-button feedback.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// How long the "copied" acknowledgment stays visible.
    pub feedback_ms: u64,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self { feedback_ms: 1200 }
    }
}

impl CopyConfig {
    #[must_use]
    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.title`").
        field: String,
        /// Error message (e.g., "${`SITE_TITLE`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `snip.toml` in the current directory and its parents, falling back
    /// to defaults when none is found.
    ///
    /// CLI settings are applied after loading and re-validated.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, or if
    /// reading, parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.build.output_dir.clone_from(output_dir);
        }
        if let Some(title) = &settings.title {
            self.site.title.clone_from(title);
        }
        if let Some(script) = settings.script {
            self.build.script = script;
        }
        if let Some(runtime_dir) = &settings.runtime_dir {
            self.build.runtime_dir = Some(runtime_dir.clone());
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        self.outline.band()?;
        self.validate_copy()?;
        Ok(())
    }

    fn validate_copy(&self) -> Result<(), ConfigError> {
        let ms = self.copy.feedback_ms;
        if ms == 0 {
            return Err(ConfigError::Validation(
                "copy.feedback_ms must be greater than 0".to_owned(),
            ));
        }
        if ms > MAX_FEEDBACK_MS {
            return Err(ConfigError::Validation(format!(
                "copy.feedback_ms cannot exceed {MAX_FEEDBACK_MS}"
            )));
        }
        Ok(())
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_from(&cwd)
    }

    /// Search for the config file starting at `start` and walking up.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Default config with the output directory under `base`.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            build_raw: BuildConfigRaw::default(),
            outline: OutlineConfig::default(),
            copy: CopyConfig::default(),
            build: BuildConfig {
                output_dir: base.join("dist"),
                script: true,
                runtime_dir: None,
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        if let Some(ref dir) = self.build_raw.output_dir {
            self.build_raw.output_dir = Some(expand::expand_env(dir, "build.output_dir")?);
        }
        if let Some(ref dir) = self.build_raw.runtime_dir {
            self.build_raw.runtime_dir = Some(expand::expand_env(dir, "build.runtime_dir")?);
        }
        Ok(())
    }

    /// Resolve build paths relative to the config file.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.build = BuildConfig {
            output_dir: config_dir.join(self.build_raw.output_dir.as_deref().unwrap_or("dist")),
            script: self.build_raw.script.unwrap_or(true),
            runtime_dir: self.build_raw.runtime_dir.as_deref().map(|dir| config_dir.join(dir)),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(config.site.title, "NEW.JS");
        assert_eq!(config.build.output_dir, PathBuf::from("/site/dist"));
        assert!(config.build.script);
        assert!(!config.outline.sticky_active);
        assert_eq!(config.copy.feedback(), Duration::from_millis(1200));
        assert_eq!(
            config.outline.band().unwrap().root_margin(),
            "-40% 0px -55% 0px"
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
title = "Stack Notes"

[build]
output_dir = "public"
script = false
runtime_dir = "pkg"

[outline]
focus_top = 0.2
focus_bottom = 0.6
sticky_active = true

[copy]
feedback_ms = 2000
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.title, "Stack Notes");
        assert_eq!(config.build.output_dir, PathBuf::from("/project/public"));
        assert!(!config.build.script);
        assert_eq!(config.build.runtime_dir, Some(PathBuf::from("/project/pkg")));
        assert!(config.outline.sticky_active);
        assert_eq!(config.outline.band().unwrap().root_margin(), "-20% 0px -60% 0px");
        assert_eq!(config.copy.feedback_ms, 2000);
    }

    #[test]
    fn test_parse_empty_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.site.title, "NEW.JS");
        assert_eq!(config.build.output_dir, PathBuf::from("/project/dist"));
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut config = Config::default();
        config.site.title = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_validate_rejects_empty_band() {
        let mut config = Config::default();
        config.outline.focus_top = 0.5;
        config.outline.focus_bottom = 0.5;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_feedback_bounds() {
        let mut config = Config::default();
        config.copy.feedback_ms = 0;
        assert!(config.validate().is_err());
        config.copy.feedback_ms = 10_001;
        assert!(config.validate().unwrap_err().to_string().contains("10000"));
        config.copy.feedback_ms = 10_000;
        config.validate().unwrap();
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            dir.path(),
            "[site]\ntitle = \"Guides\"\n[build]\noutput_dir = \"out\"\n",
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.title, "Guides");
        assert_eq!(config.build.output_dir, dir.path().join("out"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[site\ntitle = 1");
        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[outline]\nfocus_top = 1.5\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("top"));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[site]\ntitle = \"From file\"\n");
        let settings = CliSettings {
            output_dir: Some(PathBuf::from("/tmp/site")),
            title: Some("From CLI".to_owned()),
            script: Some(false),
            runtime_dir: Some(PathBuf::from("/tmp/pkg")),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.site.title, "From CLI");
        assert_eq!(config.build.output_dir, PathBuf::from("/tmp/site"));
        assert!(!config.build.script);
        assert_eq!(config.build.runtime_dir, Some(PathBuf::from("/tmp/pkg")));
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "");
        let settings = CliSettings {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(Config::load(Some(&path), Some(&settings)).is_err());
    }

    #[test]
    fn test_empty_cli_settings_change_nothing() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.site.title, "NEW.JS");
        assert_eq!(config.build, BuildConfig {
            output_dir: PathBuf::from("/site/dist"),
            script: true,
            runtime_dir: None,
        });
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SNIP_TEST_TITLE", "Env Title");
            std::env::remove_var("SNIP_TEST_OUT_UNSET");
        }
        let toml = r#"
[site]
title = "${SNIP_TEST_TITLE}"
[build]
output_dir = "${SNIP_TEST_OUT_UNSET:-build/site}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.title, "Env Title");
        assert_eq!(config.build.output_dir, PathBuf::from("/project/build/site"));
        unsafe {
            std::env::remove_var("SNIP_TEST_TITLE");
        }
    }
}
