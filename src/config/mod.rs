//! Configuration management.

use serde::Deserialize;

/// Main configuration for glas.
#[derive(Debug, Clone)]
pub struct GlasConfig {
    /// LLM capability configuration.
    pub llm: LlmConfig,
    /// Triage pipeline tuning.
    pub triage: TriageConfig,
}

/// LLM capability configuration.
///
/// The presence of `api_key` is what selects the LLM-primary triage
/// path; everything else has sensible defaults.
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    /// API key. `None` means the capability is unconfigured and triage
    /// runs rule-based only.
    pub api_key: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Endpoint override (for OpenAI-compatible self-hosted servers).
    pub endpoint: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Triage pipeline tuning.
#[derive(Debug, Clone, Copy)]
pub struct TriageConfig {
    /// Trailing window (days) for the duplicate-detection search space.
    pub recent_window_days: i64,
    /// Maximum number of recent appeals considered for duplicates.
    pub recent_limit: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 30,
            recent_limit: 10,
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// LLM section.
    pub llm: Option<ConfigFileLlm>,
    /// Triage section.
    pub triage: Option<ConfigFileTriage>,
}

/// LLM section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLlm {
    /// API key.
    pub api_key: Option<String>,
    /// Model name.
    pub model: Option<String>,
    /// Endpoint URL.
    pub endpoint: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

/// Triage section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileTriage {
    /// Trailing window in days.
    pub recent_window_days: Option<i64>,
    /// Recent appeals limit.
    pub recent_limit: Option<usize>,
}

impl Default for GlasConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                api_key: None,
                model: None,
                endpoint: None,
                temperature: 0.3,
            },
            triage: TriageConfig::default(),
        }
    }
}

impl GlasConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/glas/` on macOS)
    /// 2. XDG config dir (`~/.config/glas/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found. In all
    /// cases, environment overrides are applied afterwards.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default().with_env_overrides();
        };

        // Check platform-specific config dir first
        let platform_config = base_dirs.config_dir().join("glas").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config.with_env_overrides();
            }
        }

        // Fall back to XDG-style ~/.config/glas/ for Unix compatibility
        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("glas")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config.with_env_overrides();
            }
        }

        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    ///
    /// `OPENAI_API_KEY` enables the LLM-primary path; `GLAS_LLM_MODEL`
    /// and `GLAS_LLM_ENDPOINT` override the corresponding settings.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.apply_env_overrides(
            std::env::var("OPENAI_API_KEY").ok(),
            std::env::var("GLAS_LLM_MODEL").ok(),
            std::env::var("GLAS_LLM_ENDPOINT").ok(),
        )
    }

    /// Applies the override values read from the environment.
    ///
    /// An empty API key counts as unset: it must not enable the
    /// LLM-primary path.
    fn apply_env_overrides(
        mut self,
        api_key: Option<String>,
        model: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        if let Some(key) = api_key {
            if !key.is_empty() {
                self.llm.api_key = Some(key);
            }
        }
        if let Some(model) = model {
            self.llm.model = Some(model);
        }
        if let Some(endpoint) = endpoint {
            self.llm.endpoint = Some(endpoint);
        }
        self
    }

    /// Converts a `ConfigFile` to `GlasConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(llm) = file.llm {
            config.llm.api_key = llm.api_key;
            config.llm.model = llm.model;
            config.llm.endpoint = llm.endpoint;
            if let Some(temperature) = llm.temperature {
                config.llm.temperature = temperature;
            }
        }
        if let Some(triage) = file.triage {
            if let Some(days) = triage.recent_window_days {
                config.triage.recent_window_days = days;
            }
            if let Some(limit) = triage.recent_limit {
                config.triage.recent_limit = limit;
            }
        }

        config
    }

    /// Sets the LLM API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.llm.api_key = Some(key.into());
        self
    }
}
