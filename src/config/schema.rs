use crate::error::ConfigError;
use crate::providers::ProviderKind;
use crate::usage::{ModelPricing, default_pricing};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Chat backend: openai, mistral, groq, claude or ollama.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model name; the provider's default when unset.
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Endpoint override (remote Ollama, proxy, self-hosted gateway).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Directory receiving `user_stories_*.md`. `~` is expanded.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Extra or replacement pricing entries, matched by model substring.
    #[serde(default)]
    pub pricing: Vec<ModelPricing>,
}

fn default_provider() -> String {
    ProviderKind::default().to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_output_dir() -> String {
    ".".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            provider: default_provider(),
            model: None,
            api_key: None,
            temperature: default_temperature(),
            base_url: None,
            output_dir: default_output_dir(),
            pricing: Vec::new(),
        }
    }
}

impl Config {
    pub fn provider_kind(&self) -> Result<ProviderKind, ConfigError> {
        ProviderKind::parse(&self.provider)
    }

    /// Configured model, or the provider default.
    pub fn resolved_model(&self, kind: ProviderKind) -> String {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| kind.default_model())
            .to_string()
    }

    pub fn output_dir_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output_dir).as_ref())
    }

    /// Built-in pricing with configured entries layered on top; an entry with
    /// the same pattern as a built-in one replaces it.
    pub fn pricing_table(&self) -> Vec<ModelPricing> {
        let mut table: Vec<ModelPricing> = default_pricing()
            .into_iter()
            .filter(|builtin| {
                !self
                    .pricing
                    .iter()
                    .any(|custom| custom.model_pattern == builtin.model_pattern)
            })
            .collect();
        table.extend(self.pricing.iter().cloned());
        table
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.provider_kind()?;

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Validation(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }

        if self.output_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }

        if let Some(bad) = self.pricing.iter().find(|p| {
            p.model_pattern.trim().is_empty()
                || p.input_cost_per_million < 0.0
                || p.output_cost_per_million < 0.0
        }) {
            return Err(ConfigError::Validation(format!(
                "invalid pricing entry for pattern {:?}",
                bad.model_pattern
            )));
        }

        Ok(())
    }
}
