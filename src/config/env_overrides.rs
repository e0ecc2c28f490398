use super::Config;

impl Config {
    /// `STORYSMITH_API_KEY` is not read here: it is the last fallback of
    /// `providers::resolve_api_key`, after the provider's own variable.
    pub fn apply_env_overrides(&mut self) {
        // BOT_PROVIDER is the variable earlier releases of the tool read.
        if let Ok(provider) =
            std::env::var("STORYSMITH_PROVIDER").or_else(|_| std::env::var("BOT_PROVIDER"))
            && !provider.trim().is_empty()
        {
            self.provider = provider.trim().to_string();
        }

        if let Ok(model) = std::env::var("STORYSMITH_MODEL")
            && !model.trim().is_empty()
        {
            self.model = Some(model.trim().to_string());
        }

        if let Ok(base_url) = std::env::var("STORYSMITH_BASE_URL")
            && !base_url.trim().is_empty()
        {
            self.base_url = Some(base_url.trim().to_string());
        }

        if let Ok(output_dir) = std::env::var("STORYSMITH_OUTPUT_DIR")
            && !output_dir.trim().is_empty()
        {
            self.output_dir = output_dir;
        }

        if let Ok(temp_str) = std::env::var("STORYSMITH_TEMPERATURE") {
            match temp_str.trim().parse::<f64>() {
                Ok(temp) if (0.0..=2.0).contains(&temp) => self.temperature = temp,
                _ => tracing::warn!(
                    value = temp_str.as_str(),
                    "Ignoring STORYSMITH_TEMPERATURE outside 0.0..=2.0"
                ),
            }
        }
    }
}
