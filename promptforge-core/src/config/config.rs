use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use promptforge_llm::LlmClient;

use crate::composer::ComposerError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider: String,
    pub env_vars: HashMap<String, String>,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    pub providers: Vec<ProviderConfig>,
    pub selected_provider: usize,
}

impl ForgeConfig {
    pub fn add_provider(&mut self, provider: String, env_vars: HashMap<String, String>, model: String) -> usize {
        self.providers.push(ProviderConfig {
            provider,
            env_vars,
            model,
        });
        self.providers.len() - 1
    }

    pub fn get_selected_provider(&self) -> Option<&ProviderConfig> {
        self.providers.get(self.selected_provider)
    }

    pub fn set_selected_provider(&mut self, index: usize) -> Result<(), String> {
        if index < self.providers.len() {
            self.selected_provider = index;
            Ok(())
        } else {
            Err(format!("Provider index {} out of bounds (have {} providers)", index, self.providers.len()))
        }
    }

    pub fn config_path() -> Result<PathBuf, ComposerError> {
        let home = dirs::home_dir()
            .ok_or_else(|| ComposerError::Configuration("could not find home directory".to_string()))?;
        Ok(home.join(".promptforge.config"))
    }

    pub fn load() -> Result<ForgeConfig, ComposerError> {
        Self::load_from(&Self::config_path()?)
    }

    pub(crate) fn load_from(path: &Path) -> Result<ForgeConfig, ComposerError> {
        if !path.exists() {
            return Err(ComposerError::Configuration("config file does not exist".to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ComposerError::Configuration(e.to_string()))?;
        let mut config: ForgeConfig = serde_json::from_str(&content)
            .map_err(|e| ComposerError::Configuration(e.to_string()))?;

        // Validate selected_provider index
        if config.selected_provider >= config.providers.len() {
            config.selected_provider = 0;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ComposerError> {
        self.save_to(&Self::config_path()?)
    }

    pub(crate) fn save_to(&self, path: &Path) -> Result<(), ComposerError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ComposerError::Configuration(e.to_string()))?;
        fs::write(path, content)
            .map_err(|e| ComposerError::Configuration(e.to_string()))?;
        Ok(())
    }

    pub fn exists() -> bool {
        Self::config_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Set environment variables from the currently selected provider
    pub fn set_env_vars(&self) {
        if let Some(provider_config) = self.get_selected_provider() {
            for (name, value) in &provider_config.env_vars {
                std::env::set_var(name, value);
            }
            std::env::set_var("PROMPTFORGE_MODEL", &provider_config.model);
            std::env::set_var("PROMPTFORGE_PROVIDER", &provider_config.provider);
        }
    }
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            // default to Gemini with the key taken from the process environment
            providers: vec![ProviderConfig {
                provider: "gemini".to_string(),
                env_vars: HashMap::new(),
                model: DEFAULT_MODEL.to_string(),
            }],
            selected_provider: 0,
        }
    }
}

impl ForgeConfig {
    /// Build the LLM client the composer is constructed with. A missing
    /// credential is fatal here, before any UI comes up.
    pub async fn get_llm() -> Result<(LlmClient, String), ComposerError> {
        let llm = if Self::exists() {
            let config = Self::load()?;
            config.set_env_vars();

            let provider_config = config.get_selected_provider()
                .ok_or_else(|| ComposerError::Configuration("no provider configured".to_string()))?;
            LlmClient::create_provider(&provider_config.provider, &provider_config.env_vars)
                .map_err(|e| ComposerError::Configuration(
                    format!("failed to create {} client: {}", provider_config.provider, e)))?
        } else {
            LlmClient::first_from_env()
                .ok_or_else(|| ComposerError::Configuration(
                    "no API credential found, set GEMINI_API_KEY (or OPENAI_API_KEY, OPENAI_COMPATIBLE_API_KEY, OLLAMA_BASE_URL)".to_string()))?
        };

        let model = llm.default_model().await
            .map_err(|e| ComposerError::Configuration(format!("no model available: {}", e)))?;

        Ok((llm, model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promptforge.config");

        let mut config = ForgeConfig::default();
        config.add_provider(
            "openai".to_string(),
            HashMap::from([("OPENAI_API_KEY".to_string(), "sk-test".to_string())]),
            "gpt-4o".to_string(),
        );
        config.set_selected_provider(1).unwrap();
        config.save_to(&path).unwrap();

        let loaded = ForgeConfig::load_from(&path).unwrap();

        assert_eq!(loaded.providers.len(), 2);
        assert_eq!(loaded.selected_provider, 1);
        let selected = loaded.get_selected_provider().unwrap();
        assert_eq!(selected.provider, "openai");
        assert_eq!(selected.model, "gpt-4o");
    }

    #[test]
    fn test_out_of_bounds_selection_resets_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("promptforge.config");

        let mut config = ForgeConfig::default();
        config.selected_provider = 7;
        config.save_to(&path).unwrap();

        let loaded = ForgeConfig::load_from(&path).unwrap();
        assert_eq!(loaded.selected_provider, 0);
    }

    #[test]
    fn test_selecting_missing_provider_fails() {
        let mut config = ForgeConfig::default();
        assert!(config.set_selected_provider(3).is_err());
    }

    #[test]
    fn test_default_config_pins_gemini() {
        let config = ForgeConfig::default();
        let selected = config.get_selected_provider().unwrap();
        assert_eq!(selected.provider, "gemini");
        assert_eq!(selected.model, DEFAULT_MODEL);
    }
}
