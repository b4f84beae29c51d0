use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{GenerationSettings, PromptProfile};
use crate::infrastructure::observability::TracingConfig;

use super::Environment;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Conventional variable names that override the layered configuration.
const ENV_OVERRIDES: [(&str, &str); 6] = [
    ("AZURE_OPENAI_ENDPOINT", "azure_openai.endpoint"),
    ("AZURE_OPENAI_KEY", "azure_openai.api_key"),
    ("AZURE_OPENAI_VERSION", "azure_openai.api_version"),
    ("AZURE_OPENAI_DEPLOYMENT", "azure_openai.deployment"),
    ("PORT", "server.port"),
    ("DEBUG", "debug"),
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub azure_openai: AzureOpenAiSettings,
    pub analysis: AnalysisSettings,
    pub logging: LoggingSettings,
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_size_mb: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_size_mb: 16,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AzureOpenAiSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_version: String,
    pub deployment: String,
    pub request_timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AzureOpenAiSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_version: "2024-02-01".to_string(),
            deployment: "gpt-4".to_string(),
            request_timeout_secs: 300,
            max_tokens: 4000,
            temperature: 0.05,
        }
    }
}

impl std::fmt::Debug for AzureOpenAiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAiSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Everything needed to reach one Azure OpenAI deployment.
#[derive(Clone)]
pub struct AzureCredentials {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl AzureOpenAiSettings {
    /// Endpoint and key, if both are set and non-blank.
    pub fn credentials(&self) -> Option<AzureCredentials> {
        let endpoint = non_blank(self.endpoint.as_deref())?;
        let api_key = non_blank(self.api_key.as_deref())?;

        Some(AzureCredentials {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            deployment: self.deployment.clone(),
            api_version: self.api_version.clone(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn generation(&self) -> GenerationSettings {
        GenerationSettings {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    pub fn api_key_length(&self) -> usize {
        non_blank(self.api_key.as_deref()).map_or(0, |key| key.chars().count())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub organisation: String,
    pub sector: String,
    pub language: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let profile = PromptProfile::default();
        Self {
            organisation: profile.organisation,
            sector: profile.sector,
            language: profile.language,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Layers `appsettings.toml`, `appsettings.{env}.toml`, `APP_*` variables and the
    /// conventional Azure/`PORT`/`DEBUG` variables over the built-in defaults.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name(&environment.config_file_name()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        for (variable, key) in ENV_OVERRIDES {
            let value = std::env::var(variable)
                .ok()
                .filter(|value| !value.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.server.max_upload_size_mb.saturating_mul(BYTES_PER_MB)
    }

    pub fn profile(&self) -> PromptProfile {
        PromptProfile {
            organisation: self.analysis.organisation.clone(),
            sector: self.analysis.sector.clone(),
            language: self.analysis.language.clone(),
        }
    }

    pub fn tracing(&self, environment: Environment) -> TracingConfig {
        let level = if self.debug {
            "debug".to_string()
        } else {
            self.logging.level.clone()
        };

        TracingConfig {
            environment: environment.to_string(),
            level,
            json_format: self.logging.enable_json,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
