use crate::adapters::amadeus::TEST_BASE_URL;
use crate::adapters::whatsapp::{DEFAULT_API_URL, DEFAULT_VERIFY_TOKEN};
use crate::domain::ports::{AmadeusCredentials, ConfigProvider, WhatsAppSettings};
use crate::utils::error::{Result, TravelError};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").ok());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub amadeus: Option<AmadeusConfig>,
    #[serde(default)]
    pub curated: CuratedConfig,
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmadeusConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    #[serde(default = "default_amadeus_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratedConfig {
    #[serde(default = "default_curated_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub merge: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    pub access_token: Option<String>,
    pub phone_number_id: Option<String>,
    pub business_account_id: Option<String>,
    #[serde(default = "default_whatsapp_url")]
    pub api_url: String,
    #[serde(default = "default_verify_token")]
    pub verify_token: String,
    pub app_secret: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_amadeus_url() -> String {
    TEST_BASE_URL.to_string()
}

fn default_curated_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_whatsapp_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_verify_token() -> String {
    DEFAULT_VERIFY_TOKEN.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CuratedConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_curated_url(),
            merge: false,
        }
    }
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            phone_number_id: None,
            business_account_id: None,
            api_url: default_whatsapp_url(),
            verify_token: default_verify_token(),
            app_secret: None,
        }
    }
}

/// Empty strings and unresolved `${VAR}` placeholders count as unset.
fn resolved(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && !(v.starts_with("${") && v.ends_with('}')))
        .map(str::to_string)
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TravelError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TravelError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = ENV_VAR.as_ref().ok_or_else(|| TravelError::ConfigError {
            message: "invalid environment substitution pattern".to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        if self.server.port == 0 {
            return Err(TravelError::InvalidConfigValueError {
                field: "server.port".to_string(),
                value: "0".to_string(),
                reason: "Port must be between 1 and 65535".to_string(),
            });
        }

        if let Some(amadeus) = &self.amadeus {
            validation::validate_url("amadeus.base_url", &amadeus.base_url)?;
            if resolved(&amadeus.api_key).is_some() != resolved(&amadeus.api_secret).is_some() {
                return Err(TravelError::ConfigValidationError {
                    field: "amadeus".to_string(),
                    message: "api_key and api_secret must be set together".to_string(),
                });
            }
        }

        validation::validate_url("curated.api_base_url", &self.curated.api_base_url)?;
        validation::validate_url("whatsapp.api_url", &self.whatsapp.api_url)?;
        validation::validate_non_empty_string("whatsapp.verify_token", &self.whatsapp.verify_token)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn amadeus(&self) -> Option<AmadeusCredentials> {
        let amadeus = self.amadeus.as_ref()?;
        Some(AmadeusCredentials {
            api_key: resolved(&amadeus.api_key)?,
            api_secret: resolved(&amadeus.api_secret)?,
            base_url: amadeus.base_url.clone(),
        })
    }

    fn curated_api_url(&self) -> &str {
        &self.curated.api_base_url
    }

    fn merge_curated(&self) -> bool {
        self.curated.merge
    }

    fn whatsapp(&self) -> WhatsAppSettings {
        WhatsAppSettings {
            access_token: resolved(&self.whatsapp.access_token),
            phone_number_id: resolved(&self.whatsapp.phone_number_id),
            business_account_id: resolved(&self.whatsapp.business_account_id),
            api_url: self.whatsapp.api_url.clone(),
            verify_token: self.whatsapp.verify_token.clone(),
            app_secret: resolved(&self.whatsapp.app_secret),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
