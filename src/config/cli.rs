use crate::adapters::amadeus::TEST_BASE_URL;
use crate::adapters::whatsapp::{DEFAULT_API_URL, DEFAULT_VERIFY_TOKEN};
use crate::config::toml_config::TomlConfig;
use crate::domain::ports::{AmadeusCredentials, ConfigProvider, WhatsAppSettings};
use crate::utils::error::{Result, TravelError};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "travel-widgets")]
#[command(about = "Luxury travel deal widgets over HTTP, MCP and WhatsApp")]
pub struct CliConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// TOML file; when set it replaces every other option except logging.
    #[arg(long, env = "TRAVEL_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "AMADEUS_API_KEY")]
    pub amadeus_api_key: Option<String>,

    #[arg(long, env = "AMADEUS_API_SECRET")]
    pub amadeus_api_secret: Option<String>,

    #[arg(long, env = "AMADEUS_BASE_URL", default_value = TEST_BASE_URL)]
    pub amadeus_base_url: String,

    /// Base URL of the web app serving curated hotels.
    #[arg(long, env = "API_BASE_URL", default_value = "http://localhost:3000")]
    pub api_base_url: String,

    #[arg(long, env = "MERGE_CURATED", help = "Merge curated hotels into searches")]
    pub merge_curated: bool,

    #[arg(long, env = "WHATSAPP_ACCESS_TOKEN")]
    pub whatsapp_access_token: Option<String>,

    #[arg(long, env = "WHATSAPP_PHONE_NUMBER_ID")]
    pub whatsapp_phone_number_id: Option<String>,

    #[arg(long, env = "WHATSAPP_BUSINESS_ACCOUNT_ID")]
    pub whatsapp_business_account_id: Option<String>,

    #[arg(long, env = "WHATSAPP_API_URL", default_value = DEFAULT_API_URL)]
    pub whatsapp_api_url: String,

    #[arg(long, env = "WHATSAPP_VERIFY_TOKEN", default_value = DEFAULT_VERIFY_TOKEN)]
    pub whatsapp_verify_token: String,

    #[arg(long, env = "WHATSAPP_APP_SECRET")]
    pub whatsapp_app_secret: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, env = "LOG_JSON", help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// Effective configuration: the TOML file when `--config` is given, otherwise these flags.
    pub fn resolve(&self) -> Result<Box<dyn ConfigProvider>> {
        match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Ok(Box::new(config))
            }
            None => {
                self.validate()?;
                Ok(Box::new(self.clone()))
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn amadeus(&self) -> Option<AmadeusCredentials> {
        match (
            non_empty(&self.amadeus_api_key),
            non_empty(&self.amadeus_api_secret),
        ) {
            (Some(api_key), Some(api_secret)) => Some(AmadeusCredentials {
                api_key,
                api_secret,
                base_url: self.amadeus_base_url.clone(),
            }),
            _ => None,
        }
    }

    fn curated_api_url(&self) -> &str {
        &self.api_base_url
    }

    fn merge_curated(&self) -> bool {
        self.merge_curated
    }

    fn whatsapp(&self) -> WhatsAppSettings {
        WhatsAppSettings {
            access_token: non_empty(&self.whatsapp_access_token),
            phone_number_id: non_empty(&self.whatsapp_phone_number_id),
            business_account_id: non_empty(&self.whatsapp_business_account_id),
            api_url: self.whatsapp_api_url.clone(),
            verify_token: self.whatsapp_verify_token.clone(),
            app_secret: non_empty(&self.whatsapp_app_secret),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        if self.port == 0 {
            return Err(TravelError::InvalidConfigValueError {
                field: "port".to_string(),
                value: "0".to_string(),
                reason: "Port must be between 1 and 65535".to_string(),
            });
        }
        validation::validate_url("amadeus_base_url", &self.amadeus_base_url)?;
        validation::validate_url("api_base_url", &self.api_base_url)?;
        validation::validate_url("whatsapp_api_url", &self.whatsapp_api_url)?;

        // A lone key or secret is almost always a typo in the environment.
        match (
            non_empty(&self.amadeus_api_key),
            non_empty(&self.amadeus_api_secret),
        ) {
            (Some(_), None) => Err(TravelError::MissingConfigError {
                field: "amadeus_api_secret".to_string(),
            }),
            (None, Some(_)) => Err(TravelError::MissingConfigError {
                field: "amadeus_api_key".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["travel-widgets"];
        argv.extend_from_slice(args);
        CliConfig::parse_from(argv)
    }

    #[test]
    fn amadeus_requires_both_halves() {
        let config = parse(&["--amadeus-api-key", "key"]);
        assert!(config.amadeus().is_none());
        assert!(matches!(
            config.validate(),
            Err(TravelError::MissingConfigError { .. })
        ));

        let config = parse(&["--amadeus-api-key", "key", "--amadeus-api-secret", "secret"]);
        let creds = config.amadeus().unwrap();
        assert_eq!(creds.api_key, "key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bind_address_and_whatsapp_settings() {
        let config = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "9100",
            "--whatsapp-access-token",
            "",
            "--whatsapp-app-secret",
            "shh",
        ]);
        assert_eq!(config.bind_address(), "127.0.0.1:9100");

        let settings = config.whatsapp();
        assert!(settings.access_token.is_none());
        assert_eq!(settings.app_secret.as_deref(), Some("shh"));
    }

    #[test]
    fn rejects_bad_urls() {
        let config = parse(&["--api-base-url", "not a url"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_file_takes_over() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[server]\nport = 8200\n").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = parse(&["--port", "9100", "--config", &path]);
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.bind_address(), "0.0.0.0:8200");

        let config = parse(&["--port", "9100"]);
        assert_eq!(config.resolve().unwrap().bind_address(), "0.0.0.0:9100");
    }
}
