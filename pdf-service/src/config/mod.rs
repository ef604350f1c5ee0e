use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub converter: ConverterConfig,
    pub limits: LimitsConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    pub wkhtmltopdf_path: String,
    pub timeout_secs: Option<u64>,
    /// Run at most one conversion at a time.
    pub serialize: bool,
}

impl ConverterConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwaggerConfig {
    pub enabled: bool,
}

const DEFAULT_MAX_UPLOAD_BYTES: &str = "20971520";

impl PdfConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        Ok(PdfConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("pdf-service"))?,
            log_level: get_env("LOG_LEVEL", Some("info"))?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|v| !v.is_empty()),
            converter: ConverterConfig {
                wkhtmltopdf_path: get_env("WKHTMLTOPDF_PATH", Some("wkhtmltopdf"))?,
                timeout_secs: env::var("CONVERTER_TIMEOUT_SECS")
                    .ok()
                    .map(|v| parse_value("CONVERTER_TIMEOUT_SECS", &v))
                    .transpose()?,
                serialize: parse_value(
                    "CONVERTER_SERIALIZE",
                    &get_env("CONVERTER_SERIALIZE", Some("true"))?,
                )?,
            },
            limits: LimitsConfig {
                max_upload_bytes: parse_value(
                    "MAX_UPLOAD_BYTES",
                    &get_env("MAX_UPLOAD_BYTES", Some(DEFAULT_MAX_UPLOAD_BYTES))?,
                )?,
            },
            swagger: SwaggerConfig {
                enabled: parse_value(
                    "SWAGGER_ENABLED",
                    &get_env("SWAGGER_ENABLED", Some(if is_prod { "false" } else { "true" }))?,
                )?,
            },
        })
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e))
    })
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
