/// Configuration management for image-variant-service
///
/// Loads configuration from environment variables with sensible defaults.
/// Everything here is fixed at deploy time and lives for the whole process.
use crate::error::ConfigError;
use std::collections::BTreeSet;
use std::time::Duration;

pub const DEFAULT_ALLOWED_SIZES: &str = "300,600,1200";
pub const DEFAULT_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
const DEFAULT_JPEG_QUALITY: u8 = 85;
const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 5000;

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppConfig,
    pub s3: S3Config,
    pub variants: VariantConfig,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
}

#[derive(Clone, Debug)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub endpoint: Option<String>,
    pub force_path_style: bool,
}

#[derive(Clone, Debug)]
pub struct VariantConfig {
    /// Sizes (short side, in pixels) a request may ask for
    pub allowed_sizes: BTreeSet<u32>,
    /// Cache-Control stored alongside every variant
    pub cache_control: String,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    pub resolve_timeout_ms: u64,
}

impl VariantConfig {
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_millis(self.resolve_timeout_ms)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port_raw = var("VARIANT_SERVICE_PORT").unwrap_or_else(|| "8080".to_string());
        let port = port_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "VARIANT_SERVICE_PORT",
            value: port_raw.clone(),
        })?;

        let bucket = var("S3_BUCKET")
            .filter(|b| !b.trim().is_empty())
            .ok_or(ConfigError::Missing("S3_BUCKET"))?;

        let force_path_style = match var("S3_FORCE_PATH_STYLE") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "S3_FORCE_PATH_STYLE",
                value: raw,
            })?,
            None => false,
        };

        let allowed_sizes = parse_allowed_sizes(
            &var("VARIANT_ALLOWED_SIZES").unwrap_or_else(|| DEFAULT_ALLOWED_SIZES.to_string()),
        )?;

        let jpeg_quality = match var("VARIANT_JPEG_QUALITY") {
            Some(raw) => match raw.parse::<u8>() {
                Ok(q) if (1..=100).contains(&q) => q,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "VARIANT_JPEG_QUALITY",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_JPEG_QUALITY,
        };

        let resolve_timeout_ms = match var("VARIANT_RESOLVE_TIMEOUT_MS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "VARIANT_RESOLVE_TIMEOUT_MS",
                value: raw,
            })?,
            None => DEFAULT_RESOLVE_TIMEOUT_MS,
        };

        Ok(Config {
            app: AppConfig {
                host: var("VARIANT_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port,
                env: var("APP_ENV").unwrap_or_else(|| "development".to_string()),
            },
            s3: S3Config {
                bucket,
                region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id: var("AWS_ACCESS_KEY_ID"),
                secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
                endpoint: var("S3_ENDPOINT"),
                force_path_style,
            },
            variants: VariantConfig {
                allowed_sizes,
                cache_control: var("VARIANT_CACHE_CONTROL")
                    .unwrap_or_else(|| DEFAULT_CACHE_CONTROL.to_string()),
                jpeg_quality,
                resolve_timeout_ms,
            },
        })
    }
}

/// Parse a comma separated list of positive sizes, e.g. `300,600,1200`
pub fn parse_allowed_sizes(raw: &str) -> Result<BTreeSet<u32>, ConfigError> {
    let mut sizes = BTreeSet::new();
    for part in raw.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
        match part.parse::<u32>() {
            Ok(size) if size > 0 => {
                sizes.insert(size);
            }
            _ => {
                return Err(ConfigError::Invalid {
                    name: "VARIANT_ALLOWED_SIZES",
                    value: raw.to_string(),
                })
            }
        }
    }

    if sizes.is_empty() {
        return Err(ConfigError::Invalid {
            name: "VARIANT_ALLOWED_SIZES",
            value: raw.to_string(),
        });
    }

    Ok(sizes)
}
