use serde::Deserialize;
use std::env;

pub const DEFAULT_JUPITER_API_BASE: &str = "https://api.jup.ag/ultra/v1";
pub const DEFAULT_CACHE_CONTROL: &str = "public, s-maxage=10, stale-while-revalidate=30";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub jupiter: JupiterConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JupiterConfig {
    /// Absent keys are tolerated at startup and reported per request.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: Option<u64>,
    /// Maximum number of search batches in flight for one request (default: 4)
    pub search_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
    /// `None` disables the header on token responses.
    pub cache_control: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()?,
            },
            jupiter: JupiterConfig {
                api_key: env::var("JUPITER_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                base_url: env::var("JUPITER_API_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| DEFAULT_JUPITER_API_BASE.to_string()),
                timeout_secs: env::var("JUPITER_TIMEOUT_SECS")
                    .ok()
                    .map(|secs| secs.parse())
                    .transpose()?,
                search_concurrency: env::var("JUPITER_SEARCH_CONCURRENCY")
                    .unwrap_or_else(|_| "4".to_string())
                    .parse::<usize>()?
                    .max(1),
            },
            http: HttpConfig {
                cors_allowed_origins: parse_origins(
                    &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
                ),
                cache_control: parse_cache_control(env::var("TOKENS_CACHE_CONTROL").ok()),
            },
            logging: LoggingConfig {
                format: parse_log_format(
                    &env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
                )?,
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_cache_control(raw: Option<String>) -> Option<String> {
    match raw {
        None => Some(DEFAULT_CACHE_CONTROL.to_string()),
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(value.trim().to_string()),
    }
}

fn parse_log_format(raw: &str) -> anyhow::Result<LogFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        other => anyhow::bail!("Unsupported LOG_FORMAT: {}", other),
    }
}
