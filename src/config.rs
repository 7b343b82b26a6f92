use crate::*;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::level_filters::LevelFilter;
use url::Url;


#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
/// Configuration file contents, every entry optional
pub struct Config {
    /// Webhook receiving reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,

    /// Monitored sites, built-in sites when not defined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sites: Option<Vec<SiteEntry>>,

    /// Log level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Connection timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_timeout: Option<u64>,

    /// Probes running at the same time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<usize>,

    /// Total attempts for each probe and delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,

    /// Base delay between attempts in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_delay_ms: Option<u64>,

    /// Read TLS certificate details of https sites
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspect_certificates: Option<bool>,
}


#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated settings of a run
pub struct Settings {
    /// Webhook receiving reports
    pub webhook: Url,

    /// Monitored sites
    pub registry: Registry,

    /// Probe options
    pub probe: ProbeOptions,

    /// Delivery options
    pub delivery: DeliveryOptions,
}


/// Load dotenv file from working directory, if there is one
pub fn load_dotenv() -> Result<(), ConfigLoadError> {
    load_dotenv_from(Path::new(DOTENV_FILE))
}


/// Load given dotenv file, if it exists. Variables already set are kept.
pub fn load_dotenv_from(dotenv: &Path) -> Result<(), ConfigLoadError> {
    if dotenv.exists() {
        dotenvy::from_path(dotenv)?;
        debug!("Loaded environment from: {}", dotenv.display());
    }
    Ok(())
}


/// Variable from process environment, empty counts as unset
pub fn env_lookup(variable: &str) -> Option<String> {
    env::var(variable)
        .ok()
        .filter(|value| !value.trim().is_empty())
}


impl Config {
    /// Load configuration: explicit file from environment, first existing default, or defaults
    pub fn load() -> Result<Config, ConfigLoadError> {
        Config::load_with(&env_lookup, &DEFAULT_CONFIG_PATHS)
    }


    /// Load configuration using given variable lookup and file candidates
    pub fn load_with<F>(lookup: &F, candidates: &[&str]) -> Result<Config, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENV_CONFIG_PATH) {
            Some(path) => Config::from_file(Path::new(&path)),
            None => {
                match candidates
                    .iter()
                    .map(PathBuf::from)
                    .find(|path| path.exists())
                {
                    Some(path) => Config::from_file(&path),
                    None => {
                        debug!("No configuration file found, using defaults.");
                        Ok(Config::default())
                    }
                }
            }
        }
    }


    /// Load configuration from given JSON file
    pub fn from_file(path: &Path) -> Result<Config, ConfigLoadError> {
        let name = path.display().to_string();
        let contents = fs::read_to_string(path)
            .map_err(|err| ConfigLoadError::Read(name.clone(), err.to_string()))?;
        serde_json::from_str(&contents).map_err(|err| ConfigLoadError::Parse(name, err.to_string()))
    }


    /// Get LevelFilter (log level) from configuration
    pub fn get_log_level(&self) -> LevelFilter {
        let level = self.log_level.clone().unwrap_or_default();
        match &level.to_uppercase()[..] {
            "OFF" => LevelFilter::OFF,
            "ERROR" => LevelFilter::ERROR,
            "WARN" => LevelFilter::WARN,
            "INFO" => LevelFilter::INFO,
            "DEBUG" => LevelFilter::DEBUG,
            "TRACE" => LevelFilter::TRACE,
            _ => LevelFilter::INFO,
        }
    }


    /// Validate configuration against process environment
    pub fn resolve(&self) -> Result<Settings, ConfigLoadError> {
        self.resolve_with(&env_lookup)
    }


    /// Validate configuration, reading variables with given lookup.
    /// Every problem found is reported at once.
    pub fn resolve_with<F>(&self, lookup: &F) -> Result<Settings, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut issues = vec![];

        let webhook = match lookup(ENV_WEBHOOK).or_else(|| self.webhook.clone()) {
            Some(value) => {
                parse_http_url(value.trim())
                    .map_err(|reason| issues.push(ConfigIssue::InvalidWebhook(value, reason)))
                    .ok()
            }
            None => {
                issues.push(ConfigIssue::MissingWebhook);
                None
            }
        };

        let entries = self.sites.clone().unwrap_or_else(default_site_entries);
        let registry = Registry::from_entries(&entries, lookup)
            .map_err(|mut site_issues| issues.append(&mut site_issues))
            .ok();

        let parallelism = self.parallelism.unwrap_or(CHECK_PARALLELISM);
        if parallelism == 0 {
            issues.push(ConfigIssue::ZeroParallelism);
        }
        let attempts = self.attempts.unwrap_or(DEFAULT_ATTEMPTS);
        if attempts == 0 {
            issues.push(ConfigIssue::ZeroAttempts);
        }

        match (webhook, registry) {
            (Some(webhook), Some(registry)) if issues.is_empty() => {
                let retry = RetryPolicy::new(
                    attempts,
                    Duration::from_millis(self.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS)),
                );
                let timeout = Duration::from_secs(self.timeout.unwrap_or(CHECK_TIMEOUT));
                let connection_timeout = Duration::from_secs(
                    self.connection_timeout
                        .unwrap_or(CHECK_CONNECTION_TIMEOUT),
                );
                if registry.is_empty() {
                    warn!("Configuration defines no sites, report will be empty.");
                }
                Ok(Settings {
                    webhook,
                    registry,
                    probe: ProbeOptions {
                        timeout,
                        connection_timeout,
                        parallelism,
                        retry,
                        inspect_certificates: self.inspect_certificates.unwrap_or(true),
                        agent: String::from(DEFAULT_USER_AGENT),
                    },
                    delivery: DeliveryOptions {
                        timeout,
                        connection_timeout,
                        retry,
                        agent: String::from(DEFAULT_USER_AGENT),
                    },
                })
            }
            _ => Err(ConfigLoadError::Invalid(issues)),
        }
    }
}
