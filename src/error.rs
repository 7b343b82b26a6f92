use std::fmt;
use thiserror::Error;


#[derive(Debug, Clone, PartialEq, Eq)]
/// Single problem found while validating configuration
pub enum ConfigIssue {
    /// Webhook is neither configured nor set in environment
    MissingWebhook,

    /// Webhook isn't a valid http(s) URL (value, reason)
    InvalidWebhook(String, String),

    /// Site without a name
    UnnamedSite,

    /// Site name used more than once
    DuplicateSite(String),

    /// Site without URL (site name, env variable expected to hold it)
    MissingUrl(String, Option<String>),

    /// Site URL isn't a valid http(s) URL (site name, value, reason)
    InvalidUrl(String, String, String),

    /// Parallelism set to zero
    ZeroParallelism,

    /// Attempts set to zero
    ZeroAttempts,
}


impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::MissingWebhook => {
                write!(
                    f,
                    "webhook is not configured (set \"webhook\" or {})",
                    crate::ENV_WEBHOOK
                )
            }
            ConfigIssue::InvalidWebhook(value, reason) => {
                write!(f, "webhook \"{}\" is invalid: {}", value, reason)
            }
            ConfigIssue::UnnamedSite => write!(f, "site without a name"),
            ConfigIssue::DuplicateSite(name) => {
                write!(f, "site \"{}\" is defined more than once", name)
            }
            ConfigIssue::MissingUrl(name, Some(variable)) => {
                write!(
                    f,
                    "site \"{}\" has no URL (environment variable {} is not set)",
                    name, variable
                )
            }
            ConfigIssue::MissingUrl(name, None) => write!(f, "site \"{}\" has no URL", name),
            ConfigIssue::InvalidUrl(name, value, reason) => {
                write!(
                    f,
                    "site \"{}\" has invalid URL \"{}\": {}",
                    name, value, reason
                )
            }
            ConfigIssue::ZeroParallelism => write!(f, "parallelism must be at least 1"),
            ConfigIssue::ZeroAttempts => write!(f, "attempts must be at least 1"),
        }
    }
}


/// Joins issues for display
fn list_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}


#[derive(Debug, Error)]
/// Configuration couldn't be loaded
pub enum ConfigLoadError {
    /// Dotenv file is malformed
    #[error("Failed to load dotenv file. Details: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// File couldn't be read (path, details)
    #[error("Couldn't read configuration file: {0}. Details: {1}")]
    Read(String, String),

    /// File isn't valid JSON (path, details)
    #[error("Configuration error in file: {0}. Details: {1}")]
    Parse(String, String),

    /// Every problem found during validation
    #[error("Invalid configuration: {}", list_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}


#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// Notification couldn't be delivered
pub enum DeliveryError {
    /// Request didn't complete (redacted webhook, details)
    #[error("Failed to deliver notification to webhook: {0}. Details: {1}")]
    Transport(String, String),

    /// Webhook answered with non-success code (redacted webhook, code, response)
    #[error("Webhook: {0} rejected notification with code: {1}. Response: {2}")]
    Rejected(String, u32, String),

    /// Gave up after all attempts (last failure, attempts)
    #[error("Notification delivery gave up after {1} attempts. Last failure: {0}")]
    Exhausted(Box<DeliveryError>, u32),
}


impl DeliveryError {
    /// Whether another attempt may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            DeliveryError::Transport(..) => true,
            DeliveryError::Rejected(_, code, _) => *code == 429 || *code >= 500,
            DeliveryError::Exhausted(..) => false,
        }
    }
}


#[derive(Debug, Error)]
/// Fatal failure of a health check run
pub enum Error {
    /// Configuration load or validation failure
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    /// Report couldn't be serialized
    #[error("Failed to serialize notification. Details: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Report couldn't be delivered
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Logger couldn't be initialized
    #[error("Couldn't initialize logger. Details: {0}")]
    Logger(String),
}


impl Error {
    /// Process exit code for this failure class
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Logger(_) => 1,
            Error::Config(_) => 2,
            Error::Serialization(_) => 3,
            Error::Delivery(_) => 4,
        }
    }
}
