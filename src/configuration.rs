//
// Default configuration and default values:
//


/// Configuration file candidates, first existing one is used:
pub const DEFAULT_CONFIG_PATHS: [&str; 3] = [
    "/etc/stroz/stroz.conf",
    "/usr/local/etc/stroz/stroz.conf",
    "stroz.conf",
];

/// Environment variable pointing to explicit configuration file:
pub const ENV_CONFIG_PATH: &str = "STROZ_CONFIG";

/// Environment variable overriding the webhook:
pub const ENV_WEBHOOK: &str = "DISCORD_HEALTHCHECK_WEBHOOK";

/// Dotenv file loaded from the working directory:
pub const DOTENV_FILE: &str = ".env";

/// Sites checked when the configuration doesn't list any: (name, env variable)
pub const DEFAULT_SITES: [(&str, &str); 2] = [
    ("Echecs France Results API", "ECHECS_FRANCE_RESULTS_API"),
    ("Chess PDF API", "CHESS_PDF_API"),
];


/// Check timeout in seconds
pub const CHECK_TIMEOUT: u64 = 15;

/// Check connection timeout in seconds
pub const CHECK_CONNECTION_TIMEOUT: u64 = 30;

/// Max redirections followed by a single probe
pub const CHECK_MAX_REDIRECTIONS: u32 = 10;

/// Only this code is considered healthy
pub const CHECK_DEFAULT_SUCCESSFUL_HTTP_CODE: u32 = 200;

/// Warn when certificate expires sooner, in days
pub const CHECK_MINIMUM_DAYS_OF_TLSCERT_VALIDITY: i64 = 14;

/// Number of probes running at the same time
pub const CHECK_PARALLELISM: usize = 4;

/// Total attempts for a single probe or delivery
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Base delay of the backoff between attempts, in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 250;

/// Amount of response body kept for diagnostics
pub const COLLECTOR_PREFIX_LIMIT: usize = 512;


/// Date format used in reports
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Report title prefix
pub const REPORT_TITLE: &str = "Health Check for";

/// Report description
pub const REPORT_DESCRIPTION: &str = "Website Health Check";

/// Embed color when every site is fine
pub const COLOR_OK: u32 = 0x00FF00;

/// Embed color when any site fails
pub const COLOR_ALERT: u32 = 0xFF0000;

/// Placeholder for missing certificate entries
pub const UNKNOWN_PLACEHOLDER: &str = "unknown";

/// Status shown for sites which couldn't be probed
pub const UNREACHABLE_STATUS: &str = "unreachable";

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("stroz/", env!("CARGO_PKG_VERSION"));
