use curl::Error as CurlError;
use thiserror::Error;


#[derive(Debug, Clone, Error, PartialEq, Eq, Hash)]
/// Unexpected probe result, recorded per site
pub enum ProbeError {
    /// Host name couldn't be resolved (url, details)
    #[error("URL: {0} couldn't be resolved. Details: {1}")]
    Resolve(String, String),

    /// Connection refused or reset (url, details)
    #[error("Failed to connect to URL: {0}. Details: {1}")]
    Connection(String, String),

    /// Request didn't finish in time (url, details)
    #[error("URL: {0} couldn't be reached in time. Details: {1}")]
    Timeout(String, String),

    /// TLS handshake or verification failure (url, details)
    #[error("TLS failure for URL: {0}. Details: {1}")]
    Tls(String, String),

    /// Any other transport failure (url, details)
    #[error("Transport failure for URL: {0}. Details: {1}")]
    Transport(String, String),
}


impl ProbeError {
    /// Converts CurlError to ProbeError
    pub fn from_curl(url: &str, err: &CurlError) -> ProbeError {
        let details = err.to_string();
        if err.is_couldnt_resolve_host() || err.is_couldnt_resolve_proxy() {
            ProbeError::Resolve(url.to_string(), details)
        } else if err.is_couldnt_connect() {
            ProbeError::Connection(url.to_string(), details)
        } else if err.is_operation_timedout() {
            ProbeError::Timeout(url.to_string(), details)
        } else if err.is_ssl_connect_error()
            || err.is_peer_failed_verification()
            || err.is_ssl_certproblem()
            || err.is_ssl_cacert()
            || err.is_ssl_cipher()
            || err.is_ssl_issuer_error()
        {
            ProbeError::Tls(url.to_string(), details)
        } else {
            ProbeError::Transport(url.to_string(), details)
        }
    }


    /// Whether another attempt may succeed
    pub fn is_transient(&self) -> bool {
        !matches!(self, ProbeError::Tls(..))
    }
}
