use crate::*;
use chrono::Utc;
use curl::easy::Easy2;
use rayon::prelude::*;
use retry::{retry, Error as RetryError, OperationResult};
use std::time::Duration;
use url::Url;


#[derive(Debug, Clone, PartialEq, Eq)]
/// Probe options, passed to Curl
pub struct ProbeOptions {
    /// Total request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connection_timeout: Duration,

    /// Probes running at the same time
    pub parallelism: usize,

    /// Retry policy for transient failures
    pub retry: RetryPolicy,

    /// Read TLS certificate details of https sites
    pub inspect_certificates: bool,

    /// HTTP agent name
    pub agent: String,
}


impl Default for ProbeOptions {
    fn default() -> ProbeOptions {
        ProbeOptions {
            timeout: Duration::from_secs(CHECK_TIMEOUT),
            connection_timeout: Duration::from_secs(CHECK_CONNECTION_TIMEOUT),
            parallelism: CHECK_PARALLELISM,
            retry: RetryPolicy::default(),
            inspect_certificates: true,
            agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}


#[derive(Debug, Clone)]
/// Issues health check requests
pub struct Prober {
    options: ProbeOptions,
}


impl Prober {
    /// New prober
    pub fn new(options: ProbeOptions) -> Prober {
        Prober { options }
    }


    /// Probe every registered site. Failures are kept per site, order follows the registry.
    pub fn probe_all(&self, registry: &Registry) -> Vec<ProbeResult> {
        if registry.is_empty() {
            warn!("No sites registered! Nothing to probe.");
            return vec![];
        }
        let probe_site = |site: &Site| {
            let outcome = self.probe(&site.url);
            if let Err(err) = &outcome {
                error!("Site: {} is unreachable. {}", site.name, err);
            }
            ProbeResult::new(site.clone(), outcome)
        };
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.parallelism.max(1))
            .thread_name(|index| format!("probe-{}", index))
            .build()
        {
            Ok(pool) => pool.install(|| registry.sites().par_iter().map(probe_site).collect()),
            Err(err) => {
                warn!(
                    "Couldn't build probe thread pool, probing sequentially. Details: {}",
                    err
                );
                registry.sites().iter().map(probe_site).collect()
            }
        }
    }


    /// Probe single URL, retrying transient failures
    #[instrument(skip(self, url), fields(url = %url))]
    pub fn probe(&self, url: &Url) -> Result<ProbeOutcome, ProbeError> {
        let mut attempt = 0;
        let status_code = retry(self.options.retry.delays(), || {
            attempt += 1;
            match self.request(url) {
                Ok(code) => OperationResult::Ok(code),
                Err(err) if err.is_transient() => {
                    warn!("Attempt {} failed: {}", attempt, err);
                    OperationResult::Retry(err)
                }
                Err(err) => OperationResult::Err(err),
            }
        })
        .map_err(|err| {
            match err {
                RetryError::Operation { error, .. } => error,
                RetryError::Internal(details) => ProbeError::Transport(url.to_string(), details),
            }
        })?;

        let certificate = if self.options.inspect_certificates {
            inspect_certificate(url, self.options.connection_timeout).unwrap_or_else(|err| {
                warn!("Certificate details unavailable: {}", err);
                None
            })
        } else {
            None
        };
        if let Some(cert) = &certificate {
            let days_left = cert.days_left(Utc::now());
            if days_left < CHECK_MINIMUM_DAYS_OF_TLSCERT_VALIDITY {
                warn!(
                    "TLS certificate for domain: {} is valid only for: {} days",
                    cert.common_name(),
                    days_left
                );
            }
        }

        if status_code == CHECK_DEFAULT_SUCCESSFUL_HTTP_CODE {
            info!("Got expected code: {}", status_code);
        } else {
            warn!(
                "Got code: {}. Expected code: {}",
                status_code, CHECK_DEFAULT_SUCCESSFUL_HTTP_CODE
            );
        }
        Ok(ProbeOutcome::new(status_code, certificate))
    }


    /// Single GET request. Body is drained and handle dropped on every path.
    fn request(&self, url: &Url) -> Result<u32, ProbeError> {
        let curl_error = |err: curl::Error| ProbeError::from_curl(url.as_str(), &err);
        let mut curl = Easy2::new(Collector::default());
        curl.url(url.as_str()).map_err(curl_error)?;
        curl.get(true).map_err(curl_error)?;
        curl.useragent(&self.options.agent).map_err(curl_error)?;
        curl.follow_location(true).map_err(curl_error)?;
        curl.max_redirections(CHECK_MAX_REDIRECTIONS)
            .map_err(curl_error)?;
        curl.connect_timeout(self.options.connection_timeout)
            .map_err(curl_error)?;
        curl.timeout(self.options.timeout).map_err(curl_error)?;

        // Verify SSL PEER and HOST
        curl.ssl_verify_peer(true).map_err(curl_error)?;
        curl.ssl_verify_host(true).map_err(curl_error)?;

        curl.perform().map_err(curl_error)?;
        let code = curl.response_code().map_err(curl_error)?;
        let final_address = curl
            .effective_url()
            .unwrap_or_default()
            .unwrap_or_default()
            .to_string();
        trace!(
            "Response code: {}, final URL: {}, body: {:?}",
            code,
            final_address,
            curl.get_ref()
        );
        debug!("Drained {} bytes of response body", curl.get_ref().drained());
        Ok(code)
    }
}
