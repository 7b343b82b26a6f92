use crate::*;
use curl::easy::{Easy2, List};
use retry::{retry, Error as RetryError, OperationResult};
use std::time::Duration;
use url::Url;


#[derive(Debug, Clone, PartialEq, Eq)]
/// Delivery options, passed to Curl
pub struct DeliveryOptions {
    /// Total request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connection_timeout: Duration,

    /// Retry policy for transient failures
    pub retry: RetryPolicy,

    /// HTTP agent name
    pub agent: String,
}


impl Default for DeliveryOptions {
    fn default() -> DeliveryOptions {
        DeliveryOptions {
            timeout: Duration::from_secs(CHECK_TIMEOUT),
            connection_timeout: Duration::from_secs(CHECK_CONNECTION_TIMEOUT),
            retry: RetryPolicy::default(),
            agent: String::from(DEFAULT_USER_AGENT),
        }
    }
}


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Accepted delivery
pub struct DeliveryOutcome {
    /// Code returned by the webhook
    pub status_code: u32,

    /// Attempts it took
    pub attempts: u32,
}


/// Delivers reports to chat webhook
#[derive(Debug, Clone)]
pub struct Notificator {
    webhook: Url,
    options: DeliveryOptions,
}


impl Notificator {
    /// New notificator for given webhook
    pub fn new(webhook: Url, options: DeliveryOptions) -> Notificator {
        Notificator { webhook, options }
    }


    /// Serialize report and deliver it
    pub fn notify(&self, report: &Report) -> Result<DeliveryOutcome, Error> {
        let body = WebhookPayload::from(report).to_json()?;
        Ok(self.deliver(&body)?)
    }


    /// POST given JSON body, retrying transient failures
    pub fn deliver(&self, body: &[u8]) -> Result<DeliveryOutcome, DeliveryError> {
        let webhook = redact(&self.webhook);
        let mut attempts = 0;
        retry(self.options.retry.delays(), || {
            attempts += 1;
            debug!("Delivering notification to: {}, attempt: {}", webhook, attempts);
            match self.post(body) {
                Ok(status_code) => {
                    OperationResult::Ok(DeliveryOutcome {
                        status_code,
                        attempts,
                    })
                }
                Err(err) if err.is_transient() => {
                    warn!("Delivery attempt {} failed: {}", attempts, err);
                    OperationResult::Retry(err)
                }
                Err(err) => OperationResult::Err(err),
            }
        })
        .map(|outcome| {
            info!(
                "Notification delivered to: {} with code: {}",
                webhook, outcome.status_code
            );
            outcome
        })
        .map_err(|err| {
            match err {
                // only transient failures spend the retry budget
                RetryError::Operation { error, .. } if error.is_transient() => {
                    DeliveryError::Exhausted(Box::new(error), attempts)
                }
                RetryError::Operation { error, .. } => error,
                RetryError::Internal(details) => DeliveryError::Transport(webhook.clone(), details),
            }
        })
    }


    /// Single POST request
    fn post(&self, body: &[u8]) -> Result<u32, DeliveryError> {
        let webhook = redact(&self.webhook);
        let curl_error = |err: curl::Error| DeliveryError::Transport(webhook.clone(), err.to_string());
        let mut headers = List::new();
        headers
            .append("Content-Type: application/json")
            .map_err(curl_error)?;

        let mut curl = Easy2::new(Collector::default());
        curl.url(self.webhook.as_str()).map_err(curl_error)?;
        curl.post(true).map_err(curl_error)?;
        curl.post_fields_copy(body).map_err(curl_error)?;
        curl.http_headers(headers).map_err(curl_error)?;
        curl.useragent(&self.options.agent).map_err(curl_error)?;
        curl.connect_timeout(self.options.connection_timeout)
            .map_err(curl_error)?;
        curl.timeout(self.options.timeout).map_err(curl_error)?;
        curl.perform().map_err(curl_error)?;

        let code = curl.response_code().map_err(curl_error)?;
        if (200..300).contains(&code) {
            Ok(code)
        } else {
            Err(DeliveryError::Rejected(
                webhook.clone(),
                code,
                curl.get_ref().preview(),
            ))
        }
    }
}
