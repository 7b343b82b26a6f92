use crate::*;
use chrono::{DateTime, TimeZone, Utc};
use openssl::{
    asn1::{Asn1Time, Asn1TimeRef},
    error::ErrorStack,
    nid::Nid,
    ssl::{SslConnector, SslMethod, SslVerifyMode},
    x509::{X509NameRef, X509Ref},
};
use std::{net::TcpStream, time::Duration};
use url::{Host, Url};


#[derive(Debug, Clone, PartialEq, Eq)]
/// Leaf certificate details presented by a site
pub struct CertificateInfo {
    /// First issuer organization entry
    pub issuer: Option<String>,

    /// First subject common name entry
    pub common_name: Option<String>,

    /// Certificate not-before
    pub valid_from: DateTime<Utc>,

    /// Certificate not-after
    pub valid_until: DateTime<Utc>,
}


impl CertificateInfo {
    /// Extract details from X509 certificate. Missing entries stay None.
    pub fn from_x509(cert: &X509Ref) -> Result<CertificateInfo, ErrorStack> {
        Ok(CertificateInfo {
            issuer: first_entry(cert.issuer_name(), Nid::ORGANIZATIONNAME),
            common_name: first_entry(cert.subject_name(), Nid::COMMONNAME),
            valid_from: asn1_to_utc(cert.not_before())?,
            valid_until: asn1_to_utc(cert.not_after())?,
        })
    }


    /// Issuer organization or placeholder
    pub fn issuer(&self) -> &str {
        self.issuer
            .as_deref()
            .unwrap_or(UNKNOWN_PLACEHOLDER)
    }


    /// Subject common name or placeholder
    pub fn common_name(&self) -> &str {
        self.common_name
            .as_deref()
            .unwrap_or(UNKNOWN_PLACEHOLDER)
    }


    /// Days left until expiry, negative when expired
    pub fn days_left(&self, now: DateTime<Utc>) -> i64 {
        (self.valid_until - now).num_days()
    }
}


/// First entry of given kind. Raw bytes are kept whole, invalid UTF-8 is replaced.
fn first_entry(name: &X509NameRef, nid: Nid) -> Option<String> {
    name.entries_by_nid(nid)
        .next()
        .map(|entry| String::from_utf8_lossy(entry.data().as_slice()).into_owned())
}


/// Convert ASN.1 time to UTC, through its distance from the epoch
fn asn1_to_utc(time: &Asn1TimeRef) -> Result<DateTime<Utc>, ErrorStack> {
    let epoch = Asn1Time::from_unix(0)?;
    let diff = epoch.diff(time)?;
    let seconds = i64::from(diff.days) * 86_400 + i64::from(diff.secs);
    Ok(Utc
        .timestamp_opt(seconds, 0)
        .single()
        .unwrap_or_default())
}


/// Read leaf certificate of https site through a separate TLS handshake.
/// Chain verification is done by the Curl probe, hence disabled here.
#[instrument(skip(url, timeout), fields(url = %url))]
pub fn inspect_certificate(
    url: &Url,
    timeout: Duration,
) -> Result<Option<CertificateInfo>, ProbeError> {
    // IPv6 literals without brackets, for SNI and logs
    let host = match url.host() {
        Some(Host::Domain(domain)) if url.scheme() == "https" => domain.to_string(),
        Some(Host::Ipv4(address)) if url.scheme() == "https" => address.to_string(),
        Some(Host::Ipv6(address)) if url.scheme() == "https" => address.to_string(),
        _ => return Ok(None),
    };
    let tls_error = |err: String| ProbeError::Tls(url.to_string(), err);

    let addresses = url
        .socket_addrs(|| Some(443))
        .map_err(|err| ProbeError::Resolve(url.to_string(), err.to_string()))?;
    let mut last_error = None;
    let mut stream = None;
    for address in addresses {
        match TcpStream::connect_timeout(&address, timeout) {
            Ok(connected) => {
                stream = Some(connected);
                break;
            }
            Err(err) => last_error = Some(err),
        }
    }
    let stream = stream.ok_or_else(|| {
        ProbeError::Connection(
            url.to_string(),
            last_error
                .map(|err| err.to_string())
                .unwrap_or_else(|| String::from("no address to connect to")),
        )
    })?;
    stream
        .set_read_timeout(Some(timeout))
        .and_then(|_| stream.set_write_timeout(Some(timeout)))
        .map_err(|err| ProbeError::Transport(url.to_string(), err.to_string()))?;

    let mut builder = SslConnector::builder(SslMethod::tls()).map_err(|err| tls_error(err.to_string()))?;
    builder.set_verify(SslVerifyMode::NONE);
    let tls = builder
        .build()
        .configure()
        .map_err(|err| tls_error(err.to_string()))?
        .verify_hostname(false)
        .connect(&host, stream)
        .map_err(|err| tls_error(err.to_string()))?;

    match tls.ssl().peer_certificate() {
        Some(cert) => {
            let info = CertificateInfo::from_x509(&cert).map_err(|err| tls_error(err.to_string()))?;
            debug!(
                "Certificate of {}: issuer: {}, domain: {}, valid until: {}",
                host,
                info.issuer(),
                info.common_name(),
                info.valid_until
            );
            Ok(Some(info))
        }
        None => {
            debug!("No peer certificate presented by: {}", host);
            Ok(None)
        }
    }
}
