use crate::*;


#[derive(Debug, Clone, PartialEq, Eq)]
/// Successful probe: what the site answered
pub struct ProbeOutcome {
    /// Final HTTP status code
    pub status_code: u32,

    /// Leaf certificate details, https only
    pub certificate: Option<CertificateInfo>,
}


impl ProbeOutcome {
    /// New outcome
    pub fn new(status_code: u32, certificate: Option<CertificateInfo>) -> ProbeOutcome {
        ProbeOutcome {
            status_code,
            certificate,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
/// Probe result of single site
pub struct ProbeResult {
    /// Probed site
    pub site: Site,

    /// Outcome or the reason site couldn't be probed
    pub outcome: Result<ProbeOutcome, ProbeError>,
}


impl ProbeResult {
    /// New result
    pub fn new(site: Site, outcome: Result<ProbeOutcome, ProbeError>) -> ProbeResult {
        ProbeResult { site, outcome }
    }


    /// Site answered with expected code
    pub fn is_healthy(&self) -> bool {
        matches!(
            &self.outcome,
            Ok(outcome) if outcome.status_code == CHECK_DEFAULT_SUCCESSFUL_HTTP_CODE
        )
    }
}
