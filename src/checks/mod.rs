/// Monitored sites and their registry:
pub mod site;

/// HTTP(S) probes:
pub mod prober;

/// TLS certificate details:
pub mod certificate;
