/// Probe results:
pub mod outcome;

/// Health check report:
pub mod report;

/// Webhook wire format:
pub mod payload;

/// Unexpected probe results:
pub mod unexpected;
