use crate::*;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Binary report classification
pub enum Severity {
    /// Every site answered 200
    Ok,

    /// At least one site failed or answered something else
    Alert,
}


impl Severity {
    /// Embed color of the severity
    pub fn color(self) -> u32 {
        match self {
            Severity::Ok => COLOR_OK,
            Severity::Alert => COLOR_ALERT,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
/// Report entry of single site
pub struct ReportField {
    /// Site name
    pub label: String,

    /// Multi-line status text
    pub body: String,
}


#[derive(Debug, Clone, PartialEq, Eq)]
/// Summary of all probe results of a run
pub struct Report {
    /// Report title, with timestamp
    pub title: String,

    /// Report description
    pub description: String,

    /// Report severity
    pub severity: Severity,

    /// One field per probe result, in probe order
    pub fields: Vec<ReportField>,
}


impl Report {
    /// Build report from probe results
    pub fn build<Tz>(results: &[ProbeResult], timestamp: &DateTime<Tz>) -> Report
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let severity = if results.iter().all(ProbeResult::is_healthy) {
            Severity::Ok
        } else {
            Severity::Alert
        };
        Report {
            title: format!("{} {}", REPORT_TITLE, timestamp.format(DATE_FORMAT)),
            description: String::from(REPORT_DESCRIPTION),
            severity,
            fields: results
                .iter()
                .map(|result| {
                    ReportField {
                        label: result.site.name.clone(),
                        body: field_body(result),
                    }
                })
                .collect(),
        }
    }
}


/// Status text of single probe result
fn field_body(result: &ProbeResult) -> String {
    match &result.outcome {
        Ok(ProbeOutcome {
            status_code,
            certificate: Some(cert),
        }) => {
            format!(
                "Status: {}\n\n*SSL/TLS Status*\n-----------------\nIssuer: {}\nDomain: {}\nValid From: {}\nValid Until: {}",
                status_code,
                cert.issuer(),
                cert.common_name(),
                cert.valid_from.format(DATE_FORMAT),
                cert.valid_until.format(DATE_FORMAT),
            )
        }
        Ok(ProbeOutcome {
            status_code,
            certificate: None,
        }) => format!("Status: {}", status_code),
        Err(err) => format!("Status: {}\nDetails: {}", UNREACHABLE_STATUS, err),
    }
}
