use crate::*;
use chrono::Local;


/**
    Public library API for Stroz health check functionality
 **/


#[derive(Debug, Clone, PartialEq, Eq)]
/// Products of a delivered health check run
pub struct RunSummary {
    /// Delivered report
    pub report: Report,

    /// Webhook answer
    pub delivery: DeliveryOutcome,
}


/// Probe every site, build report, deliver it.
/// Probe failures end up in the report, only delivery and serialization failures are fatal.
pub fn execute(settings: &Settings) -> Result<RunSummary, Error> {
    info!("Probing {} site(s)…", settings.registry.len());
    let results = Prober::new(settings.probe.clone()).probe_all(&settings.registry);
    let failures = results
        .iter()
        .filter(|result| !result.is_healthy())
        .count();

    let report = Report::build(&results, &Local::now());
    info!(
        "{}: {} healthy, {} failing. Severity: {:?}",
        report.title,
        results.len() - failures,
        failures,
        report.severity
    );

    let delivery = Notificator::new(settings.webhook.clone(), settings.delivery.clone())
        .notify(&report)?;
    Ok(RunSummary { report, delivery })
}


/// Load dotenv file and configuration, then execute
pub fn run() -> Result<RunSummary, Error> {
    load_dotenv()?;
    let settings = Config::load()?.resolve()?;
    execute(&settings)
}
